use std::{path::Path, sync::mpsc};

use image::{ImageBuffer, Rgba};
use tracing::info;
use vello::wgpu;

use crate::{
  Error, Result,
  render::{GpuHandle, RenderConfig},
};

pub fn save(handle: &GpuHandle, config: RenderConfig, path: &Path) -> Result<()> {
  let row_bytes = 4 * config.width;
  let padded_row_bytes = row_bytes.div_ceil(wgpu::COPY_BYTES_PER_ROW_ALIGNMENT)
    * wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;

  let buffer = handle.device.create_buffer(&wgpu::BufferDescriptor {
    label:              Some("Output Buffer"),
    size:               u64::from(padded_row_bytes * config.height),
    usage:              wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
    mapped_at_creation: false,
  });

  let mut encoder = handle.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
    label: Some("texture_buffer_copy_encoder"),
  });

  encoder.copy_texture_to_buffer(
    wgpu::TexelCopyTextureInfo {
      texture:   &handle.texture,
      mip_level: 0,
      origin:    wgpu::Origin3d::ZERO,
      aspect:    wgpu::TextureAspect::All,
    },
    wgpu::TexelCopyBufferInfo {
      buffer: &buffer,
      layout: wgpu::TexelCopyBufferLayout {
        offset:         0,
        bytes_per_row:  Some(padded_row_bytes),
        rows_per_image: Some(config.height),
      },
    },
    config.extent_3d(),
  );

  handle.queue.submit(std::iter::once(encoder.finish()));

  let slice = buffer.slice(..);
  let (tx, rx) = mpsc::channel();
  slice.map_async(wgpu::MapMode::Read, move |result| {
    let _ = tx.send(result);
  });
  handle.device.poll(wgpu::PollType::Wait)?;
  rx.recv().map_err(|e| Error::Render(e.to_string()))??;

  let mut pixels = Vec::with_capacity((row_bytes * config.height) as usize);
  {
    let data = slice.get_mapped_range();
    for row in data.chunks(padded_row_bytes as usize) {
      pixels.extend_from_slice(&row[..row_bytes as usize]);
    }
  }
  buffer.unmap();

  let image = ImageBuffer::<Rgba<u8>, _>::from_raw(config.width, config.height, pixels)
    .ok_or_else(|| Error::Render("image buffer size mismatch".into()))?;
  image.save(path)?;
  info!(path = %path.display(), "saved plot");

  Ok(())
}
