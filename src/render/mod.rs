use std::path::Path;

use kurbo::{Affine, Point, Shape, Size, Stroke, Vec2};
use parley::{Alignment, FontWeight, Layout, PositionedLayoutItem, StyleProperty};
use peniko::{Brush, BrushRef, Color, Fill};
use tracing::debug;
use vello::wgpu;

use crate::{Plot, Result, theme};

mod texture;
mod window;

/// The logical drawing surface every plot is laid out on. It is scaled to
/// fit whatever the output target is.
pub const CANVAS: Size = Size::new(1200.0, 1000.0);

pub(crate) struct Render {
  pub scene:      vello::Scene,
  pub background: Color,
  font:           parley::FontContext,
  layout:         parley::LayoutContext<Brush>,
  base:           Affine,
}

pub(crate) struct GpuHandle {
  pub device:  wgpu::Device,
  pub queue:   wgpu::Queue,
  pub texture: wgpu::Texture,
  pub view:    wgpu::TextureView,
}

#[derive(Clone, Copy)]
pub(crate) struct RenderConfig {
  pub width:  u32,
  pub height: u32,
}

#[derive(Clone, Copy, Default)]
pub enum Align {
  #[default]
  Start,
  Center,
  End,
}

pub(crate) struct DrawText<'a> {
  pub text:             &'a str,
  pub size:             f32,
  pub weight:           FontWeight,
  pub brush:            Brush,
  pub position:         Point,
  pub transform:        Affine,
  pub horizontal_align: Align,
  pub vertical_align:   Align,
}

impl Default for DrawText<'_> {
  fn default() -> Self {
    DrawText {
      text:             "",
      size:             12.0,
      weight:           FontWeight::NORMAL,
      brush:            Brush::Solid(theme::TEXT_COLOR),
      position:         Point::ZERO,
      transform:        Affine::IDENTITY,
      horizontal_align: Align::Start,
      vertical_align:   Align::Start,
    }
  }
}

impl Plot<'_> {
  /// Opens a window showing this plot, and blocks until it is closed.
  pub fn show(&self) -> Result<()> { window::show(self) }

  /// Renders this plot offscreen, and writes it to `path` as an image.
  pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
    let config = RenderConfig { width: 1536, height: 1280 };
    let handle = GpuHandle::new(&config, None)?;

    let mut render = Render::new();
    render.fit(config.width, config.height);
    self.draw(&mut render);

    let mut renderer = vello::Renderer::new(&handle.device, vello::RendererOptions::default())?;

    renderer.render_to_texture(
      &handle.device,
      &handle.queue,
      &render.scene,
      &handle.view,
      &vello::RenderParams {
        base_color:          render.background,
        width:               config.width,
        height:              config.height,
        antialiasing_method: vello::AaConfig::Msaa16,
      },
    )?;

    texture::save(&handle, config, path.as_ref())
  }
}

impl Render {
  pub fn new() -> Self {
    Render {
      scene:      vello::Scene::new(),
      background: theme::BACKGROUND,
      font:       parley::FontContext::new(),
      layout:     parley::LayoutContext::new(),
      base:       Affine::IDENTITY,
    }
  }

  /// Centers the canvas in a `width` by `height` surface, as large as fits.
  pub fn fit(&mut self, width: u32, height: u32) {
    let scale = (f64::from(width) / CANVAS.width).min(f64::from(height) / CANVAS.height);
    let offset = Vec2::new(
      (f64::from(width) - CANVAS.width * scale) / 2.0,
      (f64::from(height) - CANVAS.height * scale) / 2.0,
    );
    self.base = Affine::translate(offset) * Affine::scale(scale);
  }

  pub fn fill<'b>(
    &mut self,
    shape: &impl Shape,
    transform: Affine,
    brush: impl Into<BrushRef<'b>>,
  ) {
    self.scene.fill(Fill::NonZero, self.base * transform, brush, None, shape);
  }

  pub fn stroke<'b>(
    &mut self,
    shape: &impl Shape,
    transform: Affine,
    brush: impl Into<BrushRef<'b>>,
    stroke: &Stroke,
  ) {
    self.scene.stroke(stroke, self.base * transform, brush, None, shape);
  }

  pub fn layout_text(&mut self, text: &DrawText) -> Layout<Brush> {
    let mut builder = self.layout.ranged_builder(&mut self.font, text.text, 1.0, true);

    builder.push_default(StyleProperty::FontSize(text.size));
    builder.push_default(StyleProperty::Brush(text.brush.clone()));
    builder.push_default(StyleProperty::FontWeight(text.weight));

    let mut layout = builder.build(text.text);
    layout.break_all_lines(None);
    layout.align(None, Alignment::Start, Default::default());
    layout
  }

  pub fn draw_text(&mut self, text: DrawText) {
    let layout = self.layout_text(&text);
    self.draw_text_layout(layout, text);
  }

  pub fn draw_text_layout(&mut self, layout: Layout<Brush>, text: DrawText) {
    let offset = Vec2::new(
      text.horizontal_align.offset(f64::from(layout.width())),
      text.vertical_align.offset(f64::from(layout.height())),
    );
    let transform = self.base
      * Affine::translate(text.position.to_vec2())
      * text.transform
      * Affine::translate(offset);

    for line in layout.lines() {
      for item in line.items() {
        let PositionedLayoutItem::GlyphRun(glyph_run) = item else { continue };

        let run = glyph_run.run();
        let mut x = glyph_run.offset();
        let baseline = glyph_run.baseline();

        self
          .scene
          .draw_glyphs(run.font())
          .brush(&glyph_run.style().brush)
          .hint(true)
          .transform(transform)
          .glyph_transform(
            run.synthesis().skew().map(|angle| Affine::skew(angle.to_radians().tan() as f64, 0.0)),
          )
          .font_size(run.font_size())
          .normalized_coords(run.normalized_coords())
          .draw(
            Fill::NonZero,
            glyph_run.glyphs().map(|glyph| {
              let gx = x + glyph.x;
              let gy = baseline + glyph.y;
              x += glyph.advance;
              vello::Glyph { id: glyph.id.into(), x: gx, y: gy }
            }),
          );
      }
    }
  }
}

impl Align {
  fn offset(self, size: f64) -> f64 {
    match self {
      Align::Start => 0.0,
      Align::Center => -size / 2.0,
      Align::End => -size,
    }
  }
}

impl GpuHandle {
  pub fn new(config: &RenderConfig, adapter: Option<wgpu::Adapter>) -> Result<Self> {
    let adapter = match adapter {
      Some(adapter) => adapter,
      None => {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions::default()))?
      }
    };
    debug!(adapter = ?adapter.get_info().name, "using graphics adapter");

    let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
      label:             None,
      required_features: wgpu::Features::empty(),
      required_limits:   wgpu::Limits::defaults(),
      memory_hints:      wgpu::MemoryHints::MemoryUsage,
      trace:             wgpu::Trace::Off,
    }))?;

    let (texture, view) = create_texture(&device, config);
    Ok(GpuHandle { device, queue, texture, view })
  }

  pub fn resize(&mut self, config: &RenderConfig) {
    let (texture, view) = create_texture(&self.device, config);
    self.texture = texture;
    self.view = view;
  }
}

fn create_texture(
  device: &wgpu::Device,
  config: &RenderConfig,
) -> (wgpu::Texture, wgpu::TextureView) {
  let texture = device.create_texture(&wgpu::TextureDescriptor {
    label:           Some("Render Texture"),
    size:            config.extent_3d(),
    mip_level_count: 1,
    sample_count:    1,
    dimension:       wgpu::TextureDimension::D2,
    format:          wgpu::TextureFormat::Rgba8Unorm,
    usage:           wgpu::TextureUsages::STORAGE_BINDING
      | wgpu::TextureUsages::TEXTURE_BINDING
      | wgpu::TextureUsages::COPY_SRC,
    view_formats:    &[],
  });
  let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

  (texture, view)
}

impl RenderConfig {
  fn extent_3d(&self) -> wgpu::Extent3d {
    wgpu::Extent3d { width: self.width, height: self.height, depth_or_array_layers: 1 }
  }
}
