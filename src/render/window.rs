use std::sync::Arc;

use tracing::{debug, warn};
use vello::wgpu;
use winit::{
  application::ApplicationHandler,
  dpi::LogicalSize,
  event::{KeyEvent, WindowEvent},
  event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
  keyboard::{Key, NamedKey},
  window::{Window, WindowId},
};

use crate::{
  Error, Plot, Result,
  error::ResultExt,
  render::{CANVAS, GpuHandle, Render, RenderConfig},
};

pub fn show(plot: &Plot) -> Result<()> {
  let event_loop = EventLoop::new()?;
  event_loop.set_control_flow(ControlFlow::Wait);

  let mut app = App { plot, stale: true, render: None, init: None, error: None };
  event_loop.run_app(&mut app)?;
  let error = app.error.take();

  // FIXME: Ideally, we'd drop this. But dropping it segfaults.
  std::mem::forget(app);

  match error {
    Some(e) => Err(e),
    None => Ok(()),
  }
}

struct App<'a> {
  plot:   &'a Plot<'a>,
  stale:  bool,
  render: Option<Render>,
  init:   Option<Init>,
  error:  Option<Error>,
}

struct Init {
  window:  Arc<Window>,
  surface: wgpu::Surface<'static>,
  config:  wgpu::SurfaceConfiguration,
  handle:  GpuHandle,

  blit:  wgpu::util::TextureBlitter,
  vello: vello::Renderer,
}

impl ApplicationHandler for App<'_> {
  fn resumed(&mut self, event_loop: &ActiveEventLoop) {
    if self.init.is_some() {
      return;
    }

    match Init::new(event_loop, self.plot.title.as_deref().unwrap_or("gridplot")) {
      Ok(init) => self.init = Some(init),
      Err(e) => {
        self.error = Some(e);
        event_loop.exit();
      }
    }
  }

  fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
    match event {
      WindowEvent::CloseRequested => event_loop.exit(),

      WindowEvent::KeyboardInput { event: KeyEvent { logical_key, .. }, .. }
        if logical_key == Key::Character("q".into())
          || logical_key == Key::Named(NamedKey::Escape) =>
      {
        event_loop.exit();
      }

      WindowEvent::Resized(new_size) => {
        if let Some(init) = &mut self.init {
          if new_size.width > 0 && new_size.height > 0 {
            init.config.width = new_size.width;
            init.config.height = new_size.height;
            init
              .handle
              .resize(&RenderConfig { width: init.config.width, height: init.config.height });
            init.surface.configure(&init.handle.device, &init.config);

            self.stale = true;
            init.window.request_redraw();
          }
        }
      }

      WindowEvent::RedrawRequested => {
        let Some(init) = &mut self.init else { return };

        if self.stale || self.render.is_none() {
          self.stale = false;
          let render = self.render.get_or_insert_with(Render::new);
          render.scene.reset();
          render.fit(init.config.width, init.config.height);
          self.plot.draw(render);

          init
            .vello
            .render_to_texture(
              &init.handle.device,
              &init.handle.queue,
              &render.scene,
              &init.handle.view,
              &vello::RenderParams {
                base_color:          render.background,
                width:               init.config.width,
                height:              init.config.height,
                antialiasing_method: vello::AaConfig::Msaa16,
              },
            )
            .log_err();
        }
        init.redraw();
      }

      _ => (),
    }
  }
}

impl Init {
  fn new(event_loop: &ActiveEventLoop, title: &str) -> Result<Self> {
    let window = Arc::new(
      event_loop
        .create_window(
          Window::default_attributes()
            .with_title(title)
            .with_inner_size(LogicalSize::new(CANVAS.width, CANVAS.height))
            .with_min_inner_size(LogicalSize::new(100, 100)),
        )?,
    );
    let size = window.inner_size();

    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
    let surface = instance.create_surface(window.clone())?;

    let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
      compatible_surface: Some(&surface),
      ..Default::default()
    }))?;

    let surface_caps = surface.get_capabilities(&adapter);
    let surface_format = surface_caps
      .formats
      .iter()
      .copied()
      .find(|f| f.is_srgb())
      .or_else(|| surface_caps.formats.first().copied())
      .ok_or_else(|| Error::Render("surface has no supported formats".into()))?;

    let render_config = RenderConfig { width: size.width.max(1), height: size.height.max(1) };
    let handle = GpuHandle::new(&render_config, Some(adapter))?;

    let config = wgpu::SurfaceConfiguration {
      usage:                         wgpu::TextureUsages::RENDER_ATTACHMENT
        | wgpu::TextureUsages::COPY_DST,
      format:                        surface_format,
      width:                         render_config.width,
      height:                        render_config.height,
      present_mode:                  wgpu::PresentMode::AutoVsync,
      alpha_mode:                    surface_caps.alpha_modes[0],
      view_formats:                  vec![],
      desired_maximum_frame_latency: 2,
    };
    surface.configure(&handle.device, &config);

    let vello = vello::Renderer::new(&handle.device, vello::RendererOptions::default())?;

    let blit = wgpu::util::TextureBlitter::new(&handle.device, config.format);
    debug!(width = config.width, height = config.height, "window ready");

    Ok(Init { window, surface, config, handle, blit, vello })
  }

  fn redraw(&mut self) {
    let frame = match self.surface.get_current_texture() {
      Ok(frame) => frame,
      Err(wgpu::SurfaceError::Lost) => {
        self.surface.configure(&self.handle.device, &self.config);
        return;
      }
      Err(e) => {
        warn!("Dropped frame: {e:?}");
        return;
      }
    };

    let surface_view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());

    let mut encoder = self
      .handle
      .device
      .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("Render Encoder") });

    self.blit.copy(&self.handle.device, &mut encoder, &self.handle.view, &surface_view);

    self.handle.queue.submit(std::iter::once(encoder.finish()));

    frame.present();
  }
}
