use std::time::Duration;

use anyhow::{bail, Context, Result};
use ouroboros::self_referencing;
use winit::dpi::PhysicalSize;
use winit::event_loop::EventLoop;
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Fullscreen, Window, WindowButtons, WindowId};

use crate::backend::{Backend, DispatchOutcome, Surface, SurfaceConfig};
use crate::coords::{ColorRgba, PixelSize, Rect, Vec2};
use crate::device::{Gpu, GpuInit};
use crate::display::View;
use crate::render::{RectRenderer, RenderCtx, RenderTarget};

use super::events::PumpedEvents;

/// Backend opening real windows presented through wgpu.
///
/// The event loop is pumped (not run), so [`Runtime`](crate::runtime::Runtime)
/// keeps ownership of the loop. Surface pixels are physical pixels.
pub struct WinitBackend {
    event_loop: EventLoop<()>,
    gpu_init: GpuInit,
}

impl WinitBackend {
    pub fn new() -> Result<Self> {
        Self::with_gpu_init(GpuInit::default())
    }

    pub fn with_gpu_init(gpu_init: GpuInit) -> Result<Self> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        Ok(Self {
            event_loop,
            gpu_init,
        })
    }
}

impl Backend for WinitBackend {
    type Surface = WinitSurface;

    fn create_surface(&mut self, config: &SurfaceConfig) -> Result<WinitSurface> {
        let style = config.style;

        let mut buttons = WindowButtons::all();
        if !style.close {
            buttons.remove(WindowButtons::CLOSE);
        }
        if !style.resize {
            buttons.remove(WindowButtons::MAXIMIZE);
        }

        let attrs = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(PhysicalSize::new(config.size.width, config.size.height))
            .with_resizable(style.resize)
            .with_decorations(style.titlebar)
            .with_enabled_buttons(buttons)
            .with_fullscreen(style.fullscreen.then_some(Fullscreen::Borderless(None)));

        // The runtime pumps the loop itself, so windows are created outside a handler callback.
        #[allow(deprecated)]
        let window = self
            .event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        let inner = WindowGpuTryBuilder {
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed for window")?;

        Ok(WinitSurface {
            inner: Some(inner),
            renderer: RectRenderer::new(),
            rects: Vec::new(),
            clear: ColorRgba::black(),
            view: View::default(),
            title: config.title.clone(),
            pointer: None,
        })
    }

    fn dispatch_events(&mut self, surface: &mut WinitSurface) -> Result<DispatchOutcome> {
        let mut pumped = PumpedEvents::for_window(surface.window_id());

        if let PumpStatus::Exit(code) = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut pumped)
        {
            log::info!("winit event loop exited with code {code}");
            pumped.close_requested = true;
        }

        if let Some(size) = pumped.resized {
            surface.follow_resize(size);
        }
        if let Some(pointer) = pumped.pointer {
            surface.pointer = Some(pointer);
        }

        Ok(DispatchOutcome {
            close_requested: pumped.close_requested,
        })
    }
}

#[self_referencing]
struct WindowGpu {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

/// A window plus its GPU surface.
///
/// Draw calls are collected between `clear` and `present` and rendered in a
/// single pass. `close` drops the window.
pub struct WinitSurface {
    inner: Option<WindowGpu>,
    renderer: RectRenderer,
    rects: Vec<(Rect, ColorRgba)>,
    clear: ColorRgba,
    view: View,
    title: String,
    pointer: Option<Vec2>,
}

impl WinitSurface {
    fn window_id(&self) -> Option<WindowId> {
        self.inner.as_ref().map(|i| i.borrow_window().id())
    }

    fn follow_resize(&mut self, size: PhysicalSize<u32>) {
        if let Some(inner) = self.inner.as_mut() {
            inner.with_gpu_mut(|gpu| gpu.resize(size));
        }
    }
}

impl Surface for WinitSurface {
    fn size(&self) -> PixelSize {
        match self.inner.as_ref() {
            Some(inner) => {
                let s = inner.borrow_window().inner_size();
                PixelSize::clamped(s.width as i64, s.height as i64)
            }
            None => PixelSize::default(),
        }
    }

    fn set_size(&mut self, size: PixelSize) {
        let Some(inner) = self.inner.as_mut() else { return };
        inner.with_mut(|f| {
            let requested = PhysicalSize::new(size.width, size.height);
            // `Some` means the platform applied the size synchronously.
            if let Some(applied) = f.window.request_inner_size(requested) {
                f.gpu.resize(applied);
            }
        });
    }

    fn set_title(&mut self, title: &str) {
        if self.title == title {
            return;
        }
        self.title = title.to_string();
        if let Some(inner) = self.inner.as_ref() {
            inner.borrow_window().set_title(title);
        }
    }

    fn view(&self) -> View {
        self.view
    }

    fn set_view(&mut self, view: View) {
        self.view = view;
    }

    fn pointer_pixel(&self) -> Option<Vec2> {
        self.pointer
    }

    fn clear(&mut self, color: ColorRgba) {
        self.clear = color;
        self.rects.clear();
    }

    fn fill_rect(&mut self, rect: Rect, color: ColorRgba) {
        self.rects.push((rect, color));
    }

    fn present(&mut self) -> Result<()> {
        let Some(inner) = self.inner.as_mut() else {
            bail!("present called on a closed window");
        };

        let renderer = &mut self.renderer;
        let rects = &self.rects;
        let clear = self.clear;
        let view = self.view;

        inner.with_mut(|f| -> Result<()> {
            let Some(mut frame) = f.gpu.begin_frame()? else {
                return Ok(());
            };

            let size = f.gpu.size();
            {
                let ctx = RenderCtx::new(
                    f.gpu.device(),
                    f.gpu.queue(),
                    f.gpu.surface_format(),
                    PixelSize::clamped(size.width as i64, size.height as i64),
                    view,
                );
                let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
                renderer.render(&ctx, &mut target, clear, rects);
            }

            f.window.pre_present_notify();
            f.gpu.submit(frame);
            Ok(())
        })
    }

    fn close(&mut self) {
        if self.inner.take().is_some() {
            log::debug!("window closed");
        }
        self.rects.clear();
    }
}
