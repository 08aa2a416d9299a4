use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowId;

use crate::coords::Vec2;

/// Window events gathered during one pump, reduced to what the runtime uses.
#[derive(Debug, Default)]
pub(super) struct PumpedEvents {
    window: Option<WindowId>,
    pub close_requested: bool,
    pub resized: Option<PhysicalSize<u32>>,
    /// Last pointer position in physical pixels.
    pub pointer: Option<Vec2>,
}

impl PumpedEvents {
    pub fn for_window(window: Option<WindowId>) -> Self {
        Self {
            window,
            ..Self::default()
        }
    }

    pub fn record(&mut self, window_id: WindowId, event: &WindowEvent) {
        if self.window != Some(window_id) {
            return;
        }

        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => self.close_requested = true,
            WindowEvent::Resized(size) => self.resized = Some(*size),
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer = Some(Vec2::new(position.x as f32, position.y as f32));
            }
            _ => {}
        }
    }
}

impl ApplicationHandler for PumpedEvents {
    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {}

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        self.record(window_id, &event);
    }
}
