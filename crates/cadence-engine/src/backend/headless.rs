use anyhow::{bail, Result};

use crate::coords::{ColorRgba, PixelSize, Rect, Vec2};
use crate::display::View;

use super::{Backend, DispatchOutcome, Surface, SurfaceConfig};

/// A recorded surface operation.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    Clear(ColorRgba),
    FillRect(Rect, ColorRgba),
    Present,
}

/// Backend without a window system.
///
/// Surfaces record every draw operation instead of rasterizing. Used for
/// windowless runs and to observe the runtime in tests. Input is scripted
/// through [`move_pointer`](Self::move_pointer) and
/// [`request_close`](Self::request_close) and delivered on the next event pump.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    created: u32,
    fail_next_create: bool,
    pending_pointer: Option<Vec2>,
    pending_close: bool,
    dispatches: u64,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of surfaces opened so far.
    pub fn surfaces_created(&self) -> u32 {
        self.created
    }

    /// Number of event pumps so far.
    pub fn dispatches(&self) -> u64 {
        self.dispatches
    }

    /// Makes the next `create_surface` call fail.
    pub fn fail_next_create(&mut self) {
        self.fail_next_create = true;
    }

    /// Moves the pointer to `pixel` at the next event pump.
    pub fn move_pointer(&mut self, pixel: Vec2) {
        self.pending_pointer = Some(pixel);
    }

    /// Reports a close request at the next event pump.
    pub fn request_close(&mut self) {
        self.pending_close = true;
    }
}

impl Backend for HeadlessBackend {
    type Surface = HeadlessSurface;

    fn create_surface(&mut self, config: &SurfaceConfig) -> Result<HeadlessSurface> {
        if std::mem::take(&mut self.fail_next_create) {
            bail!("headless surface creation failed on request");
        }
        self.created += 1;
        Ok(HeadlessSurface::new(self.created, config.clone()))
    }

    fn dispatch_events(&mut self, surface: &mut HeadlessSurface) -> Result<DispatchOutcome> {
        self.dispatches += 1;
        if let Some(pixel) = self.pending_pointer.take() {
            surface.pointer = Some(pixel);
        }
        Ok(DispatchOutcome {
            close_requested: std::mem::take(&mut self.pending_close),
        })
    }
}

/// Recording surface produced by [`HeadlessBackend`].
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    ordinal: u32,
    config: SurfaceConfig,
    size: PixelSize,
    title: String,
    view: View,
    pointer: Option<Vec2>,
    ops: Vec<SurfaceOp>,
    frames: u64,
    closed: bool,
}

impl HeadlessSurface {
    fn new(ordinal: u32, config: SurfaceConfig) -> Self {
        Self {
            ordinal,
            size: config.size,
            title: config.title.clone(),
            config,
            view: View::default(),
            pointer: None,
            ops: Vec::new(),
            frames: 0,
            closed: false,
        }
    }

    /// 1-based creation order within the owning backend.
    pub fn ordinal(&self) -> u32 {
        self.ordinal
    }

    /// Parameters the surface was opened with.
    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Operations recorded since the last `clear`.
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Number of presented frames.
    pub fn frames_presented(&self) -> u64 {
        self.frames
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Surface for HeadlessSurface {
    fn size(&self) -> PixelSize {
        self.size
    }

    fn set_size(&mut self, size: PixelSize) {
        self.size = size;
    }

    fn set_title(&mut self, title: &str) {
        if self.title != title {
            self.title = title.to_string();
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
        if self.closed {
            return;
        }
        self.ops.clear();
        self.ops.push(SurfaceOp::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: ColorRgba) {
        if self.closed {
            return;
        }
        self.ops.push(SurfaceOp::FillRect(rect, color));
    }

    fn present(&mut self) -> Result<()> {
        if self.closed {
            bail!("present called on a closed headless surface");
        }
        self.ops.push(SurfaceOp::Present);
        self.frames += 1;
        Ok(())
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::SurfaceStyle;

    fn config() -> SurfaceConfig {
        SurfaceConfig {
            size: PixelSize::new(320, 200),
            title: "t".into(),
            style: SurfaceStyle::default(),
        }
    }

    #[test]
    fn records_ops_per_frame() {
        let mut backend = HeadlessBackend::new();
        let mut surface = backend.create_surface(&config()).unwrap();

        surface.clear(ColorRgba::black());
        surface.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), ColorRgba::white());
        surface.present().unwrap();

        assert_eq!(surface.ops().len(), 3);
        assert_eq!(surface.frames_presented(), 1);

        surface.clear(ColorRgba::white());
        assert_eq!(surface.ops(), &[SurfaceOp::Clear(ColorRgba::white())]);
    }

    #[test]
    fn scripted_input_arrives_on_dispatch() {
        let mut backend = HeadlessBackend::new();
        let mut surface = backend.create_surface(&config()).unwrap();

        backend.move_pointer(Vec2::new(3.0, 4.0));
        backend.request_close();
        assert_eq!(surface.pointer_pixel(), None);

        let outcome = backend.dispatch_events(&mut surface).unwrap();
        assert!(outcome.close_requested);
        assert_eq!(surface.pointer_pixel(), Some(Vec2::new(3.0, 4.0)));

        let outcome = backend.dispatch_events(&mut surface).unwrap();
        assert!(!outcome.close_requested);
    }

    #[test]
    fn closed_surface_refuses_present() {
        let mut backend = HeadlessBackend::new();
        let mut surface = backend.create_surface(&config()).unwrap();
        surface.close();
        assert!(surface.present().is_err());
    }
}
