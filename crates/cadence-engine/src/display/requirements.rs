use crate::coords::{PixelSize, Vec2};

/// Surface configuration a scene declares while it is the drawn scene.
///
/// The runtime reconciles the render surface against the requirements of the
/// scene at index 0 once per frame. Resolution is kept behind a setter so it
/// can never drop below 1x1; everything else is plain data.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRequirements {
    resolution: PixelSize,

    /// Size of the visible part of the scene, in scene units.
    pub view_size: Vec2,
    /// Scene-space point shown at the center of the viewport.
    pub view_center: Vec2,

    pub fullscreen: bool,
    pub resizable: bool,
    /// Stretch the view over the whole surface instead of letterboxing it.
    pub stretched: bool,

    pub window_title: String,
}

impl DisplayRequirements {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn resolution(&self) -> PixelSize {
        self.resolution
    }

    /// Sets the surface resolution; each component is raised to at least 1.
    pub fn set_resolution(&mut self, width: i64, height: i64) {
        self.resolution = PixelSize::clamped(width, height);
    }

    // ── builder helpers ───────────────────────────────────────────────────

    pub fn with_resolution(mut self, width: i64, height: i64) -> Self {
        self.set_resolution(width, height);
        self
    }

    pub fn with_view(mut self, size: Vec2, center: Vec2) -> Self {
        self.view_size = size;
        self.view_center = center;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.window_title = title.into();
        self
    }

    pub fn with_fullscreen(mut self, fullscreen: bool) -> Self {
        self.fullscreen = fullscreen;
        self
    }

    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    pub fn with_stretched(mut self, stretched: bool) -> Self {
        self.stretched = stretched;
        self
    }
}

impl Default for DisplayRequirements {
    fn default() -> Self {
        Self {
            resolution: PixelSize::new(640, 480),
            view_size: Vec2::new(640.0, 480.0),
            view_center: Vec2::new(320.0, 240.0),
            fullscreen: false,
            resizable: false,
            stretched: false,
            window_title: "cadence".to_string(),
        }
    }
}
