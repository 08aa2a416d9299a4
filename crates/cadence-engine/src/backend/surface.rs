use anyhow::Result;

use crate::coords::{ColorRgba, PixelSize, Rect, Vec2};
use crate::display::View;

/// Window decorations and behavior requested at surface creation.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct SurfaceStyle {
    pub resize: bool,
    pub fullscreen: bool,
    pub close: bool,
    pub titlebar: bool,
}

/// Everything a backend needs to open a surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceConfig {
    pub size: PixelSize,
    pub title: String,
    pub style: SurfaceStyle,
}

/// Result of one event pump.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// The user asked to close the surface (window close button, OS request).
    pub close_requested: bool,
}

/// A render target the runtime draws the active scene into.
///
/// Object safe: entities receive it as `&mut dyn Surface`.
pub trait Surface {
    /// Current drawable size in pixels.
    fn size(&self) -> PixelSize;

    /// Requests a new drawable size. Backends may apply it asynchronously.
    fn set_size(&mut self, size: PixelSize);

    fn set_title(&mut self, title: &str);

    fn view(&self) -> View;

    fn set_view(&mut self, view: View);

    /// Last known pointer position in surface pixels, if the pointer was ever seen.
    fn pointer_pixel(&self) -> Option<Vec2>;

    /// Maps a surface pixel into scene coordinates through the current view.
    fn map_pixel_to_coords(&self, pixel: Vec2) -> Vec2 {
        self.view().map_pixel_to_coords(pixel, self.size())
    }

    /// Starts a new frame filled with `color`.
    fn clear(&mut self, color: ColorRgba);

    /// Draws a solid rectangle in scene coordinates.
    fn fill_rect(&mut self, rect: Rect, color: ColorRgba);

    /// Shows everything drawn since the last `clear`.
    fn present(&mut self) -> Result<()>;

    /// Releases the surface. Further calls are ignored.
    fn close(&mut self);
}

/// Window-system collaborator: creates surfaces and pumps their events.
pub trait Backend {
    type Surface: Surface + 'static;

    fn create_surface(&mut self, config: &SurfaceConfig) -> Result<Self::Surface>;

    /// Processes pending window-system events for `surface`. Called once per frame.
    fn dispatch_events(&mut self, surface: &mut Self::Surface) -> Result<DispatchOutcome>;
}
