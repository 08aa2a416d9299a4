use crate::coords::{PixelSize, Rect, Vec2};

use super::DisplayRequirements;

/// Camera applied to a surface: which part of the scene is visible and where
/// on the surface it lands.
///
/// `viewport` is normalized to the surface (`Rect::unit()` = whole surface).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct View {
    pub center: Vec2,
    pub size: Vec2,
    pub viewport: Rect,
}

impl View {
    /// A view showing `size` scene units around `center` over the whole surface.
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            size,
            viewport: Rect::unit(),
        }
    }

    /// Computes the view for `req` on a surface of `surface` pixels.
    ///
    /// Unless the requirements ask for stretching, the viewport keeps the
    /// view's aspect ratio and centers it with bars on the remaining sides.
    pub fn for_requirements(req: &DisplayRequirements, surface: PixelSize) -> Self {
        let mut view = Self::new(req.view_center, req.view_size);
        if !req.stretched {
            view.viewport = letterbox(req.view_size, surface);
        }
        view
    }

    /// Scene-space rectangle covered by the view.
    #[inline]
    pub fn visible_area(&self) -> Rect {
        Rect::from_center_size(self.center, self.size)
    }

    /// Viewport in surface pixels.
    #[inline]
    pub fn viewport_pixels(&self, surface: PixelSize) -> Rect {
        self.viewport.scaled(surface.as_vec2())
    }

    /// Maps a surface pixel to scene coordinates.
    ///
    /// Pixels outside the viewport map outside the visible area; a degenerate
    /// viewport maps everything to the view center.
    pub fn map_pixel_to_coords(&self, pixel: Vec2, surface: PixelSize) -> Vec2 {
        let vp = self.viewport_pixels(surface);
        if vp.is_empty() {
            return self.center;
        }
        let t = Vec2::new(
            (pixel.x - vp.origin.x) / vp.size.x,
            (pixel.y - vp.origin.y) / vp.size.y,
        );
        let area = self.visible_area();
        Vec2::new(
            area.origin.x + t.x * area.size.x,
            area.origin.y + t.y * area.size.y,
        )
    }
}

impl Default for View {
    fn default() -> Self {
        let req = DisplayRequirements::default();
        Self::new(req.view_center, req.view_size)
    }
}

/// Normalized viewport that fits `view_size` into `surface` without distortion.
///
/// Falls back to the full surface when either aspect ratio is not finite
/// (zero-sized view).
pub fn letterbox(view_size: Vec2, surface: PixelSize) -> Rect {
    let ratio = view_size.aspect() / surface.as_vec2().aspect();
    if !ratio.is_finite() || ratio <= 0.0 {
        return Rect::unit();
    }

    let left = ((1.0 - ratio) / 2.0).max(0.0);
    let width = ratio.min(1.0);
    let top = ((1.0 - 1.0 / ratio) / 2.0).max(0.0);
    let height = (1.0 / ratio).min(1.0);

    Rect::new(left, top, width, height)
}
