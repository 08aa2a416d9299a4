//! Geometry and color types shared by scenes, the display layer and backends.
//!
//! Scene space:
//! - units chosen by the scene through its view (usually pixels of the design resolution)
//! - origin top-left, +X right, +Y down
//!
//! Surface pixels are mapped to scene space through `display::View`.

mod color;
mod rect;
mod vec2;

pub use color::ColorRgba;
pub use rect::Rect;
pub use vec2::{PixelSize, Vec2};
