//! GPU rendering for the window backend.
//!
//! Convention:
//! - CPU geometry is in scene coordinates (top-left origin, +Y down).
//! - The vertex shader maps scene space to NDC through a view uniform
//!   (center + half size); the letterbox is applied as the pass viewport.

mod ctx;
mod rect;

pub use ctx::{RenderCtx, RenderTarget};
pub use rect::RectRenderer;
