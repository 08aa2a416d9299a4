//! Display requirements and surface reconciliation.
//!
//! A scene declares `DisplayRequirements`; once per frame the runtime makes
//! the render surface match the requirements of the drawn scene:
//! - recreate the surface only when needed (first frame, fullscreen switch,
//!   fullscreen resolution change)
//! - force size and title
//! - compute and apply the `View` (letterboxed unless stretched)

mod reconcile;
mod requirements;
mod view;

pub use reconcile::{reconcile, surface_config, SurfaceCache};
pub use requirements::DisplayRequirements;
pub use view::{letterbox, View};
