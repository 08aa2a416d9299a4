//! Window-system abstraction.
//!
//! The runtime only talks to `Backend` and `Surface`. Two implementations ship:
//! - `HeadlessBackend`: records operations, no window (tests, servers, CI)
//! - `window::WinitBackend`: a real window presented through wgpu

mod headless;
mod surface;

pub use headless::{HeadlessBackend, HeadlessSurface, SurfaceOp};
pub use surface::{Backend, DispatchOutcome, Surface, SurfaceConfig, SurfaceStyle};
