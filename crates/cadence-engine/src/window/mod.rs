//! Window backend.
//!
//! Owns the `winit` EventLoop and one Window at a time, presents through the
//! GPU layer and pumps events once per frame so the runtime keeps control of
//! the loop.

mod backend;
mod events;

pub use backend::{WinitBackend, WinitSurface};
