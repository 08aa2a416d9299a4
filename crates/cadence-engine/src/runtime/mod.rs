//! Dual-clock runtime.
//!
//! Owns the scene sequence and drives it:
//! - frame phase: update every scene, then draw the first one
//! - fixed phase: fixed update of every scene with a clamped delta
//!
//! Structural changes requested during a pass are applied at the lifecycle
//! point that ends the pass.

mod config;
mod ctx;
mod runtime;
mod scene_set;

pub use config::RuntimeConfig;
pub use ctx::RuntimeCtx;
pub use runtime::Runtime;
pub use scene_set::SceneId;
