//! Cadence engine crate.
//!
//! A small real-time simulation engine: a dual-clock runtime (variable-rate
//! frames, fixed-rate physics) driving scenes of user-defined entities, and
//! drawing the first scene through a pluggable backend.
//!
//! Layers, leaves first:
//! - `coords`, `time`: plain value types
//! - `core`: the `Entity` / `Scene` traits implemented by game code
//! - `scene`: entity storage with deferred add/remove and paint order
//! - `display`, `backend`, `asset`: collaborators of the runtime
//! - `runtime`: the loop
//! - `device`, `render`, `window`: the winit + wgpu backend

pub mod asset;
pub mod backend;
pub mod coords;
pub mod core;
pub mod display;
pub mod logging;
pub mod runtime;
pub mod scene;
pub mod time;

pub mod device;
pub mod render;
pub mod window;

pub use crate::asset::{AssetProvider, NoAssets, ResettableAssets};
pub use crate::backend::{Backend, HeadlessBackend, Surface};
pub use crate::core::{Entity, Scene};
pub use crate::display::DisplayRequirements;
pub use crate::runtime::{Runtime, RuntimeConfig, RuntimeCtx, SceneId};
pub use crate::scene::{DrawOrder, EntityId, SceneWorld};
