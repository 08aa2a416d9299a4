//! Core engine-facing contracts.
//!
//! This module defines the interface between the engine and game code:
//! `Entity` and `Scene` are implemented by the game, everything else in the
//! crate drives them. Engine internals are never reachable through these traits.

mod any;
mod entity;
mod scene;

pub use any::AsAny;
pub use entity::Entity;
pub use scene::Scene;
