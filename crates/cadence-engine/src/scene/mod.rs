//! Entity storage of a scene.
//!
//! Responsibilities:
//! - hold the live entity sequence and buffer structural changes
//! - run entity hooks with deferred add/remove semantics
//! - deterministic paint order (draw layer + sequence position)

mod draw_order;
mod key;
mod world;

pub use draw_order::DrawOrder;
pub use world::{EntityId, SceneWorld};
