use crate::asset::AssetProvider;
use crate::backend::Surface;
use crate::scene::{DrawOrder, SceneWorld};

use super::AsAny;

/// Smallest simulated unit, implemented by game code.
///
/// An entity lives in exactly one [`SceneWorld`]. While one of its hooks runs
/// it is checked out of the world, so queries made through `scene` from inside
/// the hook do not see it.
pub trait Entity: AsAny {
    /// Called once per frame, before drawing.
    ///
    /// Use it for per-frame calculations (animation, positions). Do not play
    /// sounds here: every scene is updated, including scenes that are not drawn.
    fn update_frame(&mut self, dt: f32, scene: &mut SceneWorld);

    /// Called at the fixed rate. Use it for physics and collisions.
    ///
    /// `dt` stays close to the fixed interval; it never exceeds the interval
    /// scaled by the runtime's fluctuation tolerance.
    fn update_fixed(&mut self, dt: f32, scene: &mut SceneWorld);

    /// Draws the entity. Only called for entities of the drawn scene.
    fn draw(&self, surface: &mut dyn Surface, assets: &mut dyn AssetProvider);

    /// Checked after each hook; once `true` the entity is removed from its
    /// world during the same pass.
    fn to_destroy(&self) -> bool {
        false
    }

    /// Layer the entity is drawn on. Higher values are drawn later (on top).
    fn draw_order(&self) -> DrawOrder {
        DrawOrder::default()
    }
}

impl dyn Entity + '_ {
    pub fn downcast_ref<T: Entity>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Entity>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    pub fn is<T: Entity>(&self) -> bool {
        self.as_any().is::<T>()
    }
}
