use crate::display::DisplayRequirements;
use crate::runtime::RuntimeCtx;
use crate::scene::SceneWorld;

use super::AsAny;

/// Scene-level logic, implemented by game code.
///
/// The runtime pairs every scene with a [`SceneWorld`] holding its entities.
/// Scene hooks run before the hooks of the scene's entities.
pub trait Scene: AsAny {
    /// Per-frame scene logic: input handling, win conditions, spawning.
    fn update_frame(&mut self, dt: f32, world: &mut SceneWorld, runtime: &mut RuntimeCtx);

    /// Fixed-rate scene logic.
    fn update_fixed(&mut self, dt: f32, world: &mut SceneWorld, runtime: &mut RuntimeCtx);

    /// Surface configuration used while this scene is drawn.
    fn display(&self) -> &DisplayRequirements;

    /// Checked after every pass; once `true` the scene is removed at the end
    /// of that pass.
    fn to_destroy(&self) -> bool {
        false
    }
}

impl dyn Scene + '_ {
    pub fn downcast_ref<T: Scene>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Scene>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    pub fn is<T: Scene>(&self) -> bool {
        self.as_any().is::<T>()
    }
}
