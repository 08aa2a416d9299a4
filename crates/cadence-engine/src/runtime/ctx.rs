use std::fmt;

use crate::core::Scene;
use crate::scene::SceneWorld;
use crate::time::Rates;

use super::scene_set::SceneSet;
use super::SceneId;

#[derive(Copy, Clone)]
pub(crate) enum Pass {
    Frame,
    Fixed,
}

/// Runtime state reachable from scene hooks.
///
/// Owns the scene sequence, the rates and the running flag. The scene whose
/// hook is running is checked out and invisible to the queries below.
pub struct RuntimeCtx {
    pub(crate) scenes: SceneSet,
    pub(crate) rates: Rates,
    running: bool,
    current: Option<SceneId>,
    unload_requested: bool,
}

impl RuntimeCtx {
    pub(crate) fn new(rates: Rates) -> Self {
        Self {
            scenes: SceneSet::default(),
            rates,
            running: true,
            current: None,
            unload_requested: false,
        }
    }

    // ── scene admission ───────────────────────────────────────────────────

    /// Queues `scene` for addition at the next lifecycle point.
    pub fn instantiate<S: Scene>(&mut self, scene: S) -> SceneId {
        self.scenes.instantiate(Box::new(scene))
    }

    /// Boxed variant of [`instantiate`](Self::instantiate).
    pub fn instantiate_boxed(&mut self, scene: Box<dyn Scene>) -> SceneId {
        self.scenes.instantiate(scene)
    }

    /// Queues removal of a live scene. Unknown handles are ignored.
    pub fn destroy(&mut self, id: SceneId) {
        self.scenes.destroy(id);
    }

    /// Swaps `id` into the drawn slot (index 0).
    ///
    /// Applied at once outside a pass. During a pass, or while `id` is still
    /// queued for addition, it waits for the lifecycle point, after removals
    /// and additions. Several requests are applied in order.
    pub fn set_drawn(&mut self, id: SceneId) {
        self.scenes.set_drawn(id);
    }

    // ── queries ───────────────────────────────────────────────────────────

    /// Number of live scenes.
    pub fn scene_count(&self) -> usize {
        self.scenes.live.len()
    }

    /// Whether `id` is live.
    pub fn contains(&self, id: SceneId) -> bool {
        self.scenes.contains(id)
    }

    /// Live scene handles in sequence order; the first is drawn.
    pub fn scene_ids(&self) -> impl Iterator<Item = SceneId> + '_ {
        self.scenes.live.iter().map(|e| e.id)
    }

    /// The scene drawn next frame.
    pub fn drawn_scene(&self) -> Option<SceneId> {
        self.scenes.live.first().map(|e| e.id)
    }

    /// The scene whose hook is running, if any.
    pub fn current_scene(&self) -> Option<SceneId> {
        self.current
    }

    pub fn scene<T: Scene>(&self, id: SceneId) -> Option<&T> {
        self.scenes.body(id)?.scene.downcast_ref::<T>()
    }

    pub fn scene_mut<T: Scene>(&mut self, id: SceneId) -> Option<&mut T> {
        self.scenes.body_mut(id)?.scene.downcast_mut::<T>()
    }

    /// Entities of a scene.
    pub fn world(&self, id: SceneId) -> Option<&SceneWorld> {
        self.scenes.body(id).map(|b| &b.world)
    }

    pub fn world_mut(&mut self, id: SceneId) -> Option<&mut SceneWorld> {
        self.scenes.body_mut(id).map(|b| &mut b.world)
    }

    /// Every live scene whose concrete type is exactly `T`, in sequence order.
    pub fn scenes_of_type<T: Scene>(&self) -> impl Iterator<Item = (SceneId, &T)> + '_ {
        self.scenes
            .present()
            .filter_map(|(id, b)| b.scene.downcast_ref::<T>().map(|s| (id, s)))
    }

    // ── rates ─────────────────────────────────────────────────────────────

    /// Frame-rate cap in Hz. `0` uncaps the frame phase.
    pub fn set_update_rate(&mut self, hz: f32) {
        self.rates.set_update_rate(hz);
    }

    /// Fixed update rate in Hz. `0` disables fixed updates.
    pub fn set_fixed_update_rate(&mut self, hz: f32) {
        self.rates.set_fixed_update_rate(hz);
    }

    pub fn set_fluctuation_tolerance(&mut self, tolerance: f32) {
        self.rates.set_fluctuation_tolerance(tolerance);
    }

    pub fn update_rate(&self) -> f32 {
        self.rates.update_rate()
    }

    pub fn fixed_update_rate(&self) -> f32 {
        self.rates.fixed_update_rate()
    }

    pub fn fluctuation_tolerance(&self) -> f32 {
        self.rates.fluctuation_tolerance()
    }

    pub fn rates(&self) -> &Rates {
        &self.rates
    }

    // ── control ───────────────────────────────────────────────────────────

    /// Ends the loop at the next iteration boundary.
    pub fn stop(&mut self) {
        if self.running {
            log::debug!("stop requested");
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Unloads every asset at the next lifecycle point.
    pub fn request_asset_unload(&mut self) {
        self.unload_requested = true;
    }

    pub(crate) fn take_unload_request(&mut self) -> bool {
        std::mem::take(&mut self.unload_requested)
    }

    // ── passes ────────────────────────────────────────────────────────────

    /// Runs one pass over every live scene, then the lifecycle point.
    ///
    /// Per scene: the scene hook, then its entities, then the `to_destroy` check.
    pub(crate) fn run_pass(&mut self, dt: f32, pass: Pass) {
        self.scenes.in_pass = true;

        let mut i = 0;
        while i < self.scenes.live.len() {
            let id = self.scenes.live[i].id;
            let Some(mut body) = self.scenes.live[i].body.take() else {
                i += 1;
                continue;
            };

            self.current = Some(id);
            match pass {
                Pass::Frame => {
                    body.scene.update_frame(dt, &mut body.world, self);
                    body.world.update_frame(dt);
                }
                Pass::Fixed => {
                    body.scene.update_fixed(dt, &mut body.world, self);
                    body.world.update_fixed(dt);
                }
            }

            if body.scene.to_destroy() {
                self.scenes.retire(id);
            }

            // The sequence only changes at the lifecycle point, so `i` still addresses `id`.
            self.scenes.live[i].body = Some(body);
            i += 1;
        }

        self.current = None;
        self.scenes.in_pass = false;
        self.scenes.apply_pending();
    }
}

impl fmt::Debug for RuntimeCtx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeCtx")
            .field("scenes", &self.scene_ids().collect::<Vec<_>>())
            .field("rates", &self.rates)
            .field("running", &self.running)
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}
