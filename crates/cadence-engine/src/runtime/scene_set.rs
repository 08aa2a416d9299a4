use std::collections::HashSet;
use std::fmt;

use crate::core::Scene;
use crate::scene::SceneWorld;

/// Handle of a scene owned by a runtime. Never reused.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SceneId(u64);

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scene#{}", self.0)
    }
}

/// User scene logic paired with the entities it owns.
pub(crate) struct SceneBody {
    pub scene: Box<dyn Scene>,
    pub world: SceneWorld,
}

pub(crate) struct SceneEntry {
    pub id: SceneId,
    /// `None` while the scene's hooks run.
    pub body: Option<SceneBody>,
}

/// Ordered scene sequence plus buffered structural changes.
///
/// Index 0 is the drawn scene. Every change requested while `in_pass` is set
/// waits for [`apply_pending`](Self::apply_pending).
#[derive(Default)]
pub(crate) struct SceneSet {
    pub live: Vec<SceneEntry>,
    pending_add: Vec<SceneEntry>,
    pending_remove: HashSet<SceneId>,
    pending_drawn: Vec<SceneId>,
    next_id: u64,
    pub in_pass: bool,
}

impl SceneSet {
    pub fn instantiate(&mut self, scene: Box<dyn Scene>) -> SceneId {
        let id = SceneId(self.next_id);
        self.next_id += 1;
        self.pending_add.push(SceneEntry {
            id,
            body: Some(SceneBody {
                scene,
                world: SceneWorld::new(),
            }),
        });
        log::debug!("{id} queued");
        id
    }

    pub fn destroy(&mut self, id: SceneId) {
        if !self.contains(id) {
            log::trace!("destroy of {id} ignored: not live");
            return;
        }
        self.pending_remove.insert(id);
    }

    /// Marks a live scene for removal at the next lifecycle point.
    pub fn retire(&mut self, id: SceneId) {
        self.pending_remove.insert(id);
    }

    /// Swaps `id` to the front now, or at the next lifecycle point when a
    /// pass is running or `id` is still waiting to be admitted.
    ///
    /// Buffered swaps are replayed in request order.
    pub fn set_drawn(&mut self, id: SceneId) {
        let waiting = self.pending_add.iter().any(|e| e.id == id);
        if self.in_pass || waiting || !self.pending_drawn.is_empty() {
            self.pending_drawn.push(id);
        } else {
            self.swap_to_front(id);
        }
    }

    pub fn contains(&self, id: SceneId) -> bool {
        self.position(id).is_some()
    }

    pub fn position(&self, id: SceneId) -> Option<usize> {
        self.live.iter().position(|e| e.id == id)
    }

    pub fn body(&self, id: SceneId) -> Option<&SceneBody> {
        self.live.iter().find(|e| e.id == id)?.body.as_ref()
    }

    pub fn body_mut(&mut self, id: SceneId) -> Option<&mut SceneBody> {
        self.live.iter_mut().find(|e| e.id == id)?.body.as_mut()
    }

    /// Scenes whose body is not checked out, in sequence order.
    pub fn present(&self) -> impl Iterator<Item = (SceneId, &SceneBody)> + '_ {
        self.live
            .iter()
            .filter_map(|e| e.body.as_ref().map(|b| (e.id, b)))
    }

    /// Lifecycle point: removals, then additions, then the drawn-scene swap.
    pub fn apply_pending(&mut self) {
        if !self.pending_remove.is_empty() {
            let removed = std::mem::take(&mut self.pending_remove);
            self.live.retain(|e| {
                let keep = !removed.contains(&e.id);
                if !keep {
                    log::debug!("{} removed", e.id);
                }
                keep
            });
        }

        for entry in self.pending_add.drain(..) {
            log::debug!("{} admitted", entry.id);
            self.live.push(entry);
        }

        for id in std::mem::take(&mut self.pending_drawn) {
            self.swap_to_front(id);
        }
    }

    /// Single swap with index 0; the order of other scenes is kept.
    fn swap_to_front(&mut self, id: SceneId) {
        match self.position(id) {
            Some(pos) => self.live.swap(0, pos),
            None => log::trace!("set_drawn of {id} ignored: not live"),
        }
    }
}
