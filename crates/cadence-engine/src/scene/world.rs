use std::collections::HashSet;
use std::fmt;

use crate::asset::AssetProvider;
use crate::backend::Surface;
use crate::coords::Vec2;
use crate::core::Entity;

use super::key::SortKey;

/// Handle of an entity within its [`SceneWorld`].
///
/// Handles are never reused by a world, so a stale handle simply stops
/// matching anything.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct EntityId(u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity#{}", self.0)
    }
}

struct Slot {
    id: EntityId,
    /// `None` while the entity's own hook is running.
    entity: Option<Box<dyn Entity>>,
}

#[derive(Copy, Clone)]
enum Pass {
    Frame,
    Fixed,
}

/// The entities of one scene plus their pending structural changes.
///
/// Game code only ever buffers changes (`instantiate`, `destroy`); the owning
/// scene applies them once the pass that produced them has finished, so the
/// live sequence never changes under an iteration.
///
/// Performance characteristics:
/// - `instantiate()` / `destroy()` are O(1)
/// - paint order reuses an internal index buffer; no per-frame allocation once warmed
#[derive(Default)]
pub struct SceneWorld {
    live: Vec<Slot>,
    pending_add: Vec<Slot>,
    pending_remove: HashSet<EntityId>,
    next_id: u64,

    pointer: Vec2,
    paint_order: Vec<usize>,
}

impl SceneWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `entity` for addition and returns its handle.
    ///
    /// The entity joins the live sequence (and starts receiving hooks) after
    /// the current pass.
    pub fn instantiate<E: Entity>(&mut self, entity: E) -> EntityId {
        self.instantiate_boxed(Box::new(entity))
    }

    /// Boxed variant of [`instantiate`](Self::instantiate).
    pub fn instantiate_boxed(&mut self, entity: Box<dyn Entity>) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.pending_add.push(Slot {
            id,
            entity: Some(entity),
        });
        id
    }

    /// Queues removal of a live entity. Unknown handles are ignored.
    pub fn destroy(&mut self, id: EntityId) {
        if !self.live.iter().any(|s| s.id == id) {
            log::trace!("destroy of {id} ignored: not live");
            return;
        }
        self.pending_remove.insert(id);
    }

    /// Number of live entities.
    #[inline]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Whether `id` is live (admitted and not yet removed).
    pub fn contains(&self, id: EntityId) -> bool {
        self.live.iter().any(|s| s.id == id)
    }

    /// Whether `id` waits for the next lifecycle point to join.
    pub fn is_pending(&self, id: EntityId) -> bool {
        self.pending_add.iter().any(|s| s.id == id)
    }

    /// Live handles in sequence (insertion) order.
    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.live.iter().map(|s| s.id)
    }

    /// Borrows a live entity as its concrete type.
    pub fn entity<T: Entity>(&self, id: EntityId) -> Option<&T> {
        self.live
            .iter()
            .find(|s| s.id == id)?
            .entity
            .as_deref()?
            .downcast_ref::<T>()
    }

    /// Mutably borrows a live entity as its concrete type.
    pub fn entity_mut<T: Entity>(&mut self, id: EntityId) -> Option<&mut T> {
        self.live
            .iter_mut()
            .find(|s| s.id == id)?
            .entity
            .as_deref_mut()?
            .downcast_mut::<T>()
    }

    /// Every live entity whose concrete type is exactly `T`, in sequence order.
    ///
    /// Only matches the concrete type. To find entities by what they can do,
    /// for example everything implementing a trait, use
    /// [`entities_where`](Self::entities_where).
    pub fn entities_of_type<T: Entity>(&self) -> impl Iterator<Item = (EntityId, &T)> + '_ {
        self.present()
            .filter_map(|(id, e)| e.downcast_ref::<T>().map(|t| (id, t)))
    }

    /// Every live entity for which `cast` succeeds, in sequence order.
    ///
    /// This is the capability query: `cast` usually views the entity through a
    /// trait the caller cares about.
    ///
    /// ```rust,ignore
    /// let hittable = world.entities_where(|e| e.downcast_ref::<Crate>().map(|c| c as &dyn Hittable));
    /// ```
    pub fn entities_where<'a, T, F>(&'a self, cast: F) -> impl Iterator<Item = (EntityId, &'a T)> + 'a
    where
        T: ?Sized + 'a,
        F: Fn(&'a (dyn Entity + 'static)) -> Option<&'a T> + 'a,
    {
        self.present().filter_map(move |(id, e)| cast(e).map(|t| (id, t)))
    }

    /// Pointer position in scene coordinates as of the last draw.
    #[inline]
    pub fn pointer_position(&self) -> Vec2 {
        self.pointer
    }

    // ── engine-side passes ────────────────────────────────────────────────

    pub(crate) fn update_frame(&mut self, dt: f32) {
        self.run_pass(dt, Pass::Frame);
    }

    pub(crate) fn update_fixed(&mut self, dt: f32) {
        self.run_pass(dt, Pass::Fixed);
    }

    /// Folds buffered changes into the live sequence: `(live \ removed) ∪ added`.
    pub(crate) fn apply_pending(&mut self) {
        if !self.pending_remove.is_empty() {
            let removed = std::mem::take(&mut self.pending_remove);
            self.live.retain(|s| !removed.contains(&s.id));
            log::trace!("removed {} entities", removed.len());
        }
        self.live.append(&mut self.pending_add);
    }

    /// Draws live entities back-to-front and refreshes the pointer position.
    pub(crate) fn draw(&mut self, surface: &mut dyn Surface, assets: &mut dyn AssetProvider) {
        if let Some(pixel) = surface.pointer_pixel() {
            self.pointer = surface.map_pixel_to_coords(pixel);
        }

        self.rebuild_paint_order();

        for &i in &self.paint_order {
            if let Some(entity) = self.live[i].entity.as_deref() {
                entity.draw(surface, assets);
            }
        }
    }

    fn run_pass(&mut self, dt: f32, pass: Pass) {
        let mut i = 0;
        while i < self.live.len() {
            // Check the entity out so its hook can borrow the world.
            let Some(mut entity) = self.live[i].entity.take() else {
                i += 1;
                continue;
            };

            match pass {
                Pass::Frame => entity.update_frame(dt, self),
                Pass::Fixed => entity.update_fixed(dt, self),
            }

            // Hooks only buffer structural changes, so `i` still addresses the same slot.
            if entity.to_destroy() {
                let slot = self.live.remove(i);
                log::trace!("{} destroyed itself", slot.id);
                continue;
            }

            self.live[i].entity = Some(entity);
            i += 1;
        }

        self.apply_pending();
    }

    fn rebuild_paint_order(&mut self) {
        self.paint_order.clear();
        self.paint_order.extend(0..self.live.len());

        let live = &self.live;
        self.paint_order.sort_unstable_by_key(|&i| {
            let layer = live[i]
                .entity
                .as_deref()
                .map(|e| e.draw_order())
                .unwrap_or_default();
            SortKey::new(layer, i as u32)
        });
    }

    fn present(&self) -> impl Iterator<Item = (EntityId, &(dyn Entity + 'static))> + '_ {
        self.live
            .iter()
            .filter_map(|s| s.entity.as_deref().map(|e| (s.id, e)))
    }
}

impl fmt::Debug for SceneWorld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneWorld")
            .field("live", &self.live.iter().map(|s| s.id).collect::<Vec<_>>())
            .field("pending_add", &self.pending_add.len())
            .field("pending_remove", &self.pending_remove.len())
            .field("pointer", &self.pointer)
            .finish()
    }
}
