//! Asset provider contract.
//!
//! The runtime owns one provider and threads it into every draw call. The
//! engine itself never loads anything; it only requires that the provider can
//! drop everything it holds and return to an empty baseline.

use std::any::Any;
use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::core::AsAny;

/// Injected capability holding textures, sounds or any other cached resource.
pub trait AssetProvider: AsAny {
    /// Drops every held asset, leaving the provider empty.
    fn unload_all(&mut self);
}

impl dyn AssetProvider + '_ {
    /// Borrows the concrete provider, if it is a `T`.
    pub fn downcast_ref<T: AssetProvider>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Mutably borrows the concrete provider, if it is a `T`.
    pub fn downcast_mut<T: AssetProvider>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

/// Provider for games without assets.
#[derive(Debug, Default, Copy, Clone)]
pub struct NoAssets;

impl AssetProvider for NoAssets {
    fn unload_all(&mut self) {}
}

/// Provider wrapping any state type, reset through a factory on unload.
///
/// The factory is supplied at construction and produces the empty baseline,
/// both initially and after every `unload_all`.
///
/// ```rust,ignore
/// let assets = ResettableAssets::new(TextureCache::default);
/// ```
pub struct ResettableAssets<T> {
    state: T,
    factory: Box<dyn Fn() -> T>,
    unloads: u64,
}

impl<T: 'static> ResettableAssets<T> {
    pub fn new(factory: impl Fn() -> T + 'static) -> Self {
        Self {
            state: factory(),
            factory: Box::new(factory),
            unloads: 0,
        }
    }

    /// How many times the state was reset.
    pub fn unloads(&self) -> u64 {
        self.unloads
    }
}

impl<T> Deref for ResettableAssets<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.state
    }
}

impl<T> DerefMut for ResettableAssets<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.state
    }
}

impl<T: fmt::Debug> fmt::Debug for ResettableAssets<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResettableAssets")
            .field("state", &self.state)
            .field("unloads", &self.unloads)
            .finish_non_exhaustive()
    }
}

impl<T: Any> AssetProvider for ResettableAssets<T> {
    fn unload_all(&mut self) {
        self.state = (self.factory)();
        self.unloads += 1;
        log::debug!("assets unloaded ({} total)", self.unloads);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    type Cache = HashMap<String, Vec<u8>>;

    #[test]
    fn unload_restores_factory_state() {
        let mut assets = ResettableAssets::new(Cache::new);
        assets.insert("player.png".into(), vec![1, 2, 3]);
        assert_eq!(assets.len(), 1);

        assets.unload_all();
        assert!(assets.is_empty());
        assert_eq!(assets.unloads(), 1);
    }

    #[test]
    fn factory_baseline_can_be_non_empty() {
        let mut assets = ResettableAssets::new(|| vec!["fallback"]);
        assets.push("extra");
        assets.unload_all();
        assert_eq!(*assets, vec!["fallback"]);
    }

    #[test]
    fn dyn_provider_downcasts_to_concrete_type() {
        let mut boxed: Box<dyn AssetProvider> = Box::new(ResettableAssets::new(Cache::new));
        assert!(boxed.downcast_ref::<NoAssets>().is_none());

        let cache = boxed
            .downcast_mut::<ResettableAssets<Cache>>()
            .expect("concrete provider");
        cache.insert("a".into(), Vec::new());

        boxed.unload_all();
        let cache = boxed.downcast_ref::<ResettableAssets<Cache>>().unwrap();
        assert!(cache.is_empty());
    }
}
