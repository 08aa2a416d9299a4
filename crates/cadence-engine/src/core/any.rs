use std::any::Any;

/// Upcast helper for the engine's trait objects.
///
/// Implemented for every `'static` type, so user entities, scenes and asset
/// providers never write it by hand. Call it on the trait object
/// (`&dyn Entity`), not on a `Box`, or the box itself is what gets upcast.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
