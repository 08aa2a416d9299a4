/// Draw layer of an entity.
///
/// Lower values are drawn first (below); higher values are drawn later (on top).
/// Entities sharing a layer are drawn in the order they joined the scene.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct DrawOrder(pub i32);

impl DrawOrder {
    #[inline]
    pub const fn new(v: i32) -> Self {
        Self(v)
    }

    /// The layer directly above this one.
    #[inline]
    pub const fn above(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// The layer directly below this one.
    #[inline]
    pub const fn below(self) -> Self {
        Self(self.0.saturating_sub(1))
    }
}

impl From<i32> for DrawOrder {
    #[inline]
    fn from(v: i32) -> Self {
        Self(v)
    }
}
