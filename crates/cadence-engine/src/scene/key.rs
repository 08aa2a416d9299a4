use core::cmp::Ordering;

use super::DrawOrder;

/// Paint-order key for one entity of a draw pass.
///
/// Ordering rules:
/// 1) `layer`: ascending (back-to-front)
/// 2) `seq`: ascending (position in the live sequence, for equal layers)
///
/// Because `seq` is unique within a pass, any sort over these keys yields the
/// same result as a stable sort by layer alone.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub(crate) struct SortKey {
    pub layer: DrawOrder,
    pub seq: u32,
}

impl SortKey {
    #[inline]
    pub const fn new(layer: DrawOrder, seq: u32) -> Self {
        Self { layer, seq }
    }
}

impl Ord for SortKey {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.layer
            .cmp(&other.layer)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for SortKey {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
