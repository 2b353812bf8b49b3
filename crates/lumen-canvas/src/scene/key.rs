use core::cmp::Ordering;

use super::ZIndex;

/// Paint-order key for canvas nodes.
///
/// Ordering rules:
/// 1) `z`: resolved global z-index, ascending (back-to-front)
/// 2) `order`: creation order for equal z
///
/// Handles are allocated monotonically, so the raw handle value doubles as the
/// creation order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SortKey {
    pub z: ZIndex,
    pub order: u64,
}

impl SortKey {
    #[inline]
    pub const fn new(z: ZIndex, order: u64) -> Self {
        Self { z, order }
    }
}

impl Ord for SortKey {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        match self.z.cmp(&other.z) {
            Ordering::Equal => self.order.cmp(&other.order),
            o => o,
        }
    }
}

impl PartialOrd for SortKey {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
