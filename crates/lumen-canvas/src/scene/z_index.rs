use core::cmp::Ordering;
use core::ops::Add;

/// Z-ordering value of a canvas node.
///
/// Higher values are drawn on top of lower values. A node's *local* z-index is
/// what callers set; its *global* z-index is the resolved sort key (see
/// [`CanvasScene::canvas_item_get_global_zindex`](super::CanvasScene::canvas_item_get_global_zindex)).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct ZIndex(pub i32);

impl ZIndex {
    #[inline]
    pub const fn new(v: i32) -> Self {
        Self(v)
    }

    #[inline]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl Add for ZIndex {
    type Output = ZIndex;

    /// Saturates instead of wrapping so deep relative chains stay ordered.
    #[inline]
    fn add(self, rhs: ZIndex) -> ZIndex {
        ZIndex(self.0.saturating_add(rhs.0))
    }
}

impl Ord for ZIndex {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl PartialOrd for ZIndex {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
