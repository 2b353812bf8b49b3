use core::fmt;

/// Opaque identifier of a registry-owned resource (texture or canvas node).
///
/// Handles come from a single [`HandleAllocator`] shared by every registry, so
/// a texture handle can never name a canvas node and vice versa. Values are
/// never reused, which is what lets parent links and draw primitives hold a
/// handle as a weak reference.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Handle(u64);

impl Handle {
    /// Reserved value; never allocated.
    pub const INVALID: Handle = Handle(0);

    #[inline]
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({})", self.0)
    }
}

/// Monotonic handle source.
#[derive(Debug)]
pub struct HandleAllocator {
    next: u64,
}

impl HandleAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Returns a handle strictly greater than every handle returned before.
    pub fn allocate(&mut self) -> Handle {
        let handle = Handle(self.next);
        self.next += 1;
        handle
    }

    /// Number of handles handed out so far.
    pub fn allocated(&self) -> u64 {
        self.next - 1
    }
}

impl Default for HandleAllocator {
    fn default() -> Self {
        Self::new()
    }
}
