use std::collections::HashMap;

use super::{Handle, HandleAllocator};

/// Handle → resource map; the single owner of each resource's lifetime.
///
/// A registry only recognizes handles it inserted itself. All lookups are
/// O(1) and return `None` for unknown or released handles.
#[derive(Debug)]
pub struct Registry<T> {
    entries: HashMap<Handle, T>,
}

impl<T> Registry<T> {
    pub fn new() -> Self {
        Self { entries: HashMap::new() }
    }

    /// Allocates a fresh handle from `allocator` and stores `value` under it.
    pub fn create(&mut self, allocator: &mut HandleAllocator, value: T) -> Handle {
        let handle = allocator.allocate();
        self.entries.insert(handle, value);
        handle
    }

    #[inline]
    pub fn resolve(&self, handle: Handle) -> Option<&T> {
        self.entries.get(&handle)
    }

    #[inline]
    pub fn resolve_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.entries.get_mut(&handle)
    }

    /// Removes the entry and hands it back for finalization.
    ///
    /// Releasing an unknown handle returns `None` and changes nothing.
    pub fn release(&mut self, handle: Handle) -> Option<T> {
        self.entries.remove(&handle)
    }

    #[inline]
    pub fn exists(&self, handle: Handle) -> bool {
        self.entries.contains_key(&handle)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Unordered iteration over live entries.
    pub fn iter(&self) -> impl Iterator<Item = (Handle, &T)> {
        self.entries.iter().map(|(&h, v)| (h, v))
    }

    /// Removes every entry, yielding them for finalization.
    pub fn drain(&mut self) -> impl Iterator<Item = (Handle, T)> + '_ {
        self.entries.drain()
    }
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_after_create_returns_value() {
        let mut alloc = HandleAllocator::new();
        let mut reg = Registry::new();
        let h = reg.create(&mut alloc, "a");
        assert!(h.is_valid());
        assert_eq!(reg.resolve(h), Some(&"a"));
        assert!(reg.exists(h));
    }

    #[test]
    fn release_is_idempotent() {
        let mut alloc = HandleAllocator::new();
        let mut reg = Registry::new();
        let h = reg.create(&mut alloc, 7);
        assert_eq!(reg.release(h), Some(7));
        assert_eq!(reg.resolve(h), None);
        assert_eq!(reg.release(h), None);
        assert!(reg.is_empty());
    }

    #[test]
    fn shared_allocator_keeps_handles_disjoint() {
        let mut alloc = HandleAllocator::new();
        let mut textures: Registry<&str> = Registry::new();
        let mut nodes: Registry<u32> = Registry::new();

        let t = textures.create(&mut alloc, "tex");
        let n = nodes.create(&mut alloc, 1);

        assert!(n > t);
        assert!(nodes.resolve(t).is_none());
        assert!(textures.resolve(n).is_none());
    }

    #[test]
    fn invalid_handle_never_resolves() {
        let mut alloc = HandleAllocator::new();
        let mut reg = Registry::new();
        reg.create(&mut alloc, ());
        assert!(!reg.exists(Handle::INVALID));
        assert_eq!(alloc.allocated(), 1);
    }
}
