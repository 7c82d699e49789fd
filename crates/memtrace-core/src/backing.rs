//! Backing allocator seam.
//!
//! The tracker only tracks; acquiring and returning the actual memory goes
//! through this trait. The real implementation lives at the ABI boundary
//! (`memtrace-abi`); this crate ships a deterministic in-process model for
//! tests and benchmarks.

use crate::addr::AllocAddr;

/// Source of the memory the tracker tracks.
///
/// Implementations must hand out addresses that are unique among
/// simultaneously live allocations; the registry relies on that.
pub trait BackingAllocator {
    /// Returns the address of a fresh allocation of `size` bytes, or `None`
    /// when the request cannot be satisfied.
    fn allocate(&mut self, size: usize) -> Option<AllocAddr>;

    /// Returns `addr` to the allocator. Called at most once per live address.
    fn release(&mut self, addr: AllocAddr);
}

/// Deterministic backing allocator over logical offsets.
///
/// Models memory as a bump-allocated offset space with no real bytes behind
/// it, so core tests never touch the process heap. Supports injecting an
/// allocation failure or a forced (duplicate) address to exercise the
/// tracker's error and rollback paths.
#[derive(Debug)]
pub struct SlabBacking {
    next_offset: usize,
    live: usize,
    fail_next: bool,
    forced_next: Option<AllocAddr>,
    released: Vec<AllocAddr>,
}

impl Default for SlabBacking {
    fn default() -> Self {
        Self::new()
    }
}

impl SlabBacking {
    /// Creates an empty backing model.
    #[must_use]
    pub fn new() -> Self {
        Self {
            // Start above the zero page so no handle is ever null-like.
            next_offset: 0x1000,
            live: 0,
            fail_next: false,
            forced_next: None,
            released: Vec::new(),
        }
    }

    /// Makes the next `allocate` call report failure.
    pub fn fail_next_allocation(&mut self) {
        self.fail_next = true;
    }

    /// Makes the next `allocate` call return `addr` instead of a fresh
    /// offset. Used to simulate a misbehaving allocator handing out a
    /// duplicate live address.
    pub fn force_next_address(&mut self, addr: AllocAddr) {
        self.forced_next = Some(addr);
    }

    /// Number of allocations handed out and not yet released.
    #[must_use]
    pub fn live(&self) -> usize {
        self.live
    }

    /// Addresses released so far, in release order.
    #[must_use]
    pub fn released(&self) -> &[AllocAddr] {
        &self.released
    }
}

impl BackingAllocator for SlabBacking {
    fn allocate(&mut self, size: usize) -> Option<AllocAddr> {
        if self.fail_next {
            self.fail_next = false;
            return None;
        }
        if let Some(forced) = self.forced_next.take() {
            self.live += 1;
            return Some(forced);
        }
        let offset = self.next_offset;
        // Keep offsets 16-aligned like a real allocator would.
        let step = size.max(1).div_ceil(16) * 16;
        self.next_offset = self.next_offset.checked_add(step)?;
        self.live += 1;
        Some(AllocAddr::new(offset))
    }

    fn release(&mut self, addr: AllocAddr) {
        self.live = self.live.saturating_sub(1);
        self.released.push(addr);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_are_distinct_and_aligned() {
        let mut backing = SlabBacking::new();
        let a = backing.allocate(1).unwrap();
        let b = backing.allocate(17).unwrap();
        let c = backing.allocate(16).unwrap();
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_eq!(a.raw() % 16, 0);
        assert_eq!(b.raw(), a.raw() + 16);
        assert_eq!(c.raw(), b.raw() + 32);
    }

    #[test]
    fn failure_injection_affects_one_call() {
        let mut backing = SlabBacking::new();
        backing.fail_next_allocation();
        assert!(backing.allocate(8).is_none());
        assert!(backing.allocate(8).is_some());
    }

    #[test]
    fn release_is_recorded() {
        let mut backing = SlabBacking::new();
        let a = backing.allocate(8).unwrap();
        backing.release(a);
        assert_eq!(backing.live(), 0);
        assert_eq!(backing.released(), &[a]);
    }
}
