//! Backing allocator over the C heap.

use memtrace_core::{AllocAddr, BackingAllocator};

/// Delegates acquisition and release to `libc::malloc`/`libc::free`.
///
/// This is the only place real memory changes hands; the core tracker sees
/// nothing but the resulting addresses.
#[derive(Debug, Default)]
pub struct SystemBacking;

impl BackingAllocator for SystemBacking {
    fn allocate(&mut self, size: usize) -> Option<AllocAddr> {
        // malloc(0) may legally return null; request at least one byte so a
        // live handle always has a distinct, non-null address.
        let size = size.max(1);
        // SAFETY: plain malloc call; the returned pointer is either null or
        // a fresh allocation of `size` bytes.
        let ptr = unsafe { libc::malloc(size) };
        if ptr.is_null() {
            None
        } else {
            Some(AllocAddr::new(ptr as usize))
        }
    }

    fn release(&mut self, addr: AllocAddr) {
        // SAFETY: `addr` originated from `malloc` in `allocate` above, and
        // the tracker releases each live address at most once.
        unsafe { libc::free(addr.raw() as *mut libc::c_void) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocates_distinct_nonnull_addresses() {
        let mut backing = SystemBacking;
        let a = backing.allocate(16).expect("malloc(16)");
        let b = backing.allocate(0).expect("malloc(0) promoted to 1 byte");
        assert_ne!(a.raw(), 0);
        assert_ne!(b.raw(), 0);
        assert_ne!(a, b);
        backing.release(a);
        backing.release(b);
    }
}
