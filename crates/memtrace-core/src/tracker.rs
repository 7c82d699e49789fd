//! Allocation tracking facade.
//!
//! [`Tracker`] composes the hash registry and the live-allocation list over
//! a backing allocator. For every live address, exactly one list record and
//! one registry entry exist, created together in [`Tracker::allocate`] and
//! destroyed together in [`Tracker::release`]; the two structures never
//! diverge at a public-API boundary.
//!
//! The tracker is an explicit context object. Multiple independent trackers
//! can coexist; nothing here is process-global.

use crate::addr::AllocAddr;
use crate::backing::BackingAllocator;
use crate::error::TrackError;
use crate::list::LiveList;
use crate::log::{LifecycleLog, LogLevel, TrackerLogRecord};
use crate::registry::Registry;

/// Tracked-allocation facade over a backing allocator.
#[derive(Debug)]
pub struct Tracker<A: BackingAllocator> {
    backing: A,
    registry: Registry,
    list: LiveList,
    log: LifecycleLog,
}

impl<A: BackingAllocator> Tracker<A> {
    /// Creates a tracker with no outstanding allocations.
    pub fn new(backing: A) -> Self {
        Self {
            backing,
            registry: Registry::new(),
            list: LiveList::new(),
            log: LifecycleLog::default(),
        }
    }

    /// Allocates `size` bytes through the backing allocator and tracks the
    /// resulting address.
    ///
    /// If tracking metadata cannot be recorded after the backing allocation
    /// succeeded, the record and the backing memory are rolled back and
    /// [`TrackError::TrackingFailed`] is returned, distinct from
    /// [`TrackError::AllocationFailed`].
    pub fn allocate(&mut self, size: usize) -> Result<AllocAddr, TrackError> {
        let Some(addr) = self.backing.allocate(size) else {
            self.log.record(
                LogLevel::Warn,
                "allocate",
                "alloc",
                None,
                Some(size),
                "oom",
                self.registry.len(),
            );
            return Err(TrackError::AllocationFailed { size });
        };

        let capacity_before = self.registry.capacity();
        let idx = self.list.push_front(addr);
        if let Err(err) = self.registry.insert(addr, idx) {
            // Roll back: neither the record nor the backing memory may
            // outlive a failed registry insert.
            self.list.unlink(idx);
            self.backing.release(addr);
            self.log.record(
                LogLevel::Warn,
                "allocate",
                "tracking_rollback",
                Some(addr),
                Some(size),
                "rolled_back",
                self.registry.len(),
            );
            return Err(err);
        }
        if self.registry.capacity() != capacity_before {
            self.log.record(
                LogLevel::Debug,
                "allocate",
                "registry_grow",
                None,
                Some(self.registry.capacity()),
                "grown",
                self.registry.len(),
            );
        }

        debug_assert_eq!(self.registry.len(), self.list.len());
        self.log.record(
            LogLevel::Trace,
            "allocate",
            "alloc",
            Some(addr),
            Some(size),
            "success",
            self.registry.len(),
        );
        Ok(addr)
    }

    /// Releases the allocation at `addr`.
    ///
    /// Unknown or already-released addresses return
    /// [`TrackError::InvalidHandle`] and leave all state unchanged.
    pub fn release(&mut self, addr: AllocAddr) -> Result<(), TrackError> {
        // Lookup before any mutation: the record index must come from the
        // registry while the entry is still present.
        let Some(idx) = self.registry.lookup(addr) else {
            self.log.record(
                LogLevel::Warn,
                "release",
                "free",
                Some(addr),
                None,
                "invalid_handle",
                self.registry.len(),
            );
            return Err(TrackError::InvalidHandle { addr });
        };

        let unlinked = self.list.unlink(idx);
        debug_assert_eq!(unlinked, Some(addr));
        self.registry.remove(addr);
        self.backing.release(addr);

        debug_assert_eq!(self.registry.len(), self.list.len());
        self.log.record(
            LogLevel::Trace,
            "release",
            "free",
            Some(addr),
            None,
            "success",
            self.registry.len(),
        );
        Ok(())
    }

    /// Drops all tracking metadata at once. Idempotent.
    ///
    /// This reclaims only the registry and list storage, reproducing the
    /// historical bulk-cleanup semantics: payloads still held by callers are
    /// NOT returned to the backing allocator. Use [`Tracker::release_all`]
    /// for the leak-free variant.
    pub fn teardown(&mut self) {
        let dropped = self.registry.len();
        self.registry.clear();
        self.list.clear_all();
        self.log.record(
            LogLevel::Trace,
            "teardown",
            "clear",
            None,
            Some(dropped),
            "success",
            0,
        );
    }

    /// Returns every outstanding payload to the backing allocator, then
    /// drops all tracking metadata. Idempotent.
    pub fn release_all(&mut self) {
        let outstanding: Vec<AllocAddr> = self.list.iter().collect();
        for addr in &outstanding {
            self.backing.release(*addr);
        }
        self.registry.clear();
        self.list.clear_all();
        self.log.record(
            LogLevel::Trace,
            "release_all",
            "clear",
            None,
            Some(outstanding.len()),
            "success",
            0,
        );
    }

    /// Number of outstanding allocations.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.registry.len()
    }

    /// Returns true while `addr` is allocated and not yet released.
    #[must_use]
    pub fn is_live(&self, addr: AllocAddr) -> bool {
        self.registry.lookup(addr).is_some()
    }

    /// Outstanding addresses, newest first.
    pub fn live_addrs(&self) -> impl Iterator<Item = AllocAddr> + '_ {
        self.list.iter()
    }

    /// Current registry bucket count.
    #[must_use]
    pub fn registry_capacity(&self) -> usize {
        self.registry.capacity()
    }

    /// The backing allocator.
    #[must_use]
    pub fn backing(&self) -> &A {
        &self.backing
    }

    /// A view of the lifecycle records accumulated so far.
    #[must_use]
    pub fn lifecycle_logs(&self) -> &[TrackerLogRecord] {
        self.log.records()
    }

    /// Drains the accumulated lifecycle records.
    pub fn drain_lifecycle_logs(&mut self) -> Vec<TrackerLogRecord> {
        self.log.drain()
    }
}
