//! Address-keyed hash registry with chained buckets.
//!
//! Maps each live [`AllocAddr`] to the slot index of its record in the
//! live-allocation list. Collisions are resolved by chaining; chains are
//! `Box`-linked and owned by their bucket. The stored index is a weak
//! reference: the list owns record storage, the registry only locates it.
//!
//! Capacity doubles whenever an insert would push the load factor over 3/4.
//! Because the bucket index is `mix64(addr) mod capacity`, growth must
//! re-distribute every existing entry under the new capacity; reusing the
//! old chains as-is would strand entries in stale buckets and break every
//! subsequent lookup for them.

use crate::addr::AllocAddr;
use crate::error::TrackError;
use crate::hash;

/// Bucket count of a freshly created registry.
pub const INITIAL_CAPACITY: usize = 128;

/// One chain element in a hash bucket.
#[derive(Debug)]
struct Entry {
    key: AllocAddr,
    record: usize,
    next: Option<Box<Entry>>,
}

/// Resizable open-hash table from allocation address to record index.
#[derive(Debug)]
pub struct Registry {
    buckets: Vec<Option<Box<Entry>>>,
    len: usize,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Creates an empty registry at [`INITIAL_CAPACITY`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            buckets: Self::empty_buckets(INITIAL_CAPACITY),
            len: 0,
        }
    }

    fn empty_buckets(capacity: usize) -> Vec<Option<Box<Entry>>> {
        let mut buckets = Vec::with_capacity(capacity);
        buckets.resize_with(capacity, || None);
        buckets
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true when no entries are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current bucket count.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Records `key -> record`, appending at the tail of the bucket chain.
    ///
    /// A duplicate live key is a bookkeeping failure: the backing allocator
    /// guarantees live addresses are unique, so a second insert for the same
    /// address means the caller's metadata went wrong. The registry is left
    /// untouched and the caller is expected to roll back.
    pub fn insert(&mut self, key: AllocAddr, record: usize) -> Result<(), TrackError> {
        if self.lookup(key).is_some() {
            return Err(TrackError::TrackingFailed { addr: key });
        }
        // Grow before the insert that would cross the 3/4 load threshold.
        if (self.len + 1) * 4 > self.buckets.len() * 3 {
            self.grow();
        }
        let idx = hash::bucket_index(key, self.buckets.len());
        Self::chain_append(
            &mut self.buckets[idx],
            Box::new(Entry {
                key,
                record,
                next: None,
            }),
        );
        self.len += 1;
        Ok(())
    }

    /// Unlinks the entry for `key` and returns its record index.
    ///
    /// Absent keys return `None` with no structural change.
    pub fn remove(&mut self, key: AllocAddr) -> Option<usize> {
        let idx = hash::bucket_index(key, self.buckets.len());
        let record = Self::chain_remove(&mut self.buckets[idx], key)?;
        self.len -= 1;
        Some(record)
    }

    /// Record index for `key`, or `None` if it is not live.
    #[must_use]
    pub fn lookup(&self, key: AllocAddr) -> Option<usize> {
        let idx = hash::bucket_index(key, self.buckets.len());
        let mut cursor = self.buckets[idx].as_deref();
        while let Some(entry) = cursor {
            if entry.key == key {
                return Some(entry.record);
            }
            cursor = entry.next.as_deref();
        }
        None
    }

    /// Drops every entry and resets to the initial capacity. Teardown path.
    pub fn clear(&mut self) {
        self.buckets = Self::empty_buckets(INITIAL_CAPACITY);
        self.len = 0;
    }

    /// Doubles the bucket count, re-bucketing every existing entry under
    /// the new capacity.
    fn grow(&mut self) {
        let new_capacity = self.buckets.len() * 2;
        let old_buckets = std::mem::replace(&mut self.buckets, Self::empty_buckets(new_capacity));
        for mut chain in old_buckets {
            while let Some(mut entry) = chain {
                chain = entry.next.take();
                let idx = hash::bucket_index(entry.key, new_capacity);
                Self::chain_append(&mut self.buckets[idx], entry);
            }
        }
    }

    fn chain_append(slot: &mut Option<Box<Entry>>, entry: Box<Entry>) {
        match slot {
            None => *slot = Some(entry),
            Some(head) => Self::chain_append(&mut head.next, entry),
        }
    }

    fn chain_remove(slot: &mut Option<Box<Entry>>, key: AllocAddr) -> Option<usize> {
        match slot.take() {
            None => None,
            Some(mut entry) if entry.key == key => {
                *slot = entry.next.take();
                Some(entry.record)
            }
            Some(mut entry) => {
                let found = Self::chain_remove(&mut entry.next, key);
                *slot = Some(entry);
                found
            }
        }
    }
}
