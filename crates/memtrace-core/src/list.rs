//! Doubly linked list of live-allocation records.
//!
//! Records live in a slab (`Vec<Option<Record>>` plus a free-index stack)
//! owned entirely by the list; `prev`/`next` links are slot indices, not
//! pointers. The registry holds the same indices as weak references and
//! never deallocates a record on its own.
//!
//! The list performs no keyed search. Its only job is to hold the canonical
//! set of live records, insert at the head in O(1), and splice out a record
//! in O(1) once its index is known.

use crate::addr::AllocAddr;

/// One outstanding allocation.
#[derive(Debug, Clone, Copy)]
struct Record {
    addr: AllocAddr,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Live-allocation list over slab storage. Newest record at the head.
#[derive(Debug, Default)]
pub struct LiveList {
    slots: Vec<Option<Record>>,
    free: Vec<usize>,
    head: Option<usize>,
    len: usize,
}

impl LiveList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true when no records are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Slot index of the newest record, if any.
    #[must_use]
    pub fn head(&self) -> Option<usize> {
        self.head
    }

    /// Creates a record for `addr` and links it as the new head.
    ///
    /// Returns the record's slot index, the handle the registry stores.
    pub fn push_front(&mut self, addr: AllocAddr) -> usize {
        let record = Record {
            addr,
            prev: None,
            next: self.head,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(record);
                idx
            }
            None => {
                self.slots.push(Some(record));
                self.slots.len() - 1
            }
        };
        if let Some(old_head) = self.head {
            if let Some(old) = self.slots[old_head].as_mut() {
                old.prev = Some(idx);
            }
        }
        self.head = Some(idx);
        self.len += 1;
        idx
    }

    /// Splices the record at `idx` out of the list and releases its slot.
    ///
    /// Returns the record's address, or `None` if the slot is vacant.
    pub fn unlink(&mut self, idx: usize) -> Option<AllocAddr> {
        let record = self.slots.get_mut(idx)?.take()?;
        match record.prev {
            Some(prev) => {
                if let Some(p) = self.slots[prev].as_mut() {
                    p.next = record.next;
                }
            }
            None => self.head = record.next,
        }
        if let Some(next) = record.next {
            if let Some(n) = self.slots[next].as_mut() {
                n.prev = record.prev;
            }
        }
        self.free.push(idx);
        self.len -= 1;
        Some(record.addr)
    }

    /// Address stored in the record at `idx`, if the slot is occupied.
    #[must_use]
    pub fn addr_at(&self, idx: usize) -> Option<AllocAddr> {
        self.slots.get(idx)?.as_ref().map(|r| r.addr)
    }

    /// Walks the list from the head, newest first.
    pub fn iter(&self) -> impl Iterator<Item = AllocAddr> + '_ {
        let mut cursor = self.head;
        std::iter::from_fn(move || {
            let idx = cursor?;
            let record = self.slots.get(idx)?.as_ref()?;
            cursor = record.next;
            Some(record.addr)
        })
    }

    /// Drops every record at once without per-node unlinking. Teardown path.
    pub fn clear_all(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(raw: usize) -> AllocAddr {
        AllocAddr::new(raw)
    }

    fn collect(list: &LiveList) -> Vec<usize> {
        list.iter().map(AllocAddr::raw).collect()
    }

    #[test]
    fn push_front_orders_newest_first() {
        let mut list = LiveList::new();
        list.push_front(addr(1));
        list.push_front(addr(2));
        list.push_front(addr(3));
        assert_eq!(collect(&list), vec![3, 2, 1]);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn unlink_head_updates_head() {
        let mut list = LiveList::new();
        let a = list.push_front(addr(1));
        let b = list.push_front(addr(2));
        assert_eq!(list.unlink(b), Some(addr(2)));
        assert_eq!(list.head(), Some(a));
        assert_eq!(collect(&list), vec![1]);
    }

    #[test]
    fn unlink_middle_splices_neighbors() {
        let mut list = LiveList::new();
        list.push_front(addr(1));
        let mid = list.push_front(addr(2));
        list.push_front(addr(3));
        assert_eq!(list.unlink(mid), Some(addr(2)));
        assert_eq!(collect(&list), vec![3, 1]);
    }

    #[test]
    fn unlink_tail_keeps_rest_linked() {
        let mut list = LiveList::new();
        let tail = list.push_front(addr(1));
        list.push_front(addr(2));
        list.push_front(addr(3));
        assert_eq!(list.unlink(tail), Some(addr(1)));
        assert_eq!(collect(&list), vec![3, 2]);
    }

    #[test]
    fn unlink_vacant_slot_is_none() {
        let mut list = LiveList::new();
        let idx = list.push_front(addr(1));
        assert_eq!(list.unlink(idx), Some(addr(1)));
        assert_eq!(list.unlink(idx), None);
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn freed_slots_are_reused() {
        let mut list = LiveList::new();
        let first = list.push_front(addr(1));
        list.unlink(first);
        let second = list.push_front(addr(2));
        assert_eq!(first, second);
        assert_eq!(list.addr_at(second), Some(addr(2)));
    }

    #[test]
    fn clear_all_empties_and_remains_usable() {
        let mut list = LiveList::new();
        for i in 0..10 {
            list.push_front(addr(i));
        }
        list.clear_all();
        assert!(list.is_empty());
        assert_eq!(list.head(), None);
        list.push_front(addr(99));
        assert_eq!(collect(&list), vec![99]);
    }
}
