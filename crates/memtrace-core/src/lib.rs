//! # memtrace-core
//!
//! A tracked-allocation layer in front of a general-purpose allocator.
//!
//! Every allocation made through the [`Tracker`] facade is registered in two
//! coupled structures: an address-keyed hash [`Registry`] (O(1) average
//! lookup) and a doubly linked [`LiveList`] of outstanding allocations
//! (O(1) unlink, O(1) head insert). Together they make release O(1)
//! regardless of how many allocations are outstanding, and let the whole
//! outstanding set be enumerated and reclaimed at once.
//!
//! The tracker never dereferences the memory it tracks; addresses are opaque
//! identity values (see [`AllocAddr`]). Actual memory acquisition and release
//! are delegated through the [`BackingAllocator`] seam.
//!
//! No `unsafe` code is permitted at the crate level. The `Tracker` offers no
//! internal synchronization; concurrent use requires external locking.

#![deny(unsafe_code)]

pub mod addr;
pub mod backing;
pub mod error;
pub mod hash;
pub mod list;
pub mod log;
pub mod registry;
pub mod tracker;

pub use addr::AllocAddr;
pub use backing::{BackingAllocator, SlabBacking};
pub use error::TrackError;
pub use list::LiveList;
pub use log::{LogLevel, TrackerLogRecord};
pub use registry::Registry;
pub use tracker::Tracker;
