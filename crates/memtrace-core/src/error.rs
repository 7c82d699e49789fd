//! Typed failure conditions.

use thiserror::Error;

use crate::addr::AllocAddr;

/// Failure conditions surfaced by the tracking layer.
///
/// None of these are fatal: every variant is reported through a `Result` and
/// leaves the registry and list in a consistent state.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TrackError {
    /// The backing allocator could not satisfy the request. No partial
    /// tracking state is created.
    #[error("backing allocator failed to provide {size} bytes")]
    AllocationFailed {
        /// Requested size in bytes.
        size: usize,
    },
    /// Tracking metadata could not be recorded after the backing allocation
    /// succeeded. The backing allocation has already been rolled back.
    #[error("failed to track allocation at {addr}")]
    TrackingFailed {
        /// Address of the rolled-back allocation.
        addr: AllocAddr,
    },
    /// The handle is not a live allocation: a double free or a pointer the
    /// tracker never handed out. No state was mutated.
    #[error("invalid handle {addr}: not a live allocation")]
    InvalidHandle {
        /// The offending address.
        addr: AllocAddr,
    },
}
