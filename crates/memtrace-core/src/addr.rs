//! Opaque allocation identity.

use std::fmt;

/// Identity of one allocation, equal to the address handed to the caller.
///
/// The tracking layer never dereferences this value; it is purely a lookup
/// key. Keeping it distinct from any live pointer type makes that explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AllocAddr(usize);

impl AllocAddr {
    /// Wraps the integer representation of an address.
    #[must_use]
    pub const fn new(raw: usize) -> Self {
        Self(raw)
    }

    /// Returns the integer representation.
    #[must_use]
    pub const fn raw(self) -> usize {
        self.0
    }
}

impl fmt::Display for AllocAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}
