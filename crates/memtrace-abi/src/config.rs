//! Diagnostic verbosity configuration.
//!
//! Set via the `MEMTRACE_DIAG` environment variable:
//! - `warn` (default): invalid-handle and rollback diagnostics go to stderr.
//! - `trace`: every lifecycle record goes to stderr.
//! - `off`: no stderr output. Records are still accumulated and drained.

use std::sync::atomic::{AtomicU8, Ordering};

/// Stderr diagnostic verbosity for the ABI boundary.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DiagLevel {
    /// No stderr output.
    Off,
    /// Warn and Error lifecycle records only.
    #[default]
    Warn,
    /// Every lifecycle record.
    Trace,
}

impl DiagLevel {
    /// Parse from string (case-insensitive, loose).
    #[must_use]
    pub fn from_str_loose(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "off" | "none" | "silent" | "disabled" => Self::Off,
            "trace" | "all" | "verbose" | "debug" => Self::Trace,
            _ => Self::Warn,
        }
    }
}

// Atomic cache: 0=unresolved, then one slot per level. Avoids re-reading the
// environment on every exported call.
static CACHED_LEVEL: AtomicU8 = AtomicU8::new(LEVEL_UNRESOLVED);

const LEVEL_UNRESOLVED: u8 = 0;
const LEVEL_OFF: u8 = 1;
const LEVEL_WARN: u8 = 2;
const LEVEL_TRACE: u8 = 3;

fn level_to_u8(level: DiagLevel) -> u8 {
    match level {
        DiagLevel::Off => LEVEL_OFF,
        DiagLevel::Warn => LEVEL_WARN,
        DiagLevel::Trace => LEVEL_TRACE,
    }
}

fn u8_to_level(v: u8) -> DiagLevel {
    match v {
        LEVEL_OFF => DiagLevel::Off,
        LEVEL_TRACE => DiagLevel::Trace,
        _ => DiagLevel::Warn,
    }
}

/// The configured diagnostic level (reads the env var on first call,
/// caches thereafter).
#[must_use]
pub fn diag_level() -> DiagLevel {
    let cached = CACHED_LEVEL.load(Ordering::Relaxed);
    if cached != LEVEL_UNRESOLVED {
        return u8_to_level(cached);
    }
    let resolved = std::env::var("MEMTRACE_DIAG")
        .map(|raw| DiagLevel::from_str_loose(&raw))
        .unwrap_or_default();
    CACHED_LEVEL.store(level_to_u8(resolved), Ordering::Relaxed);
    resolved
}

/// Overrides the cached level. Intended for tests and benchmark baselines.
pub fn set_diag_level(level: DiagLevel) {
    CACHED_LEVEL.store(level_to_u8(level), Ordering::Relaxed);
}
