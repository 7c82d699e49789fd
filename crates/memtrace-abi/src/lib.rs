//! # memtrace-abi
//!
//! `extern "C"` boundary for the memtrace tracked-allocation layer.
//!
//! Exposes three symbols over a process-wide tracker:
//!
//! ```text
//! C caller -> ABI entry (this crate) -> Tracker facade -> libc malloc/free
//! ```
//!
//! - `memtrace_alloc(size)` — allocate and track; null on failure.
//! - `memtrace_free(ptr)` — release; emits a stderr diagnostic on an
//!   invalid handle (double free or foreign pointer) and changes nothing.
//! - `memtrace_teardown()` — drop all tracking metadata at once; idempotent.
//!
//! The process-wide tracker is a `parking_lot::Mutex`-guarded explicit
//! static, so concurrent C callers are serialized at this boundary; the
//! core tracker itself stays single-threaded. Diagnostic verbosity comes
//! from the `MEMTRACE_DIAG` environment variable (see [`config`]).

pub mod config;
pub mod system;

use std::ffi::c_void;

use memtrace_core::{AllocAddr, LogLevel, Tracker};
use parking_lot::Mutex;

use crate::config::DiagLevel;
use crate::system::SystemBacking;

static GLOBAL_TRACKER: Mutex<Option<Tracker<SystemBacking>>> = Mutex::new(None);

fn with_global<R>(f: impl FnOnce(&mut Tracker<SystemBacking>) -> R) -> R {
    let mut guard = GLOBAL_TRACKER.lock();
    let tracker = guard.get_or_insert_with(|| Tracker::new(SystemBacking));
    let result = f(tracker);
    emit_diagnostics(tracker);
    result
}

/// Drains the tracker's lifecycle records and mirrors them to stderr
/// according to the configured diagnostic level.
fn emit_diagnostics(tracker: &mut Tracker<SystemBacking>) {
    let level = config::diag_level();
    let records = tracker.drain_lifecycle_logs();
    if level == DiagLevel::Off {
        return;
    }
    for record in records {
        let noteworthy = matches!(record.level, LogLevel::Warn | LogLevel::Error);
        if level == DiagLevel::Trace || noteworthy {
            let addr = record
                .addr
                .map_or_else(|| "-".to_owned(), |a| a.to_string());
            eprintln!(
                "memtrace[{}] {:?} {}/{} outcome={} addr={} live={}",
                record.seq, record.level, record.op, record.event, record.outcome, addr,
                record.live_count,
            );
        }
    }
}

/// Allocates `size` bytes and tracks the allocation.
///
/// Returns null when the underlying allocator fails or when tracking
/// metadata cannot be recorded (in which case the memory was already
/// returned to the allocator).
#[unsafe(no_mangle)]
pub extern "C" fn memtrace_alloc(size: usize) -> *mut c_void {
    match with_global(|tracker| tracker.allocate(size)) {
        Ok(addr) => addr.raw() as *mut c_void,
        Err(_) => std::ptr::null_mut(),
    }
}

/// Releases a tracked allocation.
///
/// Null is a no-op, matching `free(NULL)`. An address the tracker does not
/// know (double free or foreign pointer) produces a diagnostic and no state
/// change; the memory is NOT passed to `free`.
#[unsafe(no_mangle)]
pub extern "C" fn memtrace_free(ptr: *mut c_void) {
    if ptr.is_null() {
        return;
    }
    let addr = AllocAddr::new(ptr as usize);
    let _ = with_global(|tracker| tracker.release(addr));
}

/// Drops all tracking metadata. Idempotent; safe to call with nothing
/// allocated.
///
/// Reproduces the historical bulk-cleanup semantics: payloads still held by
/// callers are not freed, only the tracking structures are reclaimed.
#[unsafe(no_mangle)]
pub extern "C" fn memtrace_teardown() {
    let mut guard = GLOBAL_TRACKER.lock();
    if let Some(tracker) = guard.as_mut() {
        tracker.teardown();
        emit_diagnostics(tracker);
    }
}

/// Number of allocations currently tracked by the process-wide tracker.
#[unsafe(no_mangle)]
pub extern "C" fn memtrace_live_count() -> usize {
    let mut guard = GLOBAL_TRACKER.lock();
    guard.as_mut().map_or(0, |tracker| tracker.live_count())
}
