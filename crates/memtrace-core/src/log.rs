//! Structured lifecycle records.
//!
//! The tracker appends an in-memory record for every operation outcome
//! instead of writing to a logging facade; callers (tests, the ABI
//! boundary) drain and render them as they see fit.

use crate::addr::AllocAddr;

/// Tracker lifecycle log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Warn,
    Error,
}

/// Structured tracker lifecycle record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerLogRecord {
    /// Monotonic record id.
    pub seq: u64,
    /// Severity level.
    pub level: LogLevel,
    /// API operation (`allocate`, `release`, `teardown`, `release_all`).
    pub op: &'static str,
    /// Event kind (`alloc`, `free`, `registry_grow`, ...).
    pub event: &'static str,
    /// Address involved in the event.
    pub addr: Option<AllocAddr>,
    /// Size value involved in the event.
    pub size: Option<usize>,
    /// Machine-readable outcome label.
    pub outcome: &'static str,
    /// Snapshot: live allocations after the event.
    pub live_count: usize,
}

/// Append-only buffer of lifecycle records with a monotonic sequence.
#[derive(Debug, Default)]
pub(crate) struct LifecycleLog {
    records: Vec<TrackerLogRecord>,
    next_seq: u64,
}

impl LifecycleLog {
    pub(crate) fn record(
        &mut self,
        level: LogLevel,
        op: &'static str,
        event: &'static str,
        addr: Option<AllocAddr>,
        size: Option<usize>,
        outcome: &'static str,
        live_count: usize,
    ) {
        self.next_seq = self.next_seq.wrapping_add(1);
        self.records.push(TrackerLogRecord {
            seq: self.next_seq,
            level,
            op,
            event,
            addr,
            size,
            outcome,
            live_count,
        });
    }

    pub(crate) fn records(&self) -> &[TrackerLogRecord] {
        &self.records
    }

    pub(crate) fn drain(&mut self) -> Vec<TrackerLogRecord> {
        std::mem::take(&mut self.records)
    }
}
