//! Error types for slot and interval operations.

use super::interval::TimeInterval;
use super::time::TimeOfDay;

/// Errors raised by time parsing, interval construction and slot-set edits.
///
/// Every variant is recoverable at the call site; a failed operation never
/// leaves the schedule partially modified.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlotError {
    /// Malformed `"HH:MM"` value or out-of-range minutes.
    #[error("invalid time of day: {0}")]
    InvalidTime(String),

    /// Interval with `start >= end` or a start at/after end of day.
    #[error("invalid interval: start {start} must be before end {end}")]
    InvalidInterval { start: TimeOfDay, end: TimeOfDay },

    /// Insertion candidate overlaps an existing slot.
    #[error("interval {candidate} overlaps existing interval {existing}")]
    OverlapConflict {
        candidate: TimeInterval,
        existing: TimeInterval,
    },

    /// Removal index beyond the current slot list.
    #[error("slot index {index} out of range for {len} slots")]
    IndexOutOfRange { index: usize, len: usize },
}
