//! Half-open time-of-day intervals and slot-set operations.
//!
//! A slot set is an ordered `Vec<TimeInterval>` with pairwise
//! non-overlapping members. Insertion rejects overlap, removal is by
//! index; touching intervals are legal and are never merged.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::SlotError;
use super::time::TimeOfDay;

/// A `[start, end)` time-of-day range.
///
/// Invariant: `start < end`, and `start` is strictly before end of day.
/// Two intervals overlap iff `a.start < b.end && b.start < a.end`;
/// intervals touching at a boundary do not overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInterval {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl TimeInterval {
    /// Create a new interval, rejecting zero-length and inverted ranges.
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Result<Self, SlotError> {
        if start >= end || start >= TimeOfDay::END_OF_DAY {
            return Err(SlotError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parse from a pair of `"HH:MM"` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self, SlotError> {
        Self::new(start.parse()?, end.parse()?)
    }

    /// Half-open overlap check.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Intersection of two intervals, `None` when they do not overlap.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        if !self.overlaps(other) {
            return None;
        }
        Some(Self {
            start: self.start.max(other.start),
            end: self.end.min(other.end),
        })
    }

    /// Interval length in minutes.
    pub fn duration_minutes(&self) -> u16 {
        self.end.minutes() - self.start.minutes()
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Insert `candidate` into `slots`, keeping the set sorted by start.
///
/// Fails with `OverlapConflict` if the candidate overlaps any existing
/// member; the set is left untouched on failure. Touching intervals are
/// kept as distinct entries.
pub fn insert_slot(slots: &mut Vec<TimeInterval>, candidate: TimeInterval) -> Result<(), SlotError> {
    if let Some(existing) = slots.iter().find(|s| s.overlaps(&candidate)) {
        return Err(SlotError::OverlapConflict {
            candidate,
            existing: *existing,
        });
    }
    slots.push(candidate);
    slots.sort_by_key(|s| s.start);
    Ok(())
}

/// Remove the slot at `index`, preserving the order of the rest.
pub fn remove_slot(slots: &mut Vec<TimeInterval>, index: usize) -> Result<TimeInterval, SlotError> {
    if index >= slots.len() {
        return Err(SlotError::IndexOutOfRange {
            index,
            len: slots.len(),
        });
    }
    Ok(slots.remove(index))
}

/// Validate an externally supplied slot list: every member well-formed
/// and pairwise non-overlapping. Returns the list sorted by start.
pub fn validate_slots(slots: &[TimeInterval]) -> Result<Vec<TimeInterval>, SlotError> {
    let mut validated: Vec<TimeInterval> = Vec::with_capacity(slots.len());
    for slot in slots {
        // Re-run the constructor invariant; deserialized values bypass it.
        let slot = TimeInterval::new(slot.start, slot.end)?;
        insert_slot(&mut validated, slot)?;
    }
    Ok(validated)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(start: &str, end: &str) -> TimeInterval {
        TimeInterval::parse(start, end).unwrap()
    }

    #[test]
    fn test_new_rejects_inverted_and_empty() {
        let nine: TimeOfDay = "09:00".parse().unwrap();
        let ten: TimeOfDay = "10:00".parse().unwrap();
        assert!(TimeInterval::new(nine, ten).is_ok());
        assert!(matches!(
            TimeInterval::new(ten, nine),
            Err(SlotError::InvalidInterval { .. })
        ));
        assert!(TimeInterval::new(nine, nine).is_err());
    }

    #[test]
    fn test_new_rejects_start_at_end_of_day() {
        let end = TimeOfDay::END_OF_DAY;
        assert!(TimeInterval::new(end, end).is_err());
    }

    #[test]
    fn test_end_of_day_interval_is_valid() {
        let slot = iv("23:00", "24:00");
        assert_eq!(slot.duration_minutes(), 60);
    }

    #[test]
    fn test_overlap_half_open() {
        let a = iv("09:00", "10:00");
        let b = iv("09:30", "10:30");
        let c = iv("10:00", "11:00");
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        // Touching at the boundary is not an overlap.
        assert!(!a.overlaps(&c));
        assert!(!c.overlaps(&a));
    }

    #[test]
    fn test_intersection() {
        let a = iv("09:00", "12:00");
        let b = iv("10:00", "13:00");
        assert_eq!(a.intersection(&b), Some(iv("10:00", "12:00")));
        assert_eq!(a.intersection(&iv("12:00", "13:00")), None);
    }

    #[test]
    fn test_insert_into_empty_always_succeeds() {
        let mut slots = Vec::new();
        assert!(insert_slot(&mut slots, iv("00:00", "24:00")).is_ok());
    }

    #[test]
    fn test_insert_conflict_leaves_set_unchanged() {
        let mut slots = Vec::new();
        insert_slot(&mut slots, iv("09:00", "10:00")).unwrap();
        let err = insert_slot(&mut slots, iv("09:30", "10:30")).unwrap_err();
        assert!(matches!(err, SlotError::OverlapConflict { .. }));
        assert_eq!(slots, vec![iv("09:00", "10:00")]);
    }

    #[test]
    fn test_insert_touching_slots_stay_distinct() {
        let mut slots = Vec::new();
        insert_slot(&mut slots, iv("09:00", "10:00")).unwrap();
        insert_slot(&mut slots, iv("10:00", "11:00")).unwrap();
        assert_eq!(slots.len(), 2);
        assert_eq!(slots, vec![iv("09:00", "10:00"), iv("10:00", "11:00")]);
    }

    #[test]
    fn test_insert_keeps_sorted_order() {
        let mut slots = Vec::new();
        insert_slot(&mut slots, iv("14:00", "15:00")).unwrap();
        insert_slot(&mut slots, iv("08:00", "09:00")).unwrap();
        insert_slot(&mut slots, iv("10:00", "11:00")).unwrap();
        let starts: Vec<_> = slots.iter().map(|s| s.start.to_string()).collect();
        assert_eq!(starts, vec!["08:00", "10:00", "14:00"]);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut slots = vec![iv("09:00", "10:00")];
        let err = remove_slot(&mut slots, 1).unwrap_err();
        assert_eq!(err, SlotError::IndexOutOfRange { index: 1, len: 1 });
        assert_eq!(slots.len(), 1);
    }

    #[test]
    fn test_remove_then_reinsert_roundtrip() {
        let mut slots = Vec::new();
        insert_slot(&mut slots, iv("08:00", "09:00")).unwrap();
        insert_slot(&mut slots, iv("10:00", "11:00")).unwrap();
        let original = slots.clone();

        let removed = remove_slot(&mut slots, 0).unwrap();
        assert_eq!(removed, iv("08:00", "09:00"));
        insert_slot(&mut slots, removed).unwrap();
        assert_eq!(slots, original);
    }

    #[test]
    fn test_validate_slots_sorts_and_rejects_overlap() {
        let ok = validate_slots(&[iv("12:00", "13:00"), iv("08:00", "09:00")]).unwrap();
        assert_eq!(ok, vec![iv("08:00", "09:00"), iv("12:00", "13:00")]);

        let bad = validate_slots(&[iv("08:00", "10:00"), iv("09:00", "11:00")]);
        assert!(matches!(bad, Err(SlotError::OverlapConflict { .. })));
    }

    #[test]
    fn test_serde_wire_format() {
        let slot = iv("09:00", "10:30");
        let json = serde_json::to_string(&slot).unwrap();
        assert_eq!(json, r#"{"start":"09:00","end":"10:30"}"#);
    }
}
