//! Per-day availability state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::SlotError;
use super::interval::{insert_slot, remove_slot, validate_slots, TimeInterval};

/// A user's availability for one calendar date.
///
/// `free_times` and `busy_times` are independent annotations: each list is
/// kept sorted by start and pairwise non-overlapping, but an interval may
/// appear in both. A schedule that was never written for a date is
/// equivalent to [`DaySchedule::default_for`] that date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    /// Calendar date, serialized as `"YYYY-MM-DD"`.
    pub date: NaiveDate,
    /// When false, the whole day is vetoed regardless of `free_times`.
    #[serde(default = "default_available")]
    pub is_available: bool,
    #[serde(default)]
    pub free_times: Vec<TimeInterval>,
    #[serde(default)]
    pub busy_times: Vec<TimeInterval>,
}

fn default_available() -> bool {
    true
}

impl DaySchedule {
    /// The implicit schedule for a date with no stored record: available,
    /// no intervals.
    pub fn default_for(date: NaiveDate) -> Self {
        Self {
            date,
            is_available: true,
            free_times: Vec::new(),
            busy_times: Vec::new(),
        }
    }

    /// Build a schedule from externally supplied slot lists, validating
    /// each list independently and sorting it by start.
    pub fn validated(
        date: NaiveDate,
        is_available: bool,
        free_times: &[TimeInterval],
        busy_times: &[TimeInterval],
    ) -> Result<Self, SlotError> {
        Ok(Self {
            date,
            is_available,
            free_times: validate_slots(free_times)?,
            busy_times: validate_slots(busy_times)?,
        })
    }

    /// Free intervals for the day, honoring the availability veto.
    pub fn effective_free_times(&self) -> &[TimeInterval] {
        if self.is_available {
            &self.free_times
        } else {
            &[]
        }
    }

    pub fn add_free(&mut self, slot: TimeInterval) -> Result<(), SlotError> {
        insert_slot(&mut self.free_times, slot)
    }

    pub fn add_busy(&mut self, slot: TimeInterval) -> Result<(), SlotError> {
        insert_slot(&mut self.busy_times, slot)
    }

    pub fn remove_free(&mut self, index: usize) -> Result<TimeInterval, SlotError> {
        remove_slot(&mut self.free_times, index)
    }

    pub fn remove_busy(&mut self, index: usize) -> Result<TimeInterval, SlotError> {
        remove_slot(&mut self.busy_times, index)
    }
}
