//! Time-of-day representation.
//!
//! Schedules are described in minute-granularity local wall-clock time.
//! The wire format is a zero-padded 24-hour `"HH:MM"` string.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::SlotError;

/// Minutes in a full day.
pub const MINUTES_PER_DAY: u16 = 1440;

/// A time of day expressed as minutes since local midnight.
///
/// Values range over `[0, 1440]`. The value `1440` (`"24:00"`) marks the
/// exclusive end of a day and is only valid as an interval end; it arises
/// when a timezone conversion splits an interval at local midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Exclusive end of day (`"24:00"`).
    pub const END_OF_DAY: TimeOfDay = TimeOfDay(MINUTES_PER_DAY);

    /// Midnight (`"00:00"`).
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);

    /// Create from minutes since midnight.
    pub fn from_minutes(minutes: u16) -> Result<Self, SlotError> {
        if minutes > MINUTES_PER_DAY {
            return Err(SlotError::InvalidTime(format!(
                "{} minutes exceeds a day",
                minutes
            )));
        }
        Ok(Self(minutes))
    }

    /// Create from an hour/minute pair.
    pub fn from_hm(hour: u16, minute: u16) -> Result<Self, SlotError> {
        if hour > 24 || minute > 59 || (hour == 24 && minute != 0) {
            return Err(SlotError::InvalidTime(format!("{:02}:{:02}", hour, minute)));
        }
        Ok(Self(hour * 60 + minute))
    }

    /// Minutes since midnight.
    pub fn minutes(&self) -> u16 {
        self.0
    }

    /// Convert to a `chrono::NaiveTime`. `END_OF_DAY` has no naive
    /// equivalent and returns `None`.
    pub fn to_naive_time(&self) -> Option<chrono::NaiveTime> {
        if self.0 == MINUTES_PER_DAY {
            return None;
        }
        chrono::NaiveTime::from_hms_opt(u32::from(self.0) / 60, u32::from(self.0) % 60, 0)
    }

    /// Create from a `chrono::NaiveTime`, truncating to minute granularity.
    pub fn from_naive_time(time: chrono::NaiveTime) -> Self {
        use chrono::Timelike;
        Self((time.hour() * 60 + time.minute()) as u16)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl FromStr for TimeOfDay {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SlotError::InvalidTime(s.to_string());
        let (h, m) = s.split_once(':').ok_or_else(invalid)?;
        if h.len() != 2 || m.len() != 2 {
            return Err(invalid());
        }
        let hour: u16 = h.parse().map_err(|_| invalid())?;
        let minute: u16 = m.parse().map_err(|_| invalid())?;
        Self::from_hm(hour, minute)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|e: SlotError| D::Error::custom(e.to_string()))
    }
}
