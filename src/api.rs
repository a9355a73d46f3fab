//! Public API surface for the backend.
//!
//! This file consolidates the domain and DTO types exposed to consumers.
//! All types serialize to the JSON wire formats used by the HTTP API:
//! times as `"HH:MM"`, dates as `"YYYY-MM-DD"`, timezones as IANA names.

pub use crate::models::error::SlotError;
pub use crate::models::interval::{insert_slot, remove_slot, validate_slots, TimeInterval};
pub use crate::models::schedule::DaySchedule;
pub use crate::models::time::{TimeOfDay, MINUTES_PER_DAY};
pub use crate::models::user::{FriendshipStatus, MatchStatus, ScheduleMatch, User};
pub use crate::services::overlap::{OverlapError, OverlapResult};
pub use crate::services::timezone::DatedInterval;
