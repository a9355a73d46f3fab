//! Service layer for business computation.
//!
//! This module contains the computation that sits between the storage
//! layer and the HTTP handlers: timezone conversion of schedule intervals
//! and the overlap engine.

pub mod overlap;
pub mod timezone;

pub use overlap::{compute_overlap, intersect_slots, OverlapError, OverlapResult};
pub use timezone::{convert_interval, convert_slots_for_date, DatedInterval};
