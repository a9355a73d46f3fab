//! Day-schedule repository trait.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::error::RepositoryResult;
use crate::models::DaySchedule;

/// Repository trait for per-day availability records.
///
/// A user has at most one `DaySchedule` per calendar date. Absence of a
/// record is meaningful (the default "fully available" schedule applies),
/// so reads return `Option` and the default rule lives in the service
/// layer, not here.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// Check if the storage backend is healthy.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Insert or replace the schedule for `(username, schedule.date)`.
    ///
    /// The write is atomic per (user, date): concurrent edits to the same
    /// day cannot interleave.
    async fn upsert_schedule(
        &self,
        username: &str,
        schedule: &DaySchedule,
    ) -> RepositoryResult<DaySchedule>;

    /// Fetch the stored schedule for a date, `None` when never written.
    async fn find_schedule(
        &self,
        username: &str,
        date: NaiveDate,
    ) -> RepositoryResult<Option<DaySchedule>>;

    /// Fetch all stored schedules with `start <= date <= end`, ordered by
    /// date. Dates without a record are simply absent.
    async fn list_schedules_in_range(
        &self,
        username: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepositoryResult<Vec<DaySchedule>>;

    /// Delete the stored schedule for a date.
    ///
    /// # Returns
    /// * `Ok(true)` - A record existed and was removed
    /// * `Ok(false)` - Nothing was stored for that date
    async fn delete_schedule(&self, username: &str, date: NaiveDate) -> RepositoryResult<bool>;
}
