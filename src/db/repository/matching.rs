//! Schedule-match repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{MatchStatus, ScheduleMatch};

/// Repository trait for schedule matches.
///
/// Matches are keyed by the sorted username pair; at most one record
/// exists per pair regardless of who requested it.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait MatchRepository: Send + Sync {
    /// Store a new match record.
    ///
    /// # Returns
    /// * `Err(RepositoryError::Conflict)` - A match or request already
    ///   exists for the pair
    async fn insert_match(&self, schedule_match: &ScheduleMatch) -> RepositoryResult<()>;

    /// Fetch the match record for a pair, if any.
    async fn find_match(
        &self,
        user_a: &str,
        user_b: &str,
    ) -> RepositoryResult<Option<ScheduleMatch>>;

    /// Flip the pair's pending match (requested by `requested_by`) to
    /// active.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - No pending match from that
    ///   requester exists for the pair
    async fn activate_match(
        &self,
        user_a: &str,
        user_b: &str,
        requested_by: &str,
    ) -> RepositoryResult<ScheduleMatch>;

    /// Delete the pair's match record.
    ///
    /// # Returns
    /// * `Ok(true)` - A record existed and was removed
    async fn delete_match(&self, user_a: &str, user_b: &str) -> RepositoryResult<bool>;

    /// List matches involving `username`, optionally filtered by status,
    /// ordered by the sorted pair key.
    async fn list_matches_for(
        &self,
        username: &str,
        status: Option<MatchStatus>,
    ) -> RepositoryResult<Vec<ScheduleMatch>>;
}
