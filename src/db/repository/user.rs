//! User account and relation-list repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::User;

/// Repository trait for user records.
///
/// Covers account storage plus the per-user relation lists (friends,
/// pending friend requests, pending match requests). Every mutation is
/// applied atomically; a failed operation leaves the stored user
/// untouched.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new user.
    ///
    /// # Returns
    /// * `Err(RepositoryError::Conflict)` - If the username is taken
    async fn create_user(&self, user: &User) -> RepositoryResult<()>;

    /// Retrieve a user by username.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If the user doesn't exist
    async fn get_user(&self, username: &str) -> RepositoryResult<User>;

    /// Update display name and/or timezone; `None` fields are unchanged.
    ///
    /// # Returns
    /// * `Ok(User)` - The updated record
    async fn update_profile(
        &self,
        username: &str,
        display_name: Option<String>,
        timezone: Option<String>,
    ) -> RepositoryResult<User>;

    /// Case-insensitive substring search on username and display name,
    /// excluding `exclude`, returning at most `limit` users in username
    /// order. No relevance ranking is applied.
    async fn search_users(
        &self,
        query: &str,
        exclude: &str,
        limit: usize,
    ) -> RepositoryResult<Vec<User>>;

    // ==================== Friend Relation Lists ====================

    /// Record a pending friend request from `from` on `to`'s record.
    /// Idempotent: an already-pending request is not duplicated.
    async fn push_friend_request(&self, to: &str, from: &str) -> RepositoryResult<()>;

    /// Drop a pending friend request from `from` on `username`'s record.
    async fn pull_friend_request(&self, username: &str, from: &str) -> RepositoryResult<()>;

    /// Record a confirmed friendship on both users' records.
    async fn add_friendship(&self, user_a: &str, user_b: &str) -> RepositoryResult<()>;

    /// Remove a friendship from both users' records.
    async fn remove_friendship(&self, user_a: &str, user_b: &str) -> RepositoryResult<()>;

    // ==================== Match Request Lists ====================

    /// Record a pending match request from `from` on `to`'s record.
    async fn push_match_request(&self, to: &str, from: &str) -> RepositoryResult<()>;

    /// Drop a pending match request from `from` on `username`'s record.
    async fn pull_match_request(&self, username: &str, from: &str) -> RepositoryResult<()>;
}
