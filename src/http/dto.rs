//! Data Transfer Objects for the HTTP API.
//!
//! Domain types that already carry the right serde representations
//! (`DaySchedule`, `TimeInterval`, `ScheduleMatch`, `OverlapResult`) are
//! re-exported and used directly as response bodies; the types here cover
//! request payloads and the response shapes that differ from the domain
//! model.

use serde::{Deserialize, Serialize};

pub use crate::api::{
    DaySchedule, FriendshipStatus, OverlapResult, ScheduleMatch, TimeInterval, User,
};

/// Request body for creating a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub display_name: String,
    /// IANA timezone name; defaults to UTC when omitted
    #[serde(default)]
    pub timezone: Option<String>,
}

/// Request body for updating a user profile. Omitted fields are left
/// unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
}

/// Public view of a user, without the relation bookkeeping lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub username: String,
    pub display_name: String,
    pub timezone: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            display_name: user.display_name,
            timezone: user.timezone,
        }
    }
}

/// Query parameters for user search.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: String,
}

/// One user-search result annotated with friendship status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSearchResult {
    pub username: String,
    pub display_name: String,
    pub timezone: String,
    pub friendship_status: FriendshipStatus,
}

/// Request body for writing a day schedule. The date comes from the path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PutScheduleRequest {
    #[serde(default = "default_true")]
    pub is_available: bool,
    #[serde(default)]
    pub free_times: Vec<TimeInterval>,
    #[serde(default)]
    pub busy_times: Vec<TimeInterval>,
}

fn default_true() -> bool {
    true
}

/// Query parameters for the schedule range endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleRangeQuery {
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
}

/// Request body for sending a friend request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendRequestBody {
    pub to_username: String,
}

/// Request body for answering a friend request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendRespondBody {
    pub from_username: String,
    pub accept: bool,
}

/// Query parameter for answering a match request.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchRespondQuery {
    pub accept: bool,
}

/// Generic acknowledgement body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub storage: String,
}
