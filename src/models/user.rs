//! User accounts and the friend/match relations between them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user.
///
/// `timezone` is an IANA zone name; it is stored as entered and validated
/// where it is consumed (profile updates and overlap queries).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub display_name: String,
    pub timezone: String,
    /// Confirmed friendships (symmetric; both sides list each other).
    #[serde(default)]
    pub friends: Vec<String>,
    /// Usernames with a pending friend request towards this user.
    #[serde(default)]
    pub friend_requests: Vec<String>,
    /// Usernames with a pending match request towards this user.
    #[serde(default)]
    pub match_requests: Vec<String>,
}

impl User {
    pub fn new(username: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            display_name: display_name.into(),
            timezone: "UTC".to_string(),
            friends: Vec::new(),
            friend_requests: Vec::new(),
            match_requests: Vec::new(),
        }
    }

    pub fn is_friend_of(&self, username: &str) -> bool {
        self.friends.iter().any(|f| f == username)
    }
}

/// Friendship state between a searching user and a search result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FriendshipStatus {
    Friends,
    RequestSent,
    RequestReceived,
    NotFriends,
}

/// Match lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Requested, awaiting the other party's response.
    Pending,
    /// Both parties consented; overlap queries are allowed.
    Active,
}

/// A mutual-consent relation between two friends that enables overlap
/// queries. At most one exists per user pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleMatch {
    pub match_id: Uuid,
    /// The two usernames, sorted ascending so the pair is a stable key.
    pub users: [String; 2],
    pub status: MatchStatus,
    pub requested_by: String,
}

impl ScheduleMatch {
    /// Create a pending match request from `requested_by` to `other`.
    pub fn pending(requested_by: &str, other: &str) -> Self {
        Self {
            match_id: Uuid::new_v4(),
            users: Self::pair(requested_by, other),
            status: MatchStatus::Pending,
            requested_by: requested_by.to_string(),
        }
    }

    /// Sorted username pair used as the match key.
    pub fn pair(a: &str, b: &str) -> [String; 2] {
        let mut users = [a.to_string(), b.to_string()];
        users.sort();
        users
    }

    pub fn involves(&self, username: &str) -> bool {
        self.users.iter().any(|u| u == username)
    }

    /// The other participant, given one of the pair.
    pub fn counterpart(&self, username: &str) -> Option<&str> {
        match (&*self.users[0], &*self.users[1]) {
            (a, b) if a == username => Some(b),
            (a, b) if b == username => Some(a),
            _ => None,
        }
    }
}
