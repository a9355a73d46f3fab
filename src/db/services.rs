//! High-level storage service layer.
//!
//! Repository-agnostic operations that work with any implementation of
//! the repository traits. Business rules that must hold regardless of the
//! storage backend live here: the implicit default schedule, slot-list
//! validation on writes, and the friend/match lifecycles.

use chrono::NaiveDate;
use chrono_tz::Tz;
use tracing::info;

use super::repository::{FullRepository, RepositoryError, RepositoryResult};
use crate::models::{
    DaySchedule, FriendshipStatus, MatchStatus, ScheduleMatch, User,
};

/// Check if the storage backend is healthy.
pub async fn health_check<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

fn validate_timezone(zone: &str) -> RepositoryResult<()> {
    zone.parse::<Tz>().map(|_| ()).map_err(|_| {
        RepositoryError::ValidationError(format!("Invalid timezone: {}", zone))
    })
}

// ==================== Users ====================

/// Register a new user. The timezone defaults to UTC and must be a valid
/// IANA zone name when given.
pub async fn register_user<R: FullRepository + ?Sized>(
    repo: &R,
    username: &str,
    display_name: &str,
    timezone: Option<&str>,
) -> RepositoryResult<User> {
    if username.is_empty() {
        return Err(RepositoryError::ValidationError(
            "Username must not be empty".to_string(),
        ));
    }

    let mut user = User::new(username, display_name);
    if let Some(zone) = timezone {
        validate_timezone(zone)?;
        user.timezone = zone.to_string();
    }

    repo.create_user(&user).await?;
    info!(username, "registered user");
    Ok(user)
}

pub async fn get_user<R: FullRepository + ?Sized>(
    repo: &R,
    username: &str,
) -> RepositoryResult<User> {
    repo.get_user(username).await
}

/// Update display name and/or timezone. `None` fields are left unchanged.
pub async fn update_profile<R: FullRepository + ?Sized>(
    repo: &R,
    username: &str,
    display_name: Option<String>,
    timezone: Option<String>,
) -> RepositoryResult<User> {
    if let Some(zone) = timezone.as_deref() {
        validate_timezone(zone)?;
    }
    repo.update_profile(username, display_name, timezone).await
}

/// Substring search over other users, each result annotated with its
/// friendship status relative to the searcher.
pub async fn search_users<R: FullRepository + ?Sized>(
    repo: &R,
    viewer_username: &str,
    query: &str,
) -> RepositoryResult<Vec<(User, FriendshipStatus)>> {
    if query.is_empty() {
        return Ok(Vec::new());
    }
    let viewer = repo.get_user(viewer_username).await?;
    let matches = repo.search_users(query, viewer_username, 10).await?;

    Ok(matches
        .into_iter()
        .map(|target| {
            let status = if viewer.is_friend_of(&target.username) {
                FriendshipStatus::Friends
            } else if viewer.friend_requests.contains(&target.username) {
                FriendshipStatus::RequestReceived
            } else if target.friend_requests.contains(&viewer.username) {
                FriendshipStatus::RequestSent
            } else {
                FriendshipStatus::NotFriends
            };
            (target, status)
        })
        .collect())
}

// ==================== Schedules ====================

/// Fetch the schedule for a date, falling back to the implicit default
/// (available, no intervals) when none was ever written. This is the only
/// place the absence rule is applied.
pub async fn get_schedule_or_default<R: FullRepository + ?Sized>(
    repo: &R,
    username: &str,
    date: NaiveDate,
) -> RepositoryResult<DaySchedule> {
    Ok(repo
        .find_schedule(username, date)
        .await?
        .unwrap_or_else(|| DaySchedule::default_for(date)))
}

/// Stored schedules in an inclusive date range. Dates without a record
/// are omitted (clients apply the default client-side for display).
pub async fn get_schedule_range<R: FullRepository + ?Sized>(
    repo: &R,
    username: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> RepositoryResult<Vec<DaySchedule>> {
    if start > end {
        return Err(RepositoryError::ValidationError(format!(
            "Invalid date range: {} is after {}",
            start, end
        )));
    }
    repo.list_schedules_in_range(username, start, end).await
}

/// Validate and store a day schedule. Each interval list is checked for
/// well-formed, pairwise non-overlapping entries and normalized to start
/// order; validation failure writes nothing.
pub async fn put_schedule<R: FullRepository + ?Sized>(
    repo: &R,
    username: &str,
    schedule: &DaySchedule,
) -> RepositoryResult<DaySchedule> {
    repo.get_user(username).await?;

    let validated = DaySchedule::validated(
        schedule.date,
        schedule.is_available,
        &schedule.free_times,
        &schedule.busy_times,
    )
    .map_err(|e| RepositoryError::ValidationError(e.to_string()))?;

    repo.upsert_schedule(username, &validated).await
}

/// Delete the stored schedule for a date; the implicit default applies
/// afterwards.
pub async fn delete_schedule<R: FullRepository + ?Sized>(
    repo: &R,
    username: &str,
    date: NaiveDate,
) -> RepositoryResult<()> {
    if !repo.delete_schedule(username, date).await? {
        return Err(RepositoryError::NotFound(format!(
            "No schedule stored for {} on {}",
            username, date
        )));
    }
    Ok(())
}

// ==================== Friends ====================

/// Send a friend request from `from` to `to`.
pub async fn send_friend_request<R: FullRepository + ?Sized>(
    repo: &R,
    from: &str,
    to: &str,
) -> RepositoryResult<()> {
    if from == to {
        return Err(RepositoryError::ValidationError(
            "Cannot send a friend request to yourself".to_string(),
        ));
    }
    repo.get_user(from).await?;
    repo.push_friend_request(to, from).await
}

/// Accept or decline a pending friend request. Accepting records the
/// friendship on both users; either way the request is consumed.
pub async fn respond_friend_request<R: FullRepository + ?Sized>(
    repo: &R,
    username: &str,
    from: &str,
    accept: bool,
) -> RepositoryResult<()> {
    repo.pull_friend_request(username, from).await?;
    if accept {
        repo.add_friendship(username, from).await?;
        info!(username, from, "friend request accepted");
    }
    Ok(())
}

/// Remove a friendship. Any match between the pair is removed as well,
/// since a match requires the friendship as precondition.
pub async fn remove_friend<R: FullRepository + ?Sized>(
    repo: &R,
    username: &str,
    friend: &str,
) -> RepositoryResult<()> {
    repo.remove_friendship(username, friend).await?;
    repo.delete_match(username, friend).await?;
    Ok(())
}

pub async fn list_friends<R: FullRepository + ?Sized>(
    repo: &R,
    username: &str,
) -> RepositoryResult<Vec<User>> {
    let user = repo.get_user(username).await?;
    let mut friends = Vec::with_capacity(user.friends.len());
    for friend in &user.friends {
        friends.push(repo.get_user(friend).await?);
    }
    Ok(friends)
}

pub async fn list_friend_requests<R: FullRepository + ?Sized>(
    repo: &R,
    username: &str,
) -> RepositoryResult<Vec<User>> {
    let user = repo.get_user(username).await?;
    let mut requesters = Vec::with_capacity(user.friend_requests.len());
    for requester in &user.friend_requests {
        requesters.push(repo.get_user(requester).await?);
    }
    Ok(requesters)
}

// ==================== Matches ====================

/// Request a schedule match with a friend. Requires an existing
/// friendship and no existing match record for the pair.
pub async fn request_match<R: FullRepository + ?Sized>(
    repo: &R,
    from: &str,
    friend: &str,
) -> RepositoryResult<ScheduleMatch> {
    let requester = repo.get_user(from).await?;
    if !requester.is_friend_of(friend) {
        return Err(RepositoryError::ValidationError(
            "Match requests can only be sent to friends".to_string(),
        ));
    }

    let schedule_match = ScheduleMatch::pending(from, friend);
    repo.insert_match(&schedule_match).await?;
    repo.push_match_request(friend, from).await?;
    info!(from, friend, "match requested");
    Ok(schedule_match)
}

/// Accept or decline a pending match request from `from`. Accepting
/// activates the match; declining deletes the record. The pending request
/// entry is consumed either way.
pub async fn respond_match_request<R: FullRepository + ?Sized>(
    repo: &R,
    username: &str,
    from: &str,
    accept: bool,
) -> RepositoryResult<Option<ScheduleMatch>> {
    repo.pull_match_request(username, from).await?;
    if accept {
        let activated = repo.activate_match(username, from, from).await?;
        info!(username, from, "match activated");
        Ok(Some(activated))
    } else {
        repo.delete_match(username, from).await?;
        Ok(None)
    }
}

/// Remove the match between two users. Either party may unmatch.
pub async fn unmatch<R: FullRepository + ?Sized>(
    repo: &R,
    username: &str,
    friend: &str,
) -> RepositoryResult<()> {
    if !repo.delete_match(username, friend).await? {
        return Err(RepositoryError::NotFound(format!(
            "No match between {} and {}",
            username, friend
        )));
    }
    Ok(())
}

pub async fn list_active_matches<R: FullRepository + ?Sized>(
    repo: &R,
    username: &str,
) -> RepositoryResult<Vec<ScheduleMatch>> {
    repo.list_matches_for(username, Some(MatchStatus::Active)).await
}

pub async fn list_match_requests<R: FullRepository + ?Sized>(
    repo: &R,
    username: &str,
) -> RepositoryResult<Vec<String>> {
    let user = repo.get_user(username).await?;
    Ok(user.match_requests)
}
