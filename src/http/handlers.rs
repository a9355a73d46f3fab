//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic. The viewer is identified by the
//! `{username}` path segment.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;

use super::dto::{
    CreateUserRequest, FriendRequestBody, FriendRespondBody, HealthResponse, MatchRespondQuery,
    MessageResponse, PutScheduleRequest, ScheduleRangeQuery, SearchQuery, UpdateProfileRequest,
    UserDto, UserSearchResult,
};
use super::error::AppError;
use super::state::AppState;
use crate::db::services as db_services;
use crate::models::{DaySchedule, ScheduleMatch};
use crate::services::overlap::{compute_overlap, OverlapResult};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Verify the service is running and the storage backend is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let storage = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        storage,
    }))
}

// =============================================================================
// Users
// =============================================================================

/// POST /v1/users
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserDto>), AppError> {
    let user = db_services::register_user(
        state.repository.as_ref(),
        &request.username,
        &request.display_name,
        request.timezone.as_deref(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /v1/users/{username}
pub async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> HandlerResult<UserDto> {
    let user = db_services::get_user(state.repository.as_ref(), &username).await?;
    Ok(Json(user.into()))
}

/// PUT /v1/users/{username}
pub async fn update_profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(request): Json<UpdateProfileRequest>,
) -> HandlerResult<UserDto> {
    let user = db_services::update_profile(
        state.repository.as_ref(),
        &username,
        request.display_name,
        request.timezone,
    )
    .await?;
    Ok(Json(user.into()))
}

/// GET /v1/users/{username}/search?query=
pub async fn search_users(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(params): Query<SearchQuery>,
) -> HandlerResult<Vec<UserSearchResult>> {
    let results =
        db_services::search_users(state.repository.as_ref(), &username, &params.query).await?;
    Ok(Json(
        results
            .into_iter()
            .map(|(user, status)| UserSearchResult {
                username: user.username,
                display_name: user.display_name,
                timezone: user.timezone,
                friendship_status: status,
            })
            .collect(),
    ))
}

// =============================================================================
// Schedules
// =============================================================================

/// GET /v1/users/{username}/schedule/{date}
///
/// Returns the stored schedule, or the implicit default (available, no
/// intervals) when none was ever written.
pub async fn get_schedule(
    State(state): State<AppState>,
    Path((username, date)): Path<(String, NaiveDate)>,
) -> HandlerResult<DaySchedule> {
    db_services::get_user(state.repository.as_ref(), &username).await?;
    let schedule =
        db_services::get_schedule_or_default(state.repository.as_ref(), &username, date).await?;
    Ok(Json(schedule))
}

/// GET /v1/users/{username}/schedule?start_date=&end_date=
///
/// Stored schedules in the inclusive range; dates without a record are
/// omitted.
pub async fn get_schedule_range(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(range): Query<ScheduleRangeQuery>,
) -> HandlerResult<Vec<DaySchedule>> {
    db_services::get_user(state.repository.as_ref(), &username).await?;
    let schedules = db_services::get_schedule_range(
        state.repository.as_ref(),
        &username,
        range.start_date,
        range.end_date,
    )
    .await?;
    Ok(Json(schedules))
}

/// PUT /v1/users/{username}/schedule/{date}
pub async fn put_schedule(
    State(state): State<AppState>,
    Path((username, date)): Path<(String, NaiveDate)>,
    Json(request): Json<PutScheduleRequest>,
) -> HandlerResult<DaySchedule> {
    let schedule = DaySchedule {
        date,
        is_available: request.is_available,
        free_times: request.free_times,
        busy_times: request.busy_times,
    };
    let stored =
        db_services::put_schedule(state.repository.as_ref(), &username, &schedule).await?;
    Ok(Json(stored))
}

/// DELETE /v1/users/{username}/schedule/{date}
pub async fn delete_schedule(
    State(state): State<AppState>,
    Path((username, date)): Path<(String, NaiveDate)>,
) -> HandlerResult<MessageResponse> {
    db_services::delete_schedule(state.repository.as_ref(), &username, date).await?;
    Ok(Json(MessageResponse::new(format!(
        "Schedule for {} deleted",
        date
    ))))
}

// =============================================================================
// Friends
// =============================================================================

/// POST /v1/users/{username}/friends/request
pub async fn send_friend_request(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(body): Json<FriendRequestBody>,
) -> HandlerResult<MessageResponse> {
    db_services::send_friend_request(state.repository.as_ref(), &username, &body.to_username)
        .await?;
    Ok(Json(MessageResponse::new("Friend request sent")))
}

/// POST /v1/users/{username}/friends/respond
pub async fn respond_friend_request(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(body): Json<FriendRespondBody>,
) -> HandlerResult<MessageResponse> {
    db_services::respond_friend_request(
        state.repository.as_ref(),
        &username,
        &body.from_username,
        body.accept,
    )
    .await?;
    let message = if body.accept {
        "Friend request accepted"
    } else {
        "Friend request declined"
    };
    Ok(Json(MessageResponse::new(message)))
}

/// GET /v1/users/{username}/friends
pub async fn list_friends(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> HandlerResult<Vec<UserDto>> {
    let friends = db_services::list_friends(state.repository.as_ref(), &username).await?;
    Ok(Json(friends.into_iter().map(Into::into).collect()))
}

/// GET /v1/users/{username}/friends/requests
pub async fn list_friend_requests(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> HandlerResult<Vec<UserDto>> {
    let requesters =
        db_services::list_friend_requests(state.repository.as_ref(), &username).await?;
    Ok(Json(requesters.into_iter().map(Into::into).collect()))
}

/// DELETE /v1/users/{username}/friends/{friend}
pub async fn remove_friend(
    State(state): State<AppState>,
    Path((username, friend)): Path<(String, String)>,
) -> HandlerResult<MessageResponse> {
    db_services::remove_friend(state.repository.as_ref(), &username, &friend).await?;
    Ok(Json(MessageResponse::new("Friend removed")))
}

// =============================================================================
// Matches
// =============================================================================

/// POST /v1/users/{username}/matches/request/{friend}
pub async fn request_match(
    State(state): State<AppState>,
    Path((username, friend)): Path<(String, String)>,
) -> Result<(StatusCode, Json<ScheduleMatch>), AppError> {
    let schedule_match =
        db_services::request_match(state.repository.as_ref(), &username, &friend).await?;
    Ok((StatusCode::CREATED, Json(schedule_match)))
}

/// POST /v1/users/{username}/matches/respond/{friend}?accept=
pub async fn respond_match_request(
    State(state): State<AppState>,
    Path((username, friend)): Path<(String, String)>,
    Query(params): Query<MatchRespondQuery>,
) -> HandlerResult<Option<ScheduleMatch>> {
    let result = db_services::respond_match_request(
        state.repository.as_ref(),
        &username,
        &friend,
        params.accept,
    )
    .await?;
    Ok(Json(result))
}

/// GET /v1/users/{username}/matches
pub async fn list_matches(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> HandlerResult<Vec<ScheduleMatch>> {
    let matches = db_services::list_active_matches(state.repository.as_ref(), &username).await?;
    Ok(Json(matches))
}

/// GET /v1/users/{username}/matches/requests
pub async fn list_match_requests(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> HandlerResult<Vec<String>> {
    let requests = db_services::list_match_requests(state.repository.as_ref(), &username).await?;
    Ok(Json(requests))
}

/// DELETE /v1/users/{username}/matches/{friend}
pub async fn unmatch(
    State(state): State<AppState>,
    Path((username, friend)): Path<(String, String)>,
) -> HandlerResult<MessageResponse> {
    db_services::unmatch(state.repository.as_ref(), &username, &friend).await?;
    Ok(Json(MessageResponse::new("Match removed")))
}

/// GET /v1/users/{username}/matches/overlap/{friend}/{date}
///
/// Mutually-free intervals for the date, expressed in the viewer's
/// timezone. Requires an active match between the two users.
pub async fn get_overlap(
    State(state): State<AppState>,
    Path((username, friend, date)): Path<(String, String, NaiveDate)>,
) -> HandlerResult<OverlapResult> {
    let result = compute_overlap(state.repository.as_ref(), &username, &friend, date).await?;
    Ok(Json(result))
}
