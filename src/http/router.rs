//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, tracing), and
//! creates the axum router ready for serving.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the API router with versioned endpoints
    let api_v1 = Router::new()
        // Users
        .route("/users", post(handlers::create_user))
        .route("/users/{username}", get(handlers::get_user))
        .route("/users/{username}", put(handlers::update_profile))
        .route("/users/{username}/search", get(handlers::search_users))
        // Schedules
        .route("/users/{username}/schedule", get(handlers::get_schedule_range))
        .route("/users/{username}/schedule/{date}", get(handlers::get_schedule))
        .route("/users/{username}/schedule/{date}", put(handlers::put_schedule))
        .route("/users/{username}/schedule/{date}", delete(handlers::delete_schedule))
        // Friends
        .route("/users/{username}/friends", get(handlers::list_friends))
        .route("/users/{username}/friends/request", post(handlers::send_friend_request))
        .route("/users/{username}/friends/respond", post(handlers::respond_friend_request))
        .route("/users/{username}/friends/requests", get(handlers::list_friend_requests))
        .route("/users/{username}/friends/{friend}", delete(handlers::remove_friend))
        // Matches
        .route("/users/{username}/matches", get(handlers::list_matches))
        .route("/users/{username}/matches/request/{friend}", post(handlers::request_match))
        .route("/users/{username}/matches/respond/{friend}", post(handlers::respond_match_request))
        .route("/users/{username}/matches/requests", get(handlers::list_match_requests))
        .route("/users/{username}/matches/{friend}", delete(handlers::unmatch))
        .route(
            "/users/{username}/matches/overlap/{friend}/{date}",
            get(handlers::get_overlap),
        );

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
