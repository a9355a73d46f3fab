use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use schedmatch_rust::db::repositories::LocalRepository;
use schedmatch_rust::db::repository::FullRepository;
use schedmatch_rust::http::{create_router, AppState};

fn test_app() -> Router {
    let repo = Arc::new(LocalRepository::new()) as Arc<dyn FullRepository>;
    create_router(AppState::new(repo))
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = test_app();
    let response = app
        .oneshot(empty_request(Method::GET, "/health"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "connected");
}

#[tokio::test]
async fn test_create_and_fetch_user() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/v1/users",
            json!({"username": "alice", "display_name": "Alice", "timezone": "Europe/Madrid"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(empty_request(Method::GET, "/v1/users/alice"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["username"], "alice");
    assert_eq!(body["timezone"], "Europe/Madrid");
}

#[tokio::test]
async fn test_duplicate_user_is_conflict() {
    let app = test_app();
    let payload = json!({"username": "alice", "display_name": "Alice"});

    let first = app
        .clone()
        .oneshot(json_request(Method::POST, "/v1/users", payload.clone()))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .oneshot(json_request(Method::POST, "/v1/users", payload))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let body = body_json(second).await;
    assert_eq!(body["code"], "CONFLICT");
}

#[tokio::test]
async fn test_unknown_user_is_not_found() {
    let app = test_app();
    let response = app
        .oneshot(empty_request(Method::GET, "/v1/users/ghost"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_invalid_timezone_is_bad_request() {
    let app = test_app();
    let response = app
        .oneshot(json_request(
            Method::POST,
            "/v1/users",
            json!({"username": "alice", "display_name": "Alice", "timezone": "Nowhere/Void"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_schedule_roundtrip_over_http() {
    let app = test_app();
    app.clone()
        .oneshot(json_request(
            Method::POST,
            "/v1/users",
            json!({"username": "alice", "display_name": "Alice"}),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            Method::PUT,
            "/v1/users/alice/schedule/2024-06-01",
            json!({"free_times": [{"start": "09:00", "end": "12:00"}]}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(empty_request(
            Method::GET,
            "/v1/users/alice/schedule/2024-06-01",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["date"], "2024-06-01");
    assert_eq!(body["free_times"][0]["start"], "09:00");
    assert_eq!(body["free_times"][0]["end"], "12:00");
}

#[tokio::test]
async fn test_overlapping_slots_rejected_over_http() {
    let app = test_app();
    app.clone()
        .oneshot(json_request(
            Method::POST,
            "/v1/users",
            json!({"username": "alice", "display_name": "Alice"}),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(json_request(
            Method::PUT,
            "/v1/users/alice/schedule/2024-06-01",
            json!({"free_times": [
                {"start": "09:00", "end": "11:00"},
                {"start": "10:30", "end": "12:00"}
            ]}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_overlap_without_match_is_forbidden() {
    let app = test_app();
    for name in ["alice", "bob"] {
        app.clone()
            .oneshot(json_request(
                Method::POST,
                "/v1/users",
                json!({"username": name, "display_name": name}),
            ))
            .await
            .unwrap();
    }

    let response = app
        .oneshot(empty_request(
            Method::GET,
            "/v1/users/alice/matches/overlap/bob/2024-06-01",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_full_match_flow_over_http() {
    let app = test_app();
    for name in ["alice", "bob"] {
        app.clone()
            .oneshot(json_request(
                Method::POST,
                "/v1/users",
                json!({"username": name, "display_name": name}),
            ))
            .await
            .unwrap();
    }

    // Friend request and acceptance
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/v1/users/alice/friends/request",
            json!({"to_username": "bob"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/v1/users/bob/friends/respond",
            json!({"from_username": "alice", "accept": true}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Match request and acceptance
    let response = app
        .clone()
        .oneshot(empty_request(
            Method::POST,
            "/v1/users/alice/matches/request/bob",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(empty_request(
            Method::POST,
            "/v1/users/bob/matches/respond/alice?accept=true",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "active");

    // Overlap is now allowed (both schedules default to available/empty)
    let response = app
        .oneshot(empty_request(
            Method::GET,
            "/v1/users/alice/matches/overlap/bob/2024-06-01",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["date"], "2024-06-01");
    assert_eq!(body["overlaps"], json!([]));
}
