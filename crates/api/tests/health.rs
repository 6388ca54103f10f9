//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, test_pool};

#[tokio::test]
async fn health_check_returns_ok_with_json() {
    let app = build_test_app(test_pool().await);
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["db_healthy"], true);
}

#[tokio::test]
async fn unknown_route_falls_through_to_static_files() {
    let app = build_test_app(test_pool().await);
    let response = get(app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn static_files_are_served_for_unmatched_paths() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("app.css"), "body { color: red; }").unwrap();
    let config = picture_api::config::ServerConfig::from_lookup(|key| match key {
        "COOKIE_SECRET" => Some(common::TEST_SECRET.to_string()),
        "STATIC_DIR" => Some(dir.path().display().to_string()),
        _ => None,
    })
    .unwrap();
    let state = picture_api::state::AppState::new(test_pool().await, config);
    let app = picture_api::router::build_app_router(state);

    let response = get(app, "/app.css").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(common::body_text(response).await, "body { color: red; }");
}

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let app = build_test_app(test_pool().await);
    let response = get(app, "/health").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("response should contain x-request-id header");
    assert!(!request_id.to_str().unwrap().is_empty());
}
