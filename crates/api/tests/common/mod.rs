#![allow(dead_code)]

use std::path::Path;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use picture_api::config::ServerConfig;
use picture_api::router::build_app_router;
use picture_api::session::cookie::SESSION_COOKIE_NAME;
use picture_api::state::AppState;
use picture_db::DbPool;

pub const TEST_SECRET: &str = "integration-test-secret";

/// Build a test `ServerConfig`: fixed cookie secret, no TLS, and the given
/// directory for `<category>.json` picture lists.
pub fn test_config(pictures_dir: &Path) -> ServerConfig {
    let pictures_dir = pictures_dir.display().to_string();
    ServerConfig::from_lookup(|key| match key {
        "DSN" => Some("sqlite::memory:".to_string()),
        "COOKIE_SECRET" => Some(TEST_SECRET.to_string()),
        "HTTP_ADDR" => Some("127.0.0.1:0".to_string()),
        "PICTURES_DIR" => Some(pictures_dir.clone()),
        "STATIC_DIR" => Some("/nonexistent-static-dir".to_string()),
        _ => None,
    })
    .unwrap()
}

/// A fresh in-memory database with migrations applied.
pub async fn test_pool() -> DbPool {
    let pool = picture_db::create_pool("sqlite::memory:").await.unwrap();
    picture_db::run_migrations(&pool).await.unwrap();
    pool
}

/// Build the full application router, reading picture lists from the
/// current directory.
pub fn build_test_app(pool: DbPool) -> Router {
    build_test_app_with_pictures(pool, Path::new("."))
}

/// Build the full application router with the same middleware stack
/// production uses.
pub fn build_test_app_with_pictures(pool: DbPool, pictures_dir: &Path) -> Router {
    build_app_router(AppState::new(pool, test_config(pictures_dir)))
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    get_with_cookie(app, uri, None).await
}

pub async fn get_with_cookie(app: Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    send(app, builder.body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    send(app, request).await
}

/// Send a urlencoded form, optionally with a session cookie.
pub async fn send_form(
    app: Router,
    method: Method,
    uri: &str,
    form: &str,
    cookie: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    send(app, builder.body(Body::from(form.to_string())).unwrap()).await
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn location(response: &Response<Body>) -> Option<&str> {
    response.headers().get(LOCATION).and_then(|v| v.to_str().ok())
}

/// The session cookie set by `response`, as a `name=value` pair ready to be
/// sent back in a `Cookie` header.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .find(|pair| pair.starts_with(&format!("{SESSION_COOKIE_NAME}=")))
        .map(str::to_string)
}

/// Assert a 500 error body with the given `code`.
pub async fn assert_error_code(response: Response<Body>, code: &str) -> serde_json::Value {
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], code);
    json
}

/// Save a picture through `/save` and return the session cookie it sets.
pub async fn save_and_login(app: Router, category: &str, url: &str) -> String {
    let response = post_json(
        app,
        "/save",
        serde_json::json!({ "category": category, "url": url }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FOUND);
    session_cookie(&response).expect("save should set the session cookie")
}
