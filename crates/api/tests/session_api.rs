//! Integration tests for the dashboard, login page and logout.

mod common;

use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use common::{
    body_text, build_test_app, get, get_with_cookie, location, save_and_login, session_cookie,
    test_pool,
};

#[tokio::test]
async fn home_without_session_redirects_to_logout() {
    let app = build_test_app(test_pool().await);

    let response = get(app, "/").await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), Some("/logout"));
}

#[tokio::test]
async fn home_with_session_renders_dashboard() {
    let app = build_test_app(test_pool().await);
    let cookie = save_and_login(app.clone(), "dogs", "http://x/a.png").await;

    let response = get_with_cookie(app, "/", Some(&cookie)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("action=\"/image/1\""));
    assert!(html.contains("<dd id=\"image-category\">dogs</dd>"));
}

#[tokio::test]
async fn cookie_signed_with_another_secret_is_ignored() {
    let app = build_test_app(test_pool().await);
    let image = picture_api::session::SessionImage {
        id: 1,
        category: "dogs".to_string(),
    };
    let token = picture_api::session::token::issue_token(&image, "some-other-secret", 1).unwrap();
    let cookie = format!("{}={token}", picture_api::session::cookie::SESSION_COOKIE_NAME);

    let response = get_with_cookie(app, "/", Some(&cookie)).await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), Some("/logout"));
}

#[tokio::test]
async fn logout_clears_session_and_redirects_to_login() {
    let app = build_test_app(test_pool().await);
    let cookie = save_and_login(app.clone(), "dogs", "http://x/a.png").await;

    let response = get_with_cookie(app, "/logout", Some(&cookie)).await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), Some("/login"));
    assert_eq!(
        session_cookie(&response).as_deref(),
        Some("picture-retriever-session=")
    );
    let header = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
    assert!(header.contains("Max-Age=0"));
}

#[tokio::test]
async fn login_page_renders_save_form() {
    let app = build_test_app(test_pool().await);

    let response = get(app, "/login").await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("id=\"save-form\""));
}
