//! Route definitions for the dashboard, login page and logout.

use axum::routing::get;
use axum::Router;

use crate::handlers::{home, session};
use crate::state::AppState;

/// ```text
/// GET /        -> get_home (redirects to /logout without a session)
/// GET /login   -> login_page
/// GET /logout  -> logout
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home::get_home))
        .route("/login", get(session::login_page))
        .route("/logout", get(session::logout))
}
