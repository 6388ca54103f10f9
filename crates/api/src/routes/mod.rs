pub mod health;
pub mod image;
pub mod pictures;
pub mod session;

use axum::Router;

use crate::state::AppState;

/// Build the application route tree.
///
/// Route hierarchy:
///
/// ```text
/// /                         dashboard (session)
/// /login                    save form
/// /logout                   clear session
///
/// /save                     create picture, start session (POST, JSON)
/// /get                      random picture by category prefix
/// /load-pictures            bulk create from <category>.json
///
/// /image/{id}               update (POST/PUT), delete (DELETE, unimplemented)
///
/// /health                   liveness + database check
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(session::router())
        .merge(pictures::router())
        .merge(image::router())
}
