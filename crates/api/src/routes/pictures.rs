//! Route definitions for picture creation and lookup.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::pictures;
use crate::state::AppState;

/// ```text
/// GET  /load-pictures?category=<name>  -> load_pictures
/// POST /save                           -> save_picture
/// GET  /get?category=<prefix>          -> get_picture
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/load-pictures", get(pictures::load_pictures))
        .route("/save", post(pictures::save_picture))
        .route("/get", get(pictures::get_picture))
}
