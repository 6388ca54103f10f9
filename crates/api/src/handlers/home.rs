//! Handler for the dashboard at `/`.

use axum::response::{Html, IntoResponse, Response};

use crate::middleware::session::CurrentImage;
use crate::response::Found;
use crate::views::render_dashboard;

/// GET /
///
/// Render the dashboard for the session's current image, or send the client
/// to `/logout` when there is none.
pub async fn get_home(CurrentImage(image): CurrentImage) -> Response {
    match image {
        Some(image) => Html(render_dashboard(&image)).into_response(),
        None => Found("/logout").into_response(),
    }
}
