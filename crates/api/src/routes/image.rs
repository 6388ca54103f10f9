//! Route definitions for the `/image` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::image;
use crate::state::AppState;

/// ```text
/// POST|PUT|DELETE /image/{id}  -> post_put_delete_image (requires session)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/image/{id}",
        post(image::post_put_delete_image)
            .put(image::post_put_delete_image)
            .delete(image::post_put_delete_image),
    )
}
