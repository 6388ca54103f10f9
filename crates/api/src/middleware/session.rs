//! Session extractors for Axum handlers.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use crate::response::Found;
use crate::session::cookie::current_image;
use crate::session::SessionImage;
use crate::state::AppState;

/// The session's current image, or `None` when there is no valid session.
#[derive(Debug, Clone)]
pub struct CurrentImage(pub Option<SessionImage>);

impl FromRequestParts<AppState> for CurrentImage {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        Ok(CurrentImage(current_image(&jar, &state.config.cookie_secret)))
    }
}

/// The session's current image; requests without one are redirected to
/// `/logout`.
///
/// ```ignore
/// async fn my_handler(RequireImage(image): RequireImage) -> AppResult<Json<()>> {
///     tracing::info!(image_id = image.id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireImage(pub SessionImage);

impl FromRequestParts<AppState> for RequireImage {
    type Rejection = Found;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentImage(image) = match CurrentImage::from_request_parts(parts, state).await {
            Ok(current) => current,
            Err(never) => match never {},
        };
        image.map(RequireImage).ok_or_else(|| {
            tracing::debug!(path = %parts.uri.path(), "No session image, redirecting to logout");
            Found("/logout")
        })
    }
}
