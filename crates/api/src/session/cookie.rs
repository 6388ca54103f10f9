//! Reading and writing the session cookie.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use picture_db::models::image::Image;

use super::token::{issue_token, validate_token, SessionImage};
use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};

pub const SESSION_COOKIE_NAME: &str = "picture-retriever-session";

/// Attach `image` to the session, replacing any previous current image.
pub fn store_image(jar: CookieJar, image: &Image, config: &ServerConfig) -> AppResult<CookieJar> {
    let token = issue_token(
        &SessionImage::from(image),
        &config.cookie_secret,
        config.session_max_age_days,
    )
    .map_err(|e| AppError::InternalError(format!("Failed to sign session: {e}")))?;

    let cookie = Cookie::build((SESSION_COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .secure(config.tls.is_some())
        .same_site(SameSite::Lax)
        .max_age(time::Duration::days(config.session_max_age_days))
        .build();

    Ok(jar.add(cookie))
}

/// Drop the session cookie.
pub fn clear(jar: CookieJar) -> CookieJar {
    let cookie = Cookie::build((SESSION_COOKIE_NAME, ""))
        .path("/")
        .max_age(time::Duration::ZERO)
        .build();
    jar.remove(cookie)
}

/// The current image in the session, if the cookie is present and valid.
///
/// A tampered, expired or otherwise unreadable cookie counts as no session.
pub fn current_image(jar: &CookieJar, secret: &str) -> Option<SessionImage> {
    let cookie = jar.get(SESSION_COOKIE_NAME)?;
    match validate_token(cookie.value(), secret) {
        Ok(claims) => Some(claims.image),
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring invalid session cookie");
            None
        }
    }
}
