//! Handlers for the login page and logout.

use axum::response::Html;
use axum_extra::extract::cookie::CookieJar;

use crate::response::Found;
use crate::session::cookie;
use crate::views::render_login;

/// GET /login
pub async fn login_page() -> Html<String> {
    Html(render_login())
}

/// GET /logout
///
/// Clear the session's current image and go back to the login page.
pub async fn logout(jar: CookieJar) -> (CookieJar, Found) {
    (cookie::clear(jar), Found("/login"))
}
