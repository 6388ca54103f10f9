//! Handler for `/image/{id}` (update via POST/PUT, delete).
//!
//! HTML forms can only POST, so the effective method is taken from the
//! `_method` form field when present and from the request verb otherwise.

use axum::extract::rejection::{FormRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::Method;
use axum::response::{IntoResponse, Response};
use axum::Form;
use axum_extra::extract::cookie::CookieJar;
use picture_core::error::CoreError;
use picture_core::types::DbId;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::session::RequireImage;
use crate::response::Found;
use crate::session::{cookie, SessionImage};
use crate::state::AppState;

/// Form body for `/image/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct ImageForm {
    /// Method override (`post`, `put` or `delete`).
    #[serde(rename = "_method")]
    pub method: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub url: String,
}

/// POST|PUT|DELETE /image/{id}
pub async fn post_put_delete_image(
    State(state): State<AppState>,
    image_id: Result<Path<DbId>, PathRejection>,
    method: Method,
    jar: CookieJar,
    RequireImage(current): RequireImage,
    form: Result<Form<ImageForm>, FormRejection>,
) -> AppResult<Response> {
    let Path(image_id) = image_id.map_err(|rej| AppError::BadRequest(rej.body_text()))?;
    let form = match form {
        Ok(Form(form)) => form,
        // DELETE requests usually carry no body.
        Err(_) if method == Method::DELETE => ImageForm::default(),
        Err(rej) => return Err(AppError::BadRequest(rej.body_text())),
    };

    let effective = form
        .method
        .as_deref()
        .unwrap_or(method.as_str())
        .to_ascii_lowercase();

    match effective.as_str() {
        "" | "post" | "put" => update_image(&state, jar, &current, image_id, &form).await,
        "delete" => Err(AppError::Core(CoreError::NotImplemented(
            "DELETE method is not implemented.".into(),
        ))),
        other => Err(AppError::BadRequest(format!(
            "Unsupported method override '{other}'"
        ))),
    }
}

/// Update the session's current image and refresh the session with the
/// stored result.
async fn update_image(
    state: &AppState,
    jar: CookieJar,
    current: &SessionImage,
    image_id: DbId,
    form: &ImageForm,
) -> AppResult<Response> {
    if current.id != image_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Modifying another image is not allowed.".into(),
        )));
    }

    let image = state
        .store
        .update_by_id(None, current.id, &form.category, &form.url)
        .await?;
    tracing::info!(image_id = image.id, category = %image.category, "Picture updated");

    let jar = cookie::store_image(jar, &image, &state.config)?;
    Ok((jar, Found("/")).into_response())
}
