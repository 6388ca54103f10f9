//! Handlers for creating and fetching pictures (`/save`, `/get`,
//! `/load-pictures`).

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use picture_core::error::CoreError;
use picture_core::validation::validate_category_file_name;
use picture_db::models::image::Image;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::{DataResponse, Found};
use crate::session::cookie;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /save`.
#[derive(Debug, Deserialize)]
pub struct SaveRequest {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub url: String,
}

/// Query string for `GET /get` and `GET /load-pictures`.
#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    #[serde(default)]
    pub category: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /save
///
/// Create a picture, check it back by category and url, and make it the
/// session's current image.
pub async fn save_picture(
    State(state): State<AppState>,
    jar: CookieJar,
    input: Result<Json<SaveRequest>, JsonRejection>,
) -> AppResult<(CookieJar, Found)> {
    let Json(input) = input.map_err(|rej| AppError::BadRequest(rej.body_text()))?;

    let created = state.store.create(None, &input.category, &input.url).await?;
    tracing::info!(image_id = created.id, category = %created.category, "Picture saved");

    let image = state
        .store
        .verify_and_get_by_category(None, &input.category, &input.url)
        .await?;

    let jar = cookie::store_image(jar, &image, &state.config)?;
    Ok((jar, Found("/")))
}

/// GET /get?category=<prefix>
///
/// Return a random picture whose category starts with the prefix, or
/// `null` when none does.
pub async fn get_picture(
    State(state): State<AppState>,
    query: Result<Query<CategoryQuery>, QueryRejection>,
) -> AppResult<Json<DataResponse<Option<Image>>>> {
    let Query(query) = query.map_err(|rej| AppError::BadRequest(rej.body_text()))?;
    let image = state
        .store
        .get_by_category_prefix(None, &query.category)
        .await?;
    Ok(Json(DataResponse { data: image }))
}

/// GET /load-pictures?category=<name>
///
/// Read `<pictures_dir>/<name>.json` (a JSON array of URLs) and create one
/// picture per entry, categorised `<name>_<index>`. All rows are written in
/// one transaction.
pub async fn load_pictures(
    State(state): State<AppState>,
    query: Result<Query<CategoryQuery>, QueryRejection>,
) -> AppResult<Json<DataResponse<Vec<Image>>>> {
    let Query(query) = query.map_err(|rej| AppError::BadRequest(rej.body_text()))?;
    let category = query.category;
    validate_category_file_name(&category)?;

    let path = state.config.pictures_dir.join(format!("{category}.json"));
    let bytes = tokio::fs::read(&path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AppError::Core(CoreError::NotFound {
                entity: "Picture list",
                key: format!("file {category}.json"),
            })
        } else {
            AppError::InternalError(format!("Failed to read {}: {e}", path.display()))
        }
    })?;

    let urls: Vec<String> = serde_json::from_slice(&bytes).map_err(|e| {
        AppError::BadRequest(format!("{category}.json is not a JSON list of URLs: {e}"))
    })?;

    let mut tx = state.pool.begin().await?;
    let mut created = Vec::with_capacity(urls.len());
    for (index, url) in urls.iter().enumerate() {
        let image = state
            .store
            .create(Some(&mut *tx), &format!("{category}_{index}"), url)
            .await?;
        created.push(image);
    }
    tx.commit().await?;

    tracing::info!(%category, count = created.len(), "Pictures loaded");
    Ok(Json(DataResponse { data: created }))
}
