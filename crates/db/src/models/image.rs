//! Picture record model and DTOs for the `images` table.

use picture_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `images` table.
///
/// `url` is the stored Argon2id hash of the picture URL, not the URL itself.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Image {
    pub id: DbId,
    pub category: String,
    pub url: String,
}

/// DTO for inserting a new image. `url_hash` must already be hashed.
#[derive(Debug, Clone)]
pub struct CreateImage {
    pub category: String,
    pub url_hash: String,
}

/// DTO for a partial update. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateImage {
    pub category: Option<String>,
    pub url_hash: Option<String>,
}

impl UpdateImage {
    /// `true` when neither field is set.
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.url_hash.is_none()
    }
}
