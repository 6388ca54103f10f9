//! Repository for the `images` table.

use picture_core::types::DbId;
use sqlx::SqliteExecutor;

use crate::models::image::{CreateImage, Image, UpdateImage};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, category, url";

/// Provides SQL access to picture records.
pub struct ImageRepo;

impl ImageRepo {
    /// Insert a new image, returning the created row.
    pub async fn create<'e, E>(executor: E, input: &CreateImage) -> Result<Image, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO images (category, url)
             VALUES (?1, ?2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Image>(&query)
            .bind(&input.category)
            .bind(&input.url_hash)
            .fetch_one(executor)
            .await
    }

    /// Find an image by id.
    pub async fn find_by_id<'e, E>(executor: E, id: DbId) -> Result<Option<Image>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM images WHERE id = ?1");
        sqlx::query_as::<_, Image>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find the most recently created image with exactly this category.
    pub async fn find_by_category<'e, E>(
        executor: E,
        category: &str,
    ) -> Result<Option<Image>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM images
             WHERE category = ?1
             ORDER BY id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, Image>(&query)
            .bind(category)
            .fetch_optional(executor)
            .await
    }

    /// List every image whose category starts with `prefix`, ordered by id.
    ///
    /// The comparison is a literal, case-sensitive prefix test (`LIKE` would
    /// treat `%`/`_` as wildcards and ignore ASCII case).
    pub async fn list_by_category_prefix<'e, E>(
        executor: E,
        prefix: &str,
    ) -> Result<Vec<Image>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM images
             WHERE substr(category, 1, length(?1)) = ?1
             ORDER BY id"
        );
        sqlx::query_as::<_, Image>(&query)
            .bind(prefix)
            .fetch_all(executor)
            .await
    }

    /// List all images ordered by id.
    pub async fn list<'e, E>(executor: E) -> Result<Vec<Image>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM images ORDER BY id");
        sqlx::query_as::<_, Image>(&query).fetch_all(executor).await
    }

    /// Update an image. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update<'e, E>(
        executor: E,
        id: DbId,
        input: &UpdateImage,
    ) -> Result<Option<Image>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let query = format!(
            "UPDATE images SET
                category = COALESCE(?2, category),
                url = COALESCE(?3, url)
             WHERE id = ?1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Image>(&query)
            .bind(id)
            .bind(&input.category)
            .bind(&input.url_hash)
            .fetch_optional(executor)
            .await
    }
}
