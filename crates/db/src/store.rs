//! The picture record store.
//!
//! [`ImageStore`] wraps [`ImageRepo`] with the rules the HTTP layer relies
//! on: required fields are validated, URLs are hashed before they reach the
//! database, missing rows become [`CoreError::NotFound`], and prefix lookups
//! pick one match through a [`Selector`].
//!
//! Every operation takes an optional connection. Pass `Some(&mut *tx)` to
//! run inside a caller-owned transaction; pass `None` to use a pooled
//! connection. The store never begins or commits a transaction itself.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use picture_core::error::CoreError;
use picture_core::selection::{RandomSelector, Selector};
use picture_core::types::DbId;
use picture_core::url_hash::{hash_url, verify_url};
use picture_core::validation::require_non_empty;
use sqlx::pool::PoolConnection;
use sqlx::{Sqlite, SqliteConnection};

use crate::models::image::{CreateImage, Image, UpdateImage};
use crate::repositories::ImageRepo;
use crate::DbPool;

/// Entity name used in not-found errors.
const ENTITY: &str = "Image";

/// Errors returned by [`ImageStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Validation, not-found or verification failure.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Storage error passed through unchanged.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Either a caller-supplied connection or one checked out of the pool.
enum Conn<'a> {
    Borrowed(&'a mut SqliteConnection),
    Pooled(PoolConnection<Sqlite>),
}

impl Deref for Conn<'_> {
    type Target = SqliteConnection;

    fn deref(&self) -> &SqliteConnection {
        match self {
            Conn::Borrowed(conn) => conn,
            Conn::Pooled(conn) => conn,
        }
    }
}

impl DerefMut for Conn<'_> {
    fn deref_mut(&mut self) -> &mut SqliteConnection {
        match self {
            Conn::Borrowed(conn) => conn,
            Conn::Pooled(conn) => conn,
        }
    }
}

/// Durable storage and retrieval of picture records.
#[derive(Clone)]
pub struct ImageStore {
    pool: DbPool,
    selector: Arc<dyn Selector>,
}

impl ImageStore {
    /// Build a store that picks prefix matches uniformly at random.
    pub fn new(pool: DbPool) -> Self {
        Self::with_selector(pool, Arc::new(RandomSelector::new()))
    }

    /// Build a store with an explicit selection policy.
    pub fn with_selector(pool: DbPool, selector: Arc<dyn Selector>) -> Self {
        Self { pool, selector }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    async fn conn<'a>(&self, tx: Option<&'a mut SqliteConnection>) -> StoreResult<Conn<'a>> {
        match tx {
            Some(conn) => Ok(Conn::Borrowed(conn)),
            None => Ok(Conn::Pooled(self.pool.acquire().await?)),
        }
    }

    /// Create a record, storing a hash of `url`.
    ///
    /// Both fields are required. Returns the row as written, including its
    /// generated id.
    pub async fn create(
        &self,
        tx: Option<&mut SqliteConnection>,
        category: &str,
        url: &str,
    ) -> StoreResult<Image> {
        require_non_empty("Category", category)?;
        require_non_empty("URL", url)?;

        let input = CreateImage {
            category: category.to_string(),
            url_hash: hash_url(url)?,
        };

        let mut conn = self.conn(tx).await?;
        let image = ImageRepo::create(&mut *conn, &input).await?;
        tracing::debug!(image_id = image.id, category = %image.category, "Image created");
        Ok(image)
    }

    /// Fetch a record by id.
    pub async fn get_by_id(
        &self,
        tx: Option<&mut SqliteConnection>,
        id: DbId,
    ) -> StoreResult<Image> {
        let mut conn = self.conn(tx).await?;
        ImageRepo::find_by_id(&mut *conn, id)
            .await?
            .ok_or_else(|| not_found(format!("id {id}")))
    }

    /// Fetch the record with exactly this category (the newest one if
    /// several share it).
    pub async fn get_by_category(
        &self,
        tx: Option<&mut SqliteConnection>,
        category: &str,
    ) -> StoreResult<Image> {
        let mut conn = self.conn(tx).await?;
        ImageRepo::find_by_category(&mut *conn, category)
            .await?
            .ok_or_else(|| not_found(format!("category '{category}'")))
    }

    /// Pick one record whose category starts with `prefix`.
    ///
    /// Returns `Ok(None)` when nothing matches.
    pub async fn get_by_category_prefix(
        &self,
        tx: Option<&mut SqliteConnection>,
        prefix: &str,
    ) -> StoreResult<Option<Image>> {
        let mut conn = self.conn(tx).await?;
        let mut candidates = ImageRepo::list_by_category_prefix(&mut *conn, prefix).await?;

        let Some(idx) = self.selector.pick(candidates.len()) else {
            tracing::debug!(prefix, "No image matches category prefix");
            return Ok(None);
        };
        tracing::debug!(prefix, candidates = candidates.len(), idx, "Picked image by prefix");
        Ok(Some(candidates.swap_remove(idx)))
    }

    /// Fetch the record for `category` and check `url` against its stored
    /// hash.
    pub async fn verify_and_get_by_category(
        &self,
        tx: Option<&mut SqliteConnection>,
        category: &str,
        url: &str,
    ) -> StoreResult<Image> {
        let image = self.get_by_category(tx, category).await?;

        if !verify_url(url, &image.url)? {
            return Err(CoreError::Unauthorized(format!(
                "URL does not match the picture stored for category '{category}'"
            ))
            .into());
        }
        Ok(image)
    }

    /// Update the non-empty fields of a record and return it as stored.
    ///
    /// With both fields empty nothing is written and the record is re-read.
    pub async fn update_by_id(
        &self,
        tx: Option<&mut SqliteConnection>,
        id: DbId,
        category: &str,
        url: &str,
    ) -> StoreResult<Image> {
        let input = UpdateImage {
            category: (!category.is_empty()).then(|| category.to_string()),
            url_hash: if url.is_empty() { None } else { Some(hash_url(url)?) },
        };

        let mut conn = self.conn(tx).await?;
        let updated = if input.is_empty() {
            ImageRepo::find_by_id(&mut *conn, id).await?
        } else {
            ImageRepo::update(&mut *conn, id, &input).await?
        };

        let image = updated.ok_or_else(|| not_found(format!("id {id}")))?;
        tracing::debug!(
            image_id = id,
            category_changed = input.category.is_some(),
            url_changed = input.url_hash.is_some(),
            "Image updated"
        );
        Ok(image)
    }

    /// List every record ordered by id.
    pub async fn list_all(&self, tx: Option<&mut SqliteConnection>) -> StoreResult<Vec<Image>> {
        let mut conn = self.conn(tx).await?;
        Ok(ImageRepo::list(&mut *conn).await?)
    }
}

fn not_found(key: String) -> StoreError {
    CoreError::NotFound {
        entity: ENTITY,
        key,
    }
    .into()
}
