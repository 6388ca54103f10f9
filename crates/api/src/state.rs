use std::sync::Arc;

use picture_db::ImageStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: picture_db::DbPool,
    /// Picture record store (shares `pool`).
    pub store: ImageStore,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Build state around a pool, using the default random selection policy.
    pub fn new(pool: picture_db::DbPool, config: ServerConfig) -> Self {
        Self {
            store: ImageStore::new(pool.clone()),
            pool,
            config: Arc::new(config),
        }
    }
}
