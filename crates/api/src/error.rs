use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use picture_core::error::CoreError;
use picture_db::StoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Every variant renders as the same generic JSON error body with status
/// 500; only the `code` field tells the failure kinds apart.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `picture_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Core(core) => AppError::Core(core),
            StoreError::Database(db) => AppError::Database(db),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (core.code(), "An internal error occurred".to_string())
                }
                CoreError::NotFound { entity, key } => {
                    (core.code(), format!("{entity} not found: {key}"))
                }
                CoreError::Validation(msg)
                | CoreError::Unauthorized(msg)
                | CoreError::Forbidden(msg)
                | CoreError::NotImplemented(msg) => (core.code(), msg.clone()),
            },

            AppError::Database(err) => classify_sqlx_error(err),

            AppError::BadRequest(msg) => ("BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                ("INTERNAL_ERROR", "An internal error occurred".to_string())
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an error code and a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (&'static str, String) {
    match err {
        sqlx::Error::RowNotFound => ("NOT_FOUND", "Resource not found".to_string()),
        other => {
            tracing::error!(error = %other, "Database error");
            ("DATABASE_ERROR", "A database error occurred".to_string())
        }
    }
}
