use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use brandkit_core::error::CoreError;
use brandkit_db::StoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for persistence
/// failures, and adds HTTP-specific variants. Implements [`IntoResponse`] to
/// produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `brandkit_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A document store error.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The request is not allowed in the current server mode.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => classify_core_error(core),
            AppError::Store(StoreError::Core(core)) => classify_core_error(core),
            AppError::Store(err) => {
                tracing::error!(error = %err, "Document store error");
                internal()
            }
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Map a domain error to an HTTP status, error code, and message.
///
/// Every not-found kind is a 404 whose message is the error's display text
/// (`"Project not found"`, `"Image not found"`, ...).
fn classify_core_error(err: &CoreError) -> (StatusCode, &'static str, String) {
    match err {
        e if e.is_not_found() => (StatusCode::NOT_FOUND, "NOT_FOUND", e.to_string()),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        other => {
            tracing::error!(error = %other, "Internal core error");
            internal()
        }
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}
