//! Read-only mode guard.

use axum::extract::{Request, State};
use axum::http::Method;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::error::AppError;
use crate::state::AppState;

/// Reject mutating requests when the server runs with `READ_ONLY=true`.
///
/// `GET`, `HEAD` and `OPTIONS` always pass so CORS preflights keep working.
pub async fn read_only_guard(State(state): State<AppState>, req: Request, next: Next) -> Response {
    if state.config.read_only && !is_safe(req.method()) {
        tracing::debug!(method = %req.method(), path = %req.uri().path(), "Rejected in read-only mode");
        return AppError::Forbidden("Server is running in read-only mode".into()).into_response();
    }
    next.run(req).await
}

fn is_safe(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}
