use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Number of top-level keys in the document.
    pub collections: usize,
}

/// GET /health -- returns service status and document summary.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let collections = brandkit_db::health_check(&state.store).await;

    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        collections,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
