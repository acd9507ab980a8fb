//! Handlers for the arrays nested under a project.
//!
//! The same handlers serve images, templates and customized templates; the
//! route tree attaches the [`NestedCollection`] as a request extension.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use brandkit_core::nested::NestedCollection;
use brandkit_db::repositories::NestedRepo;
use serde_json::Value;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /projects/{project_id}/{nested}
pub async fn list(
    State(state): State<AppState>,
    Extension(kind): Extension<NestedCollection>,
    Path(project_id): Path<String>,
) -> AppResult<Json<Vec<Value>>> {
    let items = NestedRepo::list(&state.store, kind, &project_id).await?;
    Ok(Json(items))
}

/// POST /projects/{project_id}/{nested}
pub async fn create(
    State(state): State<AppState>,
    Extension(kind): Extension<NestedCollection>,
    Path(project_id): Path<String>,
    Json(body): Json<Value>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let record = NestedRepo::create(&state.store, kind, &project_id, body).await?;
    tracing::info!(
        %project_id,
        collection = kind.key(),
        record_id = %record["id"],
        "Nested record created"
    );
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /projects/{project_id}/{nested}/{record_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Extension(kind): Extension<NestedCollection>,
    Path((project_id, record_id)): Path<(String, String)>,
) -> AppResult<Json<Value>> {
    let record = NestedRepo::find_by_id(&state.store, kind, &project_id, &record_id).await?;
    Ok(Json(record))
}

/// PATCH /projects/{project_id}/{nested}/{record_id}
pub async fn update(
    State(state): State<AppState>,
    Extension(kind): Extension<NestedCollection>,
    Path((project_id, record_id)): Path<(String, String)>,
    Json(patch): Json<Value>,
) -> AppResult<Json<Value>> {
    let record = NestedRepo::update(&state.store, kind, &project_id, &record_id, patch).await?;
    tracing::info!(%project_id, collection = kind.key(), %record_id, "Nested record updated");
    Ok(Json(record))
}

/// DELETE /projects/{project_id}/{nested}/{record_id}
pub async fn delete(
    State(state): State<AppState>,
    Extension(kind): Extension<NestedCollection>,
    Path((project_id, record_id)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    NestedRepo::delete(&state.store, kind, &project_id, &record_id).await?;
    tracing::info!(%project_id, collection = kind.key(), %record_id, "Nested record deleted");
    Ok(StatusCode::NO_CONTENT)
}
