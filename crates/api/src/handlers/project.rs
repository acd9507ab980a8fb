//! Handlers for the `/projects` collection itself.
//!
//! Only the logo PATCH is project-specific; the rest delegate to the
//! generic collection handlers so the custom route does not shadow them.

use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use brandkit_core::merge;
use brandkit_core::types::PROJECTS;
use brandkit_db::repositories::ProjectRepo;
use serde_json::Value;

use crate::error::AppResult;
use crate::handlers::collection;
use crate::state::AppState;

/// PATCH /projects/{project_id}
///
/// Sets `logo` from the body; a body without `logo` clears it.
pub async fn update_logo(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Json(body): Json<Value>,
) -> AppResult<Json<Value>> {
    let logo = merge::require_object(body)?.shift_remove("logo");
    let project = ProjectRepo::set_logo(&state.store, &project_id, logo).await?;
    tracing::info!(%project_id, "Project logo updated");
    Ok(Json(project))
}

/// GET /projects
pub async fn list(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<Vec<(String, String)>>,
) -> AppResult<Response> {
    collection::list_named(&state, PROJECTS, &uri, &params).await
}

/// POST /projects
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> AppResult<(StatusCode, Json<Value>)> {
    collection::create_named(&state, PROJECTS, body).await
}

/// GET /projects/{project_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> AppResult<Json<Value>> {
    collection::get_named(&state, PROJECTS, &project_id).await
}

/// PUT /projects/{project_id}
pub async fn replace(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Json(body): Json<Value>,
) -> AppResult<Json<Value>> {
    collection::replace_named(&state, PROJECTS, &project_id, body).await
}

/// DELETE /projects/{project_id}
pub async fn delete(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> AppResult<Json<Value>> {
    collection::delete_named(&state, PROJECTS, &project_id).await
}
