//! Handlers for `/projects/{project_id}/branding/{colors,fonts}`.

use axum::extract::{Path, State};
use axum::Json;
use brandkit_core::merge;
use brandkit_db::repositories::ProjectRepo;
use serde_json::Value;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /projects/{project_id}/branding/colors
pub async fn get_colors(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> AppResult<Json<Value>> {
    let colors = ProjectRepo::branding_colors(&state.store, &project_id).await?;
    Ok(Json(colors))
}

/// PATCH /projects/{project_id}/branding/colors
///
/// Body: `{ "brandingColors": { ... } }`, merged key by key into the
/// existing colors.
pub async fn patch_colors(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Json(body): Json<Value>,
) -> AppResult<Json<Value>> {
    let patch = merge::require_object(body)?
        .shift_remove("brandingColors")
        .unwrap_or(Value::Null);
    let colors = ProjectRepo::merge_branding_colors(&state.store, &project_id, patch).await?;
    tracing::info!(%project_id, "Branding colors updated");
    Ok(Json(colors))
}

/// GET /projects/{project_id}/branding/fonts
pub async fn get_fonts(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> AppResult<Json<Value>> {
    let fonts = ProjectRepo::branding_fonts(&state.store, &project_id).await?;
    Ok(Json(fonts))
}

/// PATCH /projects/{project_id}/branding/fonts
///
/// The body is the new fonts object; it replaces the old one entirely.
pub async fn replace_fonts(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Json(body): Json<Value>,
) -> AppResult<Json<Value>> {
    let fonts = ProjectRepo::replace_branding_fonts(&state.store, &project_id, body).await?;
    tracing::info!(%project_id, "Branding fonts replaced");
    Ok(Json(fonts))
}
