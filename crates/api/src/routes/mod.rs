pub mod collection;
pub mod health;
pub mod project;

use axum::Router;

use crate::state::AppState;

/// Build the API route tree.
///
/// Project routes are merged first; their static `/projects` prefix takes
/// precedence over the generic `/{name}` patterns.
///
/// ```text
/// /projects/{id}                                   GET, PUT, DELETE (generic), PATCH (logo)
/// /projects/{id}/branding/colors                   GET, PATCH (merge)
/// /projects/{id}/branding/fonts                    GET, PATCH (replace)
/// /projects/{id}/images[/{image_id}]               nested CRUD
/// /projects/{id}/templates[/{template_id}]         nested CRUD
/// /projects/{id}/customized-templates[/{id}]       nested CRUD
///
/// /db                                              whole document
/// /{name}                                          list, create, singular replace/merge
/// /{name}/{id}                                     get, replace, merge, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(project::router())
        .merge(collection::router())
}
