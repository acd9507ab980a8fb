//! Route definitions for `/projects` and everything nested under a project.

use axum::routing::get;
use axum::{Extension, Router};
use brandkit_core::nested::NestedCollection;

use crate::handlers::{branding, nested, project};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /projects                                   -> list (generic)
/// POST   /projects                                   -> create (generic)
/// GET    /projects/{project_id}                      -> get_by_id (generic)
/// PUT    /projects/{project_id}                      -> replace (generic)
/// PATCH  /projects/{project_id}                      -> update_logo
/// DELETE /projects/{project_id}                      -> delete (generic)
///
/// GET    /projects/{project_id}/branding/colors      -> get_colors
/// PATCH  /projects/{project_id}/branding/colors      -> patch_colors
/// GET    /projects/{project_id}/branding/fonts       -> get_fonts
/// PATCH  /projects/{project_id}/branding/fonts       -> replace_fonts
///
/// GET    /projects/{project_id}/{nested}             -> nested::list
/// POST   /projects/{project_id}/{nested}             -> nested::create
/// GET    /projects/{project_id}/{nested}/{record_id} -> nested::get_by_id
/// PATCH  /projects/{project_id}/{nested}/{record_id} -> nested::update
/// DELETE /projects/{project_id}/{nested}/{record_id} -> nested::delete
/// ```
pub fn router() -> Router<AppState> {
    let mut router = Router::new()
        .route("/projects", get(project::list).post(project::create))
        .route(
            "/projects/{project_id}",
            get(project::get_by_id)
                .put(project::replace)
                .patch(project::update_logo)
                .delete(project::delete),
        )
        .route(
            "/projects/{project_id}/branding/colors",
            get(branding::get_colors).patch(branding::patch_colors),
        )
        .route(
            "/projects/{project_id}/branding/fonts",
            get(branding::get_fonts).patch(branding::replace_fonts),
        );

    for kind in NestedCollection::ALL {
        router = router.nest(
            &format!("/projects/{{project_id}}/{}", kind.key()),
            nested_routes(kind),
        );
    }

    router
}

/// CRUD routes for one nested collection.
fn nested_routes(kind: NestedCollection) -> Router<AppState> {
    Router::new()
        .route("/", get(nested::list).post(nested::create))
        .route(
            "/{record_id}",
            get(nested::get_by_id)
                .patch(nested::update)
                .delete(nested::delete),
        )
        .layer(Extension(kind))
}
