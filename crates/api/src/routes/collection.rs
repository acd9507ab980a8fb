//! Route definitions for the generic collection routes.

use axum::routing::get;
use axum::Router;

use crate::handlers::collection;
use crate::state::AppState;

/// ```text
/// GET    /db          -> database
/// GET    /{name}      -> list
/// POST   /{name}      -> create
/// PUT    /{name}      -> replace_singular
/// PATCH  /{name}      -> patch_singular
/// GET    /{name}/{id} -> get_by_id
/// PUT    /{name}/{id} -> replace
/// PATCH  /{name}/{id} -> patch
/// DELETE /{name}/{id} -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/db", get(collection::database))
        .route(
            "/{name}",
            get(collection::list)
                .post(collection::create)
                .put(collection::replace_singular)
                .patch(collection::patch_singular),
        )
        .route(
            "/{name}/{id}",
            get(collection::get_by_id)
                .put(collection::replace)
                .patch(collection::patch)
                .delete(collection::delete),
        )
}
