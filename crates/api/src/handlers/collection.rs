//! Handlers for the generic collection routes (`/{name}`, `/{name}/{id}`).
//!
//! The `*_named` functions carry the logic so the `/projects` routes can
//! reuse it with a fixed collection name.

use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::header::{HeaderName, HeaderValue, LINK};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use brandkit_core::listing::{ListPage, ListQuery, PageInfo};
use brandkit_db::repositories::{CollectionRepo, Listing};
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Response header carrying the match count before slicing.
pub const TOTAL_COUNT_HEADER: HeaderName = HeaderName::from_static("x-total-count");

/// GET /db
pub async fn database(State(state): State<AppState>) -> Json<Value> {
    Json(CollectionRepo::database(&state.store).await)
}

/// GET /{name}
pub async fn list(
    State(state): State<AppState>,
    Path(name): Path<String>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<Vec<(String, String)>>,
) -> AppResult<Response> {
    list_named(&state, &name, &uri, &params).await
}

/// POST /{name}
pub async fn create(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(body): Json<Value>,
) -> AppResult<(StatusCode, Json<Value>)> {
    create_named(&state, &name, body).await
}

/// PUT /{name} (singular resources only)
pub async fn replace_singular(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(body): Json<Value>,
) -> AppResult<Json<Value>> {
    let value = CollectionRepo::replace_singular(&state.store, &name, body).await?;
    Ok(Json(value))
}

/// PATCH /{name} (singular resources only)
pub async fn patch_singular(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(body): Json<Value>,
) -> AppResult<Json<Value>> {
    let value = CollectionRepo::patch_singular(&state.store, &name, body).await?;
    Ok(Json(value))
}

/// GET /{name}/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((name, id)): Path<(String, String)>,
) -> AppResult<Json<Value>> {
    get_named(&state, &name, &id).await
}

/// PUT /{name}/{id}
pub async fn replace(
    State(state): State<AppState>,
    Path((name, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> AppResult<Json<Value>> {
    replace_named(&state, &name, &id, body).await
}

/// PATCH /{name}/{id}
pub async fn patch(
    State(state): State<AppState>,
    Path((name, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> AppResult<Json<Value>> {
    let record = CollectionRepo::patch(&state.store, &name, &id, body).await?;
    tracing::info!(collection = %name, %id, "Record patched");
    Ok(Json(record))
}

/// DELETE /{name}/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path((name, id)): Path<(String, String)>,
) -> AppResult<Json<Value>> {
    delete_named(&state, &name, &id).await
}

// ---------------------------------------------------------------------------
// Shared implementations
// ---------------------------------------------------------------------------

pub async fn list_named(
    state: &AppState,
    name: &str,
    uri: &Uri,
    params: &[(String, String)],
) -> AppResult<Response> {
    let query = ListQuery::parse(params)?;
    match CollectionRepo::list(&state.store, name, &query).await? {
        Listing::Singular(value) => Ok(Json(value).into_response()),
        Listing::Collection(page) => page_response(uri, page),
    }
}

pub async fn create_named(
    state: &AppState,
    name: &str,
    body: Value,
) -> AppResult<(StatusCode, Json<Value>)> {
    let record = CollectionRepo::create(&state.store, name, body).await?;
    tracing::info!(collection = %name, id = %record["id"], "Record created");
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn get_named(state: &AppState, name: &str, id: &str) -> AppResult<Json<Value>> {
    let record = CollectionRepo::find_by_id(&state.store, name, id).await?;
    Ok(Json(record))
}

pub async fn replace_named(
    state: &AppState,
    name: &str,
    id: &str,
    body: Value,
) -> AppResult<Json<Value>> {
    let record = CollectionRepo::replace(&state.store, name, id, body).await?;
    tracing::info!(collection = %name, %id, "Record replaced");
    Ok(Json(record))
}

pub async fn delete_named(state: &AppState, name: &str, id: &str) -> AppResult<Json<Value>> {
    CollectionRepo::delete(&state.store, name, id).await?;
    tracing::info!(collection = %name, %id, "Record deleted");
    Ok(Json(json!({})))
}

/// Render a list page, adding `X-Total-Count` and `Link` when sliced.
fn page_response(uri: &Uri, page: ListPage) -> AppResult<Response> {
    let total = page.total;
    let sliced = page.sliced;
    let links = page.page.map(|info| link_header(uri, info));

    let mut response = Json(page.items).into_response();
    if sliced {
        response
            .headers_mut()
            .insert(TOTAL_COUNT_HEADER, HeaderValue::from(total));
    }
    if let Some(links) = links {
        let value = HeaderValue::from_str(&links)
            .map_err(|e| AppError::InternalError(format!("invalid Link header: {e}")))?;
        response.headers_mut().insert(LINK, value);
    }
    Ok(response)
}

/// Build a `Link` header with first/prev/next/last page URLs.
///
/// The original query string is kept as-is apart from `_page`.
pub fn link_header(uri: &Uri, info: PageInfo) -> String {
    let path = uri.path();
    let base: Vec<&str> = uri
        .query()
        .unwrap_or_default()
        .split('&')
        .filter(|pair| !pair.is_empty() && *pair != "_page" && !pair.starts_with("_page="))
        .collect();

    let url = |page: usize| {
        let mut pairs = base.clone();
        let page_pair = format!("_page={page}");
        pairs.push(&page_pair);
        format!("<{path}?{}>", pairs.join("&"))
    };

    let mut links = vec![format!("{}; rel=\"first\"", url(1))];
    if info.page > 1 {
        links.push(format!("{}; rel=\"prev\"", url(info.page - 1)));
    }
    if info.page < info.last_page {
        links.push(format!("{}; rel=\"next\"", url(info.page + 1)));
    }
    links.push(format!("{}; rel=\"last\"", url(info.last_page)));
    links.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_header_replaces_page_and_keeps_other_params() {
        let uri: Uri = "/posts?_page=2&_limit=5&author=ada".parse().unwrap();
        let header = link_header(
            &uri,
            PageInfo {
                page: 2,
                limit: 5,
                last_page: 3,
            },
        );
        assert_eq!(
            header,
            "</posts?_limit=5&author=ada&_page=1>; rel=\"first\", \
             </posts?_limit=5&author=ada&_page=1>; rel=\"prev\", \
             </posts?_limit=5&author=ada&_page=3>; rel=\"next\", \
             </posts?_limit=5&author=ada&_page=3>; rel=\"last\""
        );
    }

    #[test]
    fn single_page_has_only_first_and_last() {
        let uri: Uri = "/posts?_page=1".parse().unwrap();
        let header = link_header(
            &uri,
            PageInfo {
                page: 1,
                limit: 10,
                last_page: 1,
            },
        );
        assert_eq!(header, "</posts?_page=1>; rel=\"first\", </posts?_page=1>; rel=\"last\"");
    }
}
