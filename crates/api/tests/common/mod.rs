#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use brandkit_api::config::ServerConfig;
use brandkit_api::router::{build_app_router, App};
use brandkit_api::state::AppState;
use brandkit_db::JsonStore;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        db_path: "unused.json".into(),
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        read_only: false,
    }
}

/// A seeded document with one fully populated project and one bare project.
pub fn seed_document() -> Value {
    json!({
        "projects": [
            {
                "id": "p1",
                "name": "Acme",
                "logo": "acme.png",
                "branding": {
                    "colors": {"primary": "#000000", "secondary": "#ffffff"},
                    "fonts": {"heading": "Georgia"}
                },
                "images": [{"id": "img-1", "url": "hero.png"}],
                "templates": [{"id": "tpl-1", "name": "Landing"}],
                "customized-templates": [{"id": "ct-1", "name": "Landing (dark)"}]
            },
            {"id": "p2", "name": "Bare"}
        ],
        "posts": [
            {"id": 1, "title": "alpha", "author": "ada"},
            {"id": 2, "title": "beta", "author": "grace"},
            {"id": 3, "title": "gamma", "author": "ada"}
        ],
        "profile": {"name": "mock"}
    })
}

/// In-process application over a document store.
pub struct TestApp {
    pub store: Arc<JsonStore>,
    pub router: App,
}

impl TestApp {
    pub fn new(doc: Value) -> Self {
        Self::with_config(doc, test_config())
    }

    pub fn with_config(doc: Value, config: ServerConfig) -> Self {
        let store = JsonStore::in_memory(doc.as_object().cloned().expect("seed must be an object"));
        Self::with_store(store, config)
    }

    /// Application over a document file, written from `doc` first.
    pub async fn with_file(path: &Path, doc: Value) -> Self {
        tokio::fs::write(path, serde_json::to_vec_pretty(&doc).unwrap())
            .await
            .unwrap();
        let store = JsonStore::open(path).await.unwrap();
        let config = ServerConfig {
            db_path: path.to_path_buf(),
            ..test_config()
        };
        Self::with_store(store, config)
    }

    fn with_store(store: JsonStore, config: ServerConfig) -> Self {
        let store = Arc::new(store);
        let state = AppState {
            store: Arc::clone(&store),
            config: Arc::new(config.clone()),
        };
        let router = build_app_router(state, &config);
        Self { store, router }
    }

    pub fn seeded() -> Self {
        Self::new(seed_document())
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> Response<Body> {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put_json(&self, uri: &str, body: Value) -> Response<Body> {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn patch_json(&self, uri: &str, body: Value) -> Response<Body> {
        self.request(Method::PATCH, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> Response<Body> {
        self.request(Method::DELETE, uri, None).await
    }
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}
