//! File-backed behaviour of `JsonStore`.

use std::sync::Arc;

use assert_matches::assert_matches;
use brandkit_core::error::CoreError;
use brandkit_db::{JsonStore, StoreError};
use serde_json::{json, Value};
use tempfile::TempDir;

async fn read_file(path: &std::path::Path) -> Value {
    let bytes = tokio::fs::read(path).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn open_creates_missing_file_as_empty_object() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("db.json");

    let store = JsonStore::open(&path).await.unwrap();

    assert_eq!(store.path(), Some(path.as_path()));
    assert_eq!(store.snapshot().await, json!({}));
    assert_eq!(read_file(&path).await, json!({}));
}

#[tokio::test]
async fn open_rejects_non_object_root() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("db.json");
    tokio::fs::write(&path, b"[1, 2, 3]").await.unwrap();

    let result = JsonStore::open(&path).await;
    assert_matches!(result, Err(StoreError::RootNotObject(_)));
}

#[tokio::test]
async fn open_reports_invalid_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("db.json");
    tokio::fs::write(&path, b"{ not json").await.unwrap();

    assert_matches!(JsonStore::open(&path).await, Err(StoreError::Json(_)));
}

#[tokio::test]
async fn update_persists_whole_document() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("db.json");
    tokio::fs::write(&path, br#"{"projects": [{"id": "1"}], "users": []}"#)
        .await
        .unwrap();
    let store = JsonStore::open(&path).await.unwrap();

    store
        .update(|root| {
            root.insert("settings".into(), json!({"theme": "dark"}));
            Ok(())
        })
        .await
        .unwrap();

    assert_eq!(
        read_file(&path).await,
        json!({"projects": [{"id": "1"}], "users": [], "settings": {"theme": "dark"}})
    );
    assert!(!dir.path().join("db.json.tmp").exists());
}

#[tokio::test]
async fn failed_update_changes_neither_memory_nor_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("db.json");
    tokio::fs::write(&path, br#"{"projects": []}"#).await.unwrap();
    let store = JsonStore::open(&path).await.unwrap();

    let result: Result<(), _> = store
        .update(|root| {
            root.insert("projects".into(), json!("clobbered"));
            Err(CoreError::ProjectNotFound)
        })
        .await;

    assert_matches!(result, Err(StoreError::Core(CoreError::ProjectNotFound)));
    assert_eq!(store.snapshot().await, json!({"projects": []}));
    assert_eq!(read_file(&path).await, json!({"projects": []}));
}

#[tokio::test]
async fn reopening_sees_previous_writes() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("db.json");
    {
        let store = JsonStore::open(&path).await.unwrap();
        store
            .update(|root| {
                root.insert("posts".into(), json!([{"id": 1, "title": "hello"}]));
                Ok(())
            })
            .await
            .unwrap();
    }

    let store = JsonStore::open(&path).await.unwrap();
    assert_eq!(store.collection_names().await, ["posts"]);
}

#[tokio::test]
async fn concurrent_updates_are_not_lost() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("db.json");
    tokio::fs::write(&path, br#"{"counter": {"n": 0}}"#).await.unwrap();
    let store = Arc::new(JsonStore::open(&path).await.unwrap());

    let mut handles = Vec::new();
    for _ in 0..25 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store
                .update(|root| {
                    let n = root["counter"]["n"].as_i64().unwrap_or(0);
                    root.insert("counter".into(), json!({"n": n + 1}));
                    Ok(())
                })
                .await
                .unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(store.snapshot().await["counter"]["n"], 25);
    assert_eq!(read_file(&path).await["counter"]["n"], 25);
}
