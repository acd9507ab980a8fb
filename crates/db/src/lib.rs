//! JSON-file document store and the repositories that operate on it.

pub mod repositories;
pub mod store;

pub use store::{JsonStore, StoreError};

/// Shared handle to the document store.
pub type DbStore = std::sync::Arc<JsonStore>;

/// Open (or create) the backing file and wrap it for sharing across handlers.
pub async fn open_store(path: impl Into<std::path::PathBuf>) -> Result<DbStore, StoreError> {
    Ok(std::sync::Arc::new(JsonStore::open(path).await?))
}

/// Confirm the in-memory document is readable and return its collection count.
pub async fn health_check(store: &JsonStore) -> usize {
    store.read(|root| root.len()).await
}
