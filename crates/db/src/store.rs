//! The JSON document store.
//!
//! The whole document lives in memory behind a [`RwLock`]. Every mutation
//! goes through [`JsonStore::update`], which holds the write lock for the
//! full read-modify-persist cycle, so concurrent writers are serialized and
//! the file on disk always matches memory.

use std::path::{Path, PathBuf};

use brandkit_core::error::CoreError;
use brandkit_core::types::Record;
use serde_json::Value;
use tokio::sync::RwLock;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Document root in {0} must be a JSON object")]
    RootNotObject(PathBuf),
}

impl StoreError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// In-memory JSON document, optionally mirrored to a file.
#[derive(Debug)]
pub struct JsonStore {
    path: Option<PathBuf>,
    root: RwLock<Record>,
}

impl JsonStore {
    /// Load the document at `path`, creating it as `{}` when missing.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let root = match tokio::fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice::<Value>(&bytes)? {
                Value::Object(map) => map,
                _ => return Err(StoreError::RootNotObject(path)),
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "Document not found, creating empty store");
                let root = Record::new();
                write_document(&path, &root).await?;
                root
            }
            Err(e) => return Err(StoreError::io(&path, e)),
        };

        tracing::debug!(
            path = %path.display(),
            collections = root.len(),
            "Document loaded"
        );

        Ok(Self {
            path: Some(path),
            root: RwLock::new(root),
        })
    }

    /// A store that never touches the filesystem.
    pub fn in_memory(root: Record) -> Self {
        Self {
            path: None,
            root: RwLock::new(root),
        }
    }

    /// Backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Run `f` against a shared borrow of the document root.
    pub async fn read<T>(&self, f: impl FnOnce(&Record) -> T) -> T {
        let root = self.root.read().await;
        f(&root)
    }

    /// Clone of the full document.
    pub async fn snapshot(&self) -> Value {
        Value::Object(self.root.read().await.clone())
    }

    /// Top-level keys in document order.
    pub async fn collection_names(&self) -> Vec<String> {
        self.read(|root| root.keys().cloned().collect()).await
    }

    /// Apply a mutation and persist the whole document.
    ///
    /// `f` runs on a draft copy. The draft replaces the live document only
    /// after `f` succeeds and the file write completes; on any error the
    /// live document is left untouched.
    pub async fn update<T>(
        &self,
        f: impl FnOnce(&mut Record) -> Result<T, CoreError>,
    ) -> Result<T, StoreError> {
        let mut root = self.root.write().await;
        let mut draft = root.clone();
        let out = f(&mut draft)?;
        if let Some(path) = &self.path {
            write_document(path, &draft).await?;
        }
        *root = draft;
        Ok(out)
    }
}

/// Write the document to a sibling temp file, then rename it into place.
async fn write_document(path: &Path, root: &Record) -> Result<(), StoreError> {
    let bytes = serde_json::to_vec_pretty(root)?;
    let tmp = temp_path(path);

    tokio::fs::write(&tmp, &bytes)
        .await
        .map_err(|e| StoreError::io(&tmp, e))?;
    tokio::fs::rename(&tmp, path)
        .await
        .map_err(|e| StoreError::io(path, e))?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Document persisted");
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
