use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; the store and config are behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// The JSON document store.
    pub store: brandkit_db::DbStore,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
