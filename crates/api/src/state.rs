use std::sync::Arc;

use crate::config::ServerConfig;
use crate::storage::ObjectStorage;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// Every external client is built once in `main` and injected here.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: pilakon_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Object storage for uploaded files.
    pub storage: Arc<dyn ObjectStorage>,
}
