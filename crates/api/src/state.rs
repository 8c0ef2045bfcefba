use std::sync::Arc;

use mindtwin_core::progress::ProgressEngine;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: mindtwin_db::DbPool,
    /// Server configuration (JWT settings, progress rules).
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// A progress engine running the configured rules.
    pub fn engine(&self) -> ProgressEngine {
        ProgressEngine::new(self.config.progress)
    }
}
