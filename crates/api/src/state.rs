use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: alinea_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Todoist client; `None` when the integration is not configured.
    pub todoist: Option<Arc<alinea_notify::TodoistClient>>,
}
