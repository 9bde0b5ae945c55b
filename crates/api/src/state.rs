use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// Cheaply cloneable: the database handle is reference-counted inside the
/// driver and the config sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Handle to the application database, backed by the process-wide
    /// client established at startup.
    pub db: mongodb::Database,
    /// Server configuration (read by middleware and handlers).
    pub config: Arc<ServerConfig>,
}
