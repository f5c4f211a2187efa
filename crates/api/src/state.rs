use std::sync::Arc;

use getaround_core::model::ModelHost;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything behind the `Arc`s is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Pricing model, possibly degraded if the artifact failed to load.
    pub host: Arc<ModelHost>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(host: ModelHost, config: ServerConfig) -> Self {
        Self {
            host: Arc::new(host),
            config: Arc::new(config),
        }
    }
}
