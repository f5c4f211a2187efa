use std::sync::Arc;

use getaround_core::delay::DelayDataset;
use getaround_core::error::CoreError;

use crate::config::ServerConfig;
use crate::dataset::DatasetError;

/// Shared application state available to all Axum handlers via `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    /// The loaded dataset, or why it could not be loaded.
    dataset: Result<Arc<DelayDataset>, String>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(dataset: DelayDataset, config: ServerConfig) -> Self {
        Self {
            dataset: Ok(Arc::new(dataset)),
            config: Arc::new(config),
        }
    }

    /// State for a dataset that failed to load; analytics answer 503.
    pub fn unavailable(error: &DatasetError, config: ServerConfig) -> Self {
        Self {
            dataset: Err(error.to_string()),
            config: Arc::new(config),
        }
    }

    /// Build from the outcome of [`crate::dataset::load`], logging it.
    pub fn from_load(result: Result<DelayDataset, DatasetError>, config: ServerConfig) -> Self {
        match result {
            Ok(dataset) => {
                tracing::info!(
                    path = %config.dataset_path.display(),
                    rows = dataset.len(),
                    checkin_types = ?dataset.categories(),
                    "Delay dataset loaded",
                );
                Self::new(dataset, config)
            }
            Err(e) => {
                tracing::error!(
                    path = %config.dataset_path.display(),
                    error = %e,
                    "Failed to load delay dataset, serving in degraded mode",
                );
                Self::unavailable(&e, config)
            }
        }
    }

    pub fn dataset(&self) -> Result<&DelayDataset, CoreError> {
        self.dataset
            .as_deref()
            .map_err(|reason| CoreError::Unavailable(reason.clone()))
    }
}
