use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use super::{artifact, ModelBundle};
use crate::error::CoreError;

/// Message returned by every accessor when no bundle is loaded.
pub const MODEL_NOT_LOADED: &str = "Model not loaded";

/// Process-wide holder of the pricing model.
///
/// Built once at startup and never mutated. When the artifact could not be
/// loaded the host is *degraded*: every accessor except [`ModelHost::health`]
/// fails with [`CoreError::Unavailable`].
#[derive(Debug)]
pub struct ModelHost {
    bundle: Option<ModelBundle>,
    unavailable_reason: Option<String>,
}

/// Liveness snapshot; always available, even when degraded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HostHealth {
    pub loaded: bool,
    pub model_name: Option<String>,
    pub features_count: usize,
}

impl ModelHost {
    /// Load the artifact at `path`, logging the outcome.
    ///
    /// Never fails: a missing or malformed artifact yields a degraded host.
    /// There is no retry; recovery requires a restart with a fixed artifact.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match artifact::load(path) {
            Ok(bundle) => {
                tracing::info!(
                    path = %path.display(),
                    model = bundle.display_name(),
                    features = bundle.width(),
                    r2_test = ?bundle.headline_metric(),
                    "Model artifact loaded",
                );
                Self::from_bundle(bundle)
            }
            Err(e) => {
                tracing::error!(
                    path = %path.display(),
                    error = %e,
                    "Failed to load model artifact, serving in degraded mode",
                );
                Self::unavailable(e.to_string())
            }
        }
    }

    pub fn from_bundle(bundle: ModelBundle) -> Self {
        Self {
            bundle: Some(bundle),
            unavailable_reason: None,
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            bundle: None,
            unavailable_reason: Some(reason.into()),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.bundle.is_some()
    }

    /// Why the bundle is missing, if it is.
    pub fn unavailable_reason(&self) -> Option<&str> {
        self.unavailable_reason.as_deref()
    }

    pub fn bundle(&self) -> Result<&ModelBundle, CoreError> {
        self.bundle
            .as_ref()
            .ok_or_else(|| CoreError::Unavailable(MODEL_NOT_LOADED.to_string()))
    }

    pub fn feature_names(&self) -> Result<&[String], CoreError> {
        Ok(self.bundle()?.feature_names())
    }

    pub fn metrics(&self) -> Result<&BTreeMap<String, f64>, CoreError> {
        Ok(self.bundle()?.metrics())
    }

    pub fn display_name(&self) -> Result<&str, CoreError> {
        Ok(self.bundle()?.display_name())
    }

    pub fn health(&self) -> HostHealth {
        match &self.bundle {
            Some(bundle) => HostHealth {
                loaded: true,
                model_name: Some(bundle.display_name().to_string()),
                features_count: bundle.width(),
            },
            None => HostHealth {
                loaded: false,
                model_name: None,
                features_count: 0,
            },
        }
    }
}
