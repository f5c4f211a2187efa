//! Pricing model bundle: fitted scaler, fitted regressor and the ordered
//! feature schema they were trained on.
//!
//! The bundle is loaded once from a JSON artifact (see [`artifact`]) and is
//! read-only afterwards. [`ModelHost`] wraps the loaded-or-not state that
//! the serving layer holds for the lifetime of the process.

pub mod artifact;
pub mod bundle;
pub mod host;
pub mod regressor;
pub mod scaler;

use std::path::PathBuf;

pub use bundle::ModelBundle;
pub use host::{HostHealth, ModelHost};
pub use regressor::{GradientBoosting, LinearRegressor, RandomForest, RegressionTree, Regressor};
pub use scaler::{FeatureScaler, MinMaxScaler, StandardScaler};

/// Reasons a model artifact could not be turned into a [`ModelBundle`].
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("model artifact not found at {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("malformed model artifact: {0}")]
    Malformed(String),
}

/// Reject any non-finite entry in `values`, naming the offending field.
pub(crate) fn ensure_finite(values: &[f64], field: &str) -> Result<(), LoadError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(idx) => Err(LoadError::Malformed(format!(
            "{field}[{idx}] is not a finite number"
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::BTreeMap;

    use super::*;

    /// Feature names `f0..f{width}`.
    pub fn feature_names(width: usize) -> Vec<String> {
        (0..width).map(|i| format!("f{i}")).collect()
    }

    /// A bundle with an identity standard scaler and the given linear model.
    pub fn linear_bundle(coefficients: Vec<f64>, intercept: f64) -> ModelBundle {
        let width = coefficients.len();
        let scaler = StandardScaler::new(vec![0.0; width], vec![1.0; width])
            .expect("identity scaler is valid");
        let model =
            LinearRegressor::new(coefficients, intercept).expect("linear model is valid");
        ModelBundle::new(
            Box::new(model),
            Box::new(scaler),
            feature_names(width),
            BTreeMap::from([("r2_test".to_string(), 0.73)]),
            Some("Test Linear".to_string()),
        )
        .expect("widths agree")
    }
}
