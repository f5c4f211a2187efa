use std::collections::{BTreeMap, HashSet};

use super::{FeatureScaler, LoadError, Regressor};

/// Display name used when the artifact does not carry one.
pub const UNKNOWN_MODEL_NAME: &str = "Unknown";

/// Metric reported as the headline figure in startup logs and health output.
pub const HEADLINE_METRIC: &str = "r2_test";

/// Immutable pricing model: scaler, regressor and the feature schema both
/// were fitted on.
///
/// Construction enforces that the scaler width, the model width and the
/// schema length all agree.
#[derive(Debug)]
pub struct ModelBundle {
    model: Box<dyn Regressor>,
    scaler: Box<dyn FeatureScaler>,
    feature_names: Vec<String>,
    metrics: BTreeMap<String, f64>,
    display_name: String,
}

impl ModelBundle {
    pub fn new(
        model: Box<dyn Regressor>,
        scaler: Box<dyn FeatureScaler>,
        feature_names: Vec<String>,
        metrics: BTreeMap<String, f64>,
        display_name: Option<String>,
    ) -> Result<Self, LoadError> {
        if feature_names.is_empty() {
            return Err(LoadError::Malformed("feature_names is empty".into()));
        }
        let mut seen = HashSet::with_capacity(feature_names.len());
        if let Some(dup) = feature_names.iter().find(|name| !seen.insert(name.as_str())) {
            return Err(LoadError::Malformed(format!(
                "feature name '{dup}' appears more than once"
            )));
        }

        let width = feature_names.len();
        if scaler.input_width() != width {
            return Err(LoadError::Malformed(format!(
                "scaler expects {} features but the schema lists {width}",
                scaler.input_width()
            )));
        }
        if model.input_width() != width {
            return Err(LoadError::Malformed(format!(
                "model expects {} features but the schema lists {width}",
                model.input_width()
            )));
        }

        Ok(Self {
            model,
            scaler,
            feature_names,
            metrics,
            display_name: display_name
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_MODEL_NAME.to_string()),
        })
    }

    /// Number of columns every input row must have.
    pub fn width(&self) -> usize {
        self.feature_names.len()
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn metrics(&self) -> &BTreeMap<String, f64> {
        &self.metrics
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn headline_metric(&self) -> Option<f64> {
        self.metrics.get(HEADLINE_METRIC).copied()
    }

    /// Scale one raw row and run the model on it.
    pub(crate) fn infer(&self, row: &[f64]) -> f64 {
        let scaled = self.scaler.transform(row);
        self.model.predict_row(&scaled)
    }
}
