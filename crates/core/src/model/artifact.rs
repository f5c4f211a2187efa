//! JSON model artifact format and loader.
//!
//! ```json
//! {
//!   "model_name": "Linear Regression",
//!   "feature_names": ["mileage", "engine_power", "..."],
//!   "metrics": { "r2_test": 0.70, "rmse_test": 17.9 },
//!   "scaler": { "kind": "standard", "mean": [...], "scale": [...] },
//!   "model":  { "kind": "linear", "coefficients": [...], "intercept": 121.0 }
//! }
//! ```
//!
//! `model.kind` may also be `random_forest` or `gradient_boosting`, both
//! carrying `n_features` and a `trees` array in flat node layout.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use super::{
    FeatureScaler, GradientBoosting, LinearRegressor, LoadError, MinMaxScaler, ModelBundle,
    RandomForest, RegressionTree, Regressor, StandardScaler,
};

/// Top-level artifact document.
#[derive(Debug, Deserialize)]
pub struct ModelArtifact {
    pub model: RegressorArtifact,
    pub scaler: ScalerArtifact,
    pub feature_names: Vec<String>,
    #[serde(default)]
    pub metrics: BTreeMap<String, f64>,
    #[serde(default)]
    pub model_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalerArtifact {
    Standard { mean: Vec<f64>, scale: Vec<f64> },
    MinMax { min: Vec<f64>, scale: Vec<f64> },
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegressorArtifact {
    Linear {
        coefficients: Vec<f64>,
        intercept: f64,
    },
    RandomForest {
        n_features: usize,
        trees: Vec<TreeArtifact>,
    },
    GradientBoosting {
        n_features: usize,
        init: f64,
        learning_rate: f64,
        trees: Vec<TreeArtifact>,
    },
}

#[derive(Debug, Deserialize)]
pub struct TreeArtifact {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<f64>,
}

impl ScalerArtifact {
    fn build(self) -> Result<Box<dyn FeatureScaler>, LoadError> {
        Ok(match self {
            Self::Standard { mean, scale } => Box::new(StandardScaler::new(mean, scale)?),
            Self::MinMax { min, scale } => Box::new(MinMaxScaler::new(min, scale)?),
        })
    }
}

impl TreeArtifact {
    fn build(&self, width: usize) -> Result<RegressionTree, LoadError> {
        RegressionTree::from_arrays(
            &self.children_left,
            &self.children_right,
            &self.feature,
            &self.threshold,
            &self.value,
            width,
        )
    }
}

fn build_trees(trees: &[TreeArtifact], width: usize) -> Result<Vec<RegressionTree>, LoadError> {
    trees
        .iter()
        .enumerate()
        .map(|(idx, tree)| {
            tree.build(width).map_err(|e| match e {
                LoadError::Malformed(msg) => LoadError::Malformed(format!("tree {idx}: {msg}")),
                other => other,
            })
        })
        .collect()
}

impl RegressorArtifact {
    fn build(self) -> Result<Box<dyn Regressor>, LoadError> {
        Ok(match self {
            Self::Linear {
                coefficients,
                intercept,
            } => Box::new(LinearRegressor::new(coefficients, intercept)?),
            Self::RandomForest { n_features, trees } => Box::new(RandomForest::new(
                build_trees(&trees, n_features)?,
                n_features,
            )?),
            Self::GradientBoosting {
                n_features,
                init,
                learning_rate,
                trees,
            } => Box::new(GradientBoosting::new(
                build_trees(&trees, n_features)?,
                n_features,
                init,
                learning_rate,
            )?),
        })
    }
}

impl ModelArtifact {
    /// Validate the artifact and assemble the runtime bundle.
    pub fn into_bundle(self) -> Result<ModelBundle, LoadError> {
        ModelBundle::new(
            self.model.build()?,
            self.scaler.build()?,
            self.feature_names,
            self.metrics,
            self.model_name,
        )
    }
}

/// Parse and validate an artifact from its JSON text.
pub fn from_json(text: &str) -> Result<ModelBundle, LoadError> {
    let artifact: ModelArtifact = serde_json::from_str(text)?;
    artifact.into_bundle()
}

/// Read, parse and validate the artifact at `path`.
pub fn load(path: &Path) -> Result<ModelBundle, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io(e),
    })?;
    from_json(&text)
}
