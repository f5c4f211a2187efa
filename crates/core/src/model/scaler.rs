//! Per-column feature scalers.

use std::fmt::Debug;

use super::{ensure_finite, LoadError};

/// A per-column transform fitted jointly with the regressor.
///
/// Implementations must be pure: the same row always maps to the same output.
pub trait FeatureScaler: Debug + Send + Sync {
    /// Number of columns the scaler was fitted on.
    fn input_width(&self) -> usize;

    /// Transform one row. Callers guarantee `row.len() == self.input_width()`.
    fn transform(&self, row: &[f64]) -> Vec<f64>;
}

/// Standardisation: `(x - mean) / scale`.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, LoadError> {
        if mean.len() != scale.len() {
            return Err(LoadError::Malformed(format!(
                "standard scaler has {} means but {} scales",
                mean.len(),
                scale.len()
            )));
        }
        ensure_finite(&mean, "scaler.mean")?;
        ensure_finite(&scale, "scaler.scale")?;
        if let Some(idx) = scale.iter().position(|s| *s == 0.0) {
            return Err(LoadError::Malformed(format!("scaler.scale[{idx}] is zero")));
        }
        Ok(Self { mean, scale })
    }
}

impl FeatureScaler for StandardScaler {
    fn input_width(&self) -> usize {
        self.mean.len()
    }

    fn transform(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (mean, scale))| (x - mean) / scale)
            .collect()
    }
}

/// Range scaling: `x * scale + min`.
#[derive(Debug, Clone, PartialEq)]
pub struct MinMaxScaler {
    min: Vec<f64>,
    scale: Vec<f64>,
}

impl MinMaxScaler {
    pub fn new(min: Vec<f64>, scale: Vec<f64>) -> Result<Self, LoadError> {
        if min.len() != scale.len() {
            return Err(LoadError::Malformed(format!(
                "min-max scaler has {} offsets but {} scales",
                min.len(),
                scale.len()
            )));
        }
        ensure_finite(&min, "scaler.min")?;
        ensure_finite(&scale, "scaler.scale")?;
        Ok(Self { min, scale })
    }
}

impl FeatureScaler for MinMaxScaler {
    fn input_width(&self) -> usize {
        self.min.len()
    }

    fn transform(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.min.iter().zip(&self.scale))
            .map(|(x, (min, scale))| x * scale + min)
            .collect()
    }
}
