//! Regressors mapping a scaled feature row to a raw price.
//!
//! Tree models use the flat node layout exported by common training
//! libraries: parallel `children_left`, `children_right`, `feature`,
//! `threshold` and `value` arrays, with `-1` marking a missing child.

use std::fmt::Debug;

use super::{ensure_finite, LoadError};

/// Marker used in `children_left` / `children_right` for leaf nodes.
pub const LEAF_MARKER: i64 = -1;

/// A fitted regression model.
pub trait Regressor: Debug + Send + Sync {
    /// Number of columns the model was fitted on.
    fn input_width(&self) -> usize;

    /// Predict one value. Callers guarantee `row.len() == self.input_width()`.
    fn predict_row(&self, row: &[f64]) -> f64;
}

// ---------------------------------------------------------------------------
// Linear
// ---------------------------------------------------------------------------

/// Ordinary linear model: `intercept + coefficients . row`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRegressor {
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LinearRegressor {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Result<Self, LoadError> {
        if coefficients.is_empty() {
            return Err(LoadError::Malformed(
                "linear model has no coefficients".into(),
            ));
        }
        ensure_finite(&coefficients, "model.coefficients")?;
        ensure_finite(&[intercept], "model.intercept")?;
        Ok(Self {
            coefficients,
            intercept,
        })
    }
}

impl Regressor for LinearRegressor {
    fn input_width(&self) -> usize {
        self.coefficients.len()
    }

    fn predict_row(&self, row: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(row)
                .map(|(w, x)| w * x)
                .sum::<f64>()
    }
}

// ---------------------------------------------------------------------------
// Trees
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf(f64),
}

/// A single validated regression tree.
///
/// Children always have a larger index than their parent, so traversal from
/// the root terminates.
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionTree {
    nodes: Vec<Node>,
}

impl RegressionTree {
    /// Build a tree from flat node arrays, validating every node against a
    /// model of `width` input columns.
    pub fn from_arrays(
        children_left: &[i64],
        children_right: &[i64],
        feature: &[i64],
        threshold: &[f64],
        value: &[f64],
        width: usize,
    ) -> Result<Self, LoadError> {
        let n = children_left.len();
        if n == 0 {
            return Err(LoadError::Malformed("tree has no nodes".into()));
        }
        if [children_right.len(), feature.len(), threshold.len(), value.len()]
            .iter()
            .any(|len| *len != n)
        {
            return Err(LoadError::Malformed(format!(
                "tree arrays must all have {n} entries"
            )));
        }

        let child = |parent: usize, raw: i64| -> Result<usize, LoadError> {
            usize::try_from(raw)
                .ok()
                .filter(|idx| *idx > parent && *idx < n)
                .ok_or_else(|| {
                    LoadError::Malformed(format!(
                        "node {parent} has invalid child index {raw}"
                    ))
                })
        };

        let mut nodes = Vec::with_capacity(n);
        for idx in 0..n {
            let (l, r) = (children_left[idx], children_right[idx]);
            let node = if l == LEAF_MARKER && r == LEAF_MARKER {
                ensure_finite(&value[idx..=idx], "tree.value")?;
                Node::Leaf(value[idx])
            } else {
                let feat = usize::try_from(feature[idx])
                    .ok()
                    .filter(|f| *f < width)
                    .ok_or_else(|| {
                        LoadError::Malformed(format!(
                            "node {idx} splits on feature {} but the model has {width} features",
                            feature[idx]
                        ))
                    })?;
                ensure_finite(&threshold[idx..=idx], "tree.threshold")?;
                Node::Split {
                    feature: feat,
                    threshold: threshold[idx],
                    left: child(idx, l)?,
                    right: child(idx, r)?,
                }
            };
            nodes.push(node);
        }
        Ok(Self { nodes })
    }

    /// Walk from the root to a leaf: left when `row[feature] <= threshold`.
    pub fn predict_row(&self, row: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match self.nodes[idx] {
                Node::Leaf(value) => return value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if row[feature] <= threshold { left } else { right };
                }
            }
        }
    }
}

/// Bagged ensemble: the mean of all tree outputs.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomForest {
    trees: Vec<RegressionTree>,
    width: usize,
}

impl RandomForest {
    pub fn new(trees: Vec<RegressionTree>, width: usize) -> Result<Self, LoadError> {
        if trees.is_empty() {
            return Err(LoadError::Malformed("random forest has no trees".into()));
        }
        Ok(Self { trees, width })
    }
}

impl Regressor for RandomForest {
    fn input_width(&self) -> usize {
        self.width
    }

    fn predict_row(&self, row: &[f64]) -> f64 {
        let sum: f64 = self.trees.iter().map(|t| t.predict_row(row)).sum();
        sum / self.trees.len() as f64
    }
}

/// Boosted ensemble: `init + learning_rate * sum(tree outputs)`.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientBoosting {
    trees: Vec<RegressionTree>,
    width: usize,
    init: f64,
    learning_rate: f64,
}

impl GradientBoosting {
    pub fn new(
        trees: Vec<RegressionTree>,
        width: usize,
        init: f64,
        learning_rate: f64,
    ) -> Result<Self, LoadError> {
        if trees.is_empty() {
            return Err(LoadError::Malformed(
                "gradient boosting model has no trees".into(),
            ));
        }
        ensure_finite(&[init, learning_rate], "model.init/learning_rate")?;
        Ok(Self {
            trees,
            width,
            init,
            learning_rate,
        })
    }
}

impl Regressor for GradientBoosting {
    fn input_width(&self) -> usize {
        self.width
    }

    fn predict_row(&self, row: &[f64]) -> f64 {
        let sum: f64 = self.trees.iter().map(|t| t.predict_row(row)).sum();
        self.init + self.learning_rate * sum
    }
}
