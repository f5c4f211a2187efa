//! Prediction pipeline: validate a feature matrix against the model schema,
//! scale it, run the model and post-process prices.
//!
//! Checks run in a fixed order and the first failure wins:
//!
//! 1. the model is loaded ([`CoreError::Unavailable`]);
//! 2. the batch is non-empty and within [`MAX_PREDICTION_ROWS`]
//!    ([`CoreError::InvalidInput`]);
//! 3. every row has exactly the schema width ([`CoreError::ShapeMismatch`]);
//! 4. every value is finite ([`CoreError::InvalidInput`]).

use crate::error::CoreError;
use crate::model::ModelHost;

/// Largest batch accepted in a single request.
pub const MAX_PREDICTION_ROWS: usize = 10_000;

/// Predict one price per row, preserving row order.
///
/// Every returned value is `>= 0.0` and rounded to 2 decimal places.
pub fn predict(host: &ModelHost, rows: &[Vec<f64>]) -> Result<Vec<f64>, CoreError> {
    let bundle = host.bundle()?;
    validate_rows(rows, bundle.width())?;

    rows.iter()
        .enumerate()
        .map(|(idx, row)| {
            let raw = bundle.infer(row);
            finalize_price(raw).map_err(|e| {
                tracing::error!(row = idx, raw, "Model produced a non-finite prediction");
                e
            })
        })
        .collect()
}

/// Check batch size, every row's width, and value finiteness.
pub fn validate_rows(rows: &[Vec<f64>], expected: usize) -> Result<(), CoreError> {
    if rows.is_empty() {
        return Err(CoreError::InvalidInput("empty input".into()));
    }
    if rows.len() > MAX_PREDICTION_ROWS {
        return Err(CoreError::InvalidInput(format!(
            "batch of {} rows exceeds the maximum of {MAX_PREDICTION_ROWS}",
            rows.len()
        )));
    }
    if let Some((row, received)) = rows
        .iter()
        .map(Vec::len)
        .enumerate()
        .find(|(_, len)| *len != expected)
    {
        return Err(CoreError::ShapeMismatch {
            expected,
            received,
            row,
        });
    }
    for (row, values) in rows.iter().enumerate() {
        if let Some(col) = values.iter().position(|v| !v.is_finite()) {
            return Err(CoreError::InvalidInput(format!(
                "value at row {row}, column {col} is not a finite number"
            )));
        }
    }
    Ok(())
}

/// Round to cents and clamp to a minimum of zero.
pub fn finalize_price(raw: f64) -> Result<f64, CoreError> {
    if !raw.is_finite() {
        return Err(CoreError::Internal(
            "model produced a non-finite prediction".into(),
        ));
    }
    let rounded = round_to_cents(raw);
    // Also folds -0.0 into 0.0.
    Ok(if rounded > 0.0 { rounded } else { 0.0 })
}

/// Round to 2 decimal places, ties to even.
///
/// Magnitudes whose cent count overflows `f64` are already integral and are
/// returned unchanged.
pub fn round_to_cents(value: f64) -> f64 {
    let cents = value * 100.0;
    if !cents.is_finite() {
        return value;
    }
    cents.round_ties_even() / 100.0
}
