use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;
use getaround_core::prediction::MAX_PREDICTION_ROWS;

use crate::handlers::prediction;
use crate::state::AppState;

/// Room for [`MAX_PREDICTION_ROWS`] full-width rows with verbose number
/// formatting, so the row cap is what rejects oversized batches.
pub const PREDICT_BODY_LIMIT_BYTES: usize = MAX_PREDICTION_ROWS * 3 * 1024;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/predict",
        post(prediction::predict).layer(DefaultBodyLimit::max(PREDICT_BODY_LIMIT_BYTES)),
    )
}
