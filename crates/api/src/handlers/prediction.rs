//! Handler for the batch price prediction endpoint.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use getaround_core::prediction;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /predict`: one inner list per vehicle, in
/// feature-schema order.
#[derive(Debug, Deserialize)]
pub struct PredictionInput {
    pub input: Vec<Vec<f64>>,
}

/// Predicted daily rental prices in euros, one per input row.
#[derive(Debug, Serialize)]
pub struct PredictionOutput {
    pub prediction: Vec<f64>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /predict
///
/// Availability is checked before the body is decoded, so a degraded
/// service answers 503 even for malformed requests.
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictionInput>, JsonRejection>,
) -> AppResult<Json<PredictionOutput>> {
    state.host.bundle()?;

    let Json(input) = payload.map_err(reject_body)?;

    let prediction = prediction::predict(&state.host, &input.input)?;
    tracing::debug!(rows = prediction.len(), "Prediction served");

    Ok(Json(PredictionOutput { prediction }))
}

/// Bodies that were read but did not decode are 422; transport-level
/// rejections (size limit, content type) keep their own status.
fn reject_body(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
            AppError::Unprocessable(rejection.body_text())
        }
        other => AppError::Rejected {
            status: other.status(),
            message: other.body_text(),
        },
    }
}
