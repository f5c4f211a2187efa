//! Handlers exposing the loaded model's metadata.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ModelInfoResponse {
    pub model_name: String,
    pub features_count: usize,
    pub metrics: BTreeMap<String, f64>,
    pub feature_names: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct FeaturesResponse {
    pub features: Vec<String>,
    pub count: usize,
    pub description: String,
}

/// GET /model-info
pub async fn model_info(State(state): State<AppState>) -> AppResult<Json<ModelInfoResponse>> {
    let bundle = state.host.bundle()?;

    Ok(Json(ModelInfoResponse {
        model_name: bundle.display_name().to_string(),
        features_count: bundle.width(),
        metrics: bundle.metrics().clone(),
        feature_names: bundle.feature_names().to_vec(),
    }))
}

/// GET /features
///
/// The ordered feature schema that every `/predict` row must follow.
pub async fn features(State(state): State<AppState>) -> AppResult<Json<FeaturesResponse>> {
    let features = state.host.feature_names()?.to_vec();
    let count = features.len();

    Ok(Json(FeaturesResponse {
        features,
        count,
        description: format!("The {count} features expected by /predict, in exact order"),
    }))
}
