//! Service-level endpoints: index, health, version and the 404 fallback.

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::state::AppState;
use crate::API_VERSION;

pub const API_TITLE: &str = "GetAround Pricing API";

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `healthy` when the model is loaded, `unhealthy` otherwise.
    pub status: &'static str,
    pub model_loaded: bool,
    pub model_name: Option<String>,
    pub features_count: usize,
    pub api_version: &'static str,
    /// RFC 3339 UTC timestamp of the check.
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub api_version: &'static str,
    pub model_version: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /
///
/// Machine-readable landing page: service identity, status, headline metrics
/// and the endpoint list.
pub async fn index(State(state): State<AppState>) -> Json<Value> {
    let health = state.host.health();
    let metrics = state.host.metrics().ok().cloned().unwrap_or_default();
    let status = if health.loaded {
        "operational"
    } else {
        "model not loaded"
    };

    Json(json!({
        "name": API_TITLE,
        "version": API_VERSION,
        "status": status,
        "model": {
            "name": health.model_name,
            "features_count": health.features_count,
            "metrics": metrics,
        },
        "endpoints": [
            { "method": "POST", "path": "/predict", "description": "Predict the daily rental price of one or more vehicles" },
            { "method": "GET", "path": "/health", "description": "Service and model status" },
            { "method": "GET", "path": "/model-info", "description": "Model name, metrics and feature schema" },
            { "method": "GET", "path": "/features", "description": "Ordered feature list expected by /predict" },
            { "method": "GET", "path": "/version", "description": "API and model versions" },
        ],
    }))
}

/// GET /health
///
/// Always answers with the same shape; the status code is 503 while the
/// model is unavailable.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let health = state.host.health();
    let (code, status) = if health.loaded {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    let response = HealthResponse {
        status,
        model_loaded: health.loaded,
        model_name: health.model_name,
        features_count: health.features_count,
        api_version: API_VERSION,
        timestamp: Utc::now().to_rfc3339(),
        error: state
            .host
            .unavailable_reason()
            .map(|reason| format!("Model not loaded, the API is not operational: {reason}")),
    };

    (code, Json(response))
}

/// GET /version
pub async fn version(State(state): State<AppState>) -> Json<VersionResponse> {
    Json(VersionResponse {
        api_version: API_VERSION,
        model_version: state.host.display_name().ok().map(str::to_string),
    })
}

/// Fallback for unmatched routes.
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound {
        path: uri.path().to_string(),
    }
}
