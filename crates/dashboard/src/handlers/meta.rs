use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use crate::error::AppError;
use crate::state::AppState;
use crate::SERVICE_VERSION;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub dataset_loaded: bool,
    pub rows: usize,
    pub checkin_types: Vec<String>,
    pub version: &'static str,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// GET /health -- 200 with dataset figures, or 503 with the load error.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let timestamp = Utc::now().to_rfc3339();

    match state.dataset() {
        Ok(dataset) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy",
                dataset_loaded: true,
                rows: dataset.len(),
                checkin_types: dataset.categories().to_vec(),
                version: SERVICE_VERSION,
                timestamp,
                error: None,
            }),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "unhealthy",
                dataset_loaded: false,
                rows: 0,
                checkin_types: Vec::new(),
                version: SERVICE_VERSION,
                timestamp,
                error: Some(e.to_string()),
            }),
        ),
    }
}

pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound {
        path: uri.path().to_string(),
    }
}
