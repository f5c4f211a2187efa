use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use getaround_core::error::CoreError;
use serde_json::json;

/// Application-level error type for the analytics handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Query string that does not decode into the expected parameters.
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {path}")]
    NotFound { path: String },
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::Unavailable(msg) => (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "DATASET_UNAVAILABLE",
                    msg.clone(),
                ),
                CoreError::InvalidInput(msg) => {
                    (StatusCode::BAD_REQUEST, "INVALID_INPUT", msg.clone())
                }
                CoreError::ShapeMismatch { .. } => {
                    (StatusCode::BAD_REQUEST, "INVALID_INPUT", core.to_string())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::NotFound { path } => {
                let body = json!({
                    "error": "Not Found",
                    "code": "NOT_FOUND",
                    "detail": "See /categories and /report for the analytics endpoints",
                    "path": path,
                });
                return (StatusCode::NOT_FOUND, axum::Json(body)).into_response();
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
