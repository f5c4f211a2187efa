use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use getaround_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `getaround_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The request body could not be decoded into the expected shape.
    #[error("Unprocessable request: {0}")]
    Unprocessable(String),

    /// The request was refused before decoding (body too large, wrong
    /// content type). Carries the status the extractor chose.
    #[error("Request rejected ({status}): {message}")]
    Rejected { status: StatusCode, message: String },

    /// No route matched the request path.
    #[error("Not found: {path}")]
    NotFound { path: String },
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Core(core) => match core {
                CoreError::Unavailable(msg) => (
                    StatusCode::SERVICE_UNAVAILABLE,
                    json!({ "error": msg, "code": "MODEL_UNAVAILABLE" }),
                ),
                CoreError::InvalidInput(msg) => (
                    StatusCode::BAD_REQUEST,
                    json!({ "error": msg, "code": "INVALID_INPUT" }),
                ),
                CoreError::ShapeMismatch {
                    expected, received, ..
                } => (
                    StatusCode::BAD_REQUEST,
                    json!({
                        "error": core.to_string(),
                        "code": "SHAPE_MISMATCH",
                        "expected": expected,
                        "received": received,
                    }),
                ),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        json!({ "error": "An internal error occurred", "code": "INTERNAL_ERROR" }),
                    )
                }
            },

            AppError::Unprocessable(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "error": msg, "code": "UNPROCESSABLE" }),
            ),
            AppError::Rejected { status, message } => {
                let code = match status.as_u16() {
                    413 => "PAYLOAD_TOO_LARGE",
                    415 => "UNSUPPORTED_MEDIA_TYPE",
                    _ => "BAD_REQUEST",
                };
                (*status, json!({ "error": message, "code": code }))
            }
            AppError::NotFound { path } => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "Not Found",
                    "code": "NOT_FOUND",
                    "detail": "See / for the list of available endpoints",
                    "path": path,
                }),
            ),
        };

        (status, axum::Json(body)).into_response()
    }
}
