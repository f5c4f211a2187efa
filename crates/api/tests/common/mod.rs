#![allow(dead_code)]

use std::path::PathBuf;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use getaround_api::app::build_app;
use getaround_api::config::{HttpConfig, LogFormat, ServerConfig};
use getaround_api::state::AppState;
use getaround_core::model::ModelHost;

/// Artifact shipped in the repository's `models/` directory.
pub const SHIPPED_ARTIFACT: &str =
    concat!(env!("CARGO_MANIFEST_DIR"), "/../../models/pricing_model.json");

/// Width of the shipped feature schema.
pub const FEATURE_COUNT: usize = 56;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        http: HttpConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["http://localhost:8501".parse().unwrap()],
            request_timeout_secs: 30,
            shutdown_timeout_secs: 30,
            log_format: LogFormat::Pretty,
        },
        model_path: PathBuf::from(SHIPPED_ARTIFACT),
    }
}

/// Full application over the shipped artifact.
pub fn build_test_app() -> Router {
    build_app_with_host(ModelHost::load(SHIPPED_ARTIFACT))
}

/// Full application whose artifact is missing, i.e. permanently degraded.
pub fn build_degraded_app() -> Router {
    build_app_with_host(ModelHost::load("/nonexistent/pricing_model.json"))
}

pub fn build_app_with_host(host: ModelHost) -> Router {
    build_app(AppState::new(host, test_config()))
}

/// The row from the API documentation: a Peugeot petrol hatchback
/// (`model_key_Peugeot`, `fuel_petrol`, `car_type_hatchback`).
pub fn example_row() -> Vec<f64> {
    let mut row = vec![0.0; FEATURE_COUNT];
    row[..10].copy_from_slice(&[3203.0, 109839.0, 135.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0, 1.0]);
    row[28] = 1.0;
    row[39] = 1.0;
    row[51] = 1.0;
    row
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    post_raw(app, uri, body.to_string()).await
}

pub async fn post_raw(app: Router, uri: &str, body: impl Into<String>) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.into()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
