#![allow(dead_code)]

use std::path::PathBuf;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use getaround_core::delay::{DelayDataset, RentalRecord};
use getaround_dashboard::app::build_app;
use getaround_dashboard::config::{HttpConfig, LogFormat, ServerConfig};
use getaround_dashboard::dataset;
use getaround_dashboard::state::AppState;

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
        dataset_path: PathBuf::from("/nonexistent/delays.xlsx"),
    }
}

fn record(id: i64, checkin: &str, delay: Option<f64>, gap: Option<f64>) -> RentalRecord {
    RentalRecord {
        rental_id: Some(id),
        car_id: Some(1000 + id),
        checkin_type: checkin.to_string(),
        state: Some("ended".to_string()),
        delay_at_checkout_in_minutes: delay,
        time_delta_with_previous_rental_in_minutes: gap,
    }
}

/// Eight rentals: 5 late, 7 with a previous rental, 3 problematic.
///
/// | id | type    | delay | gap  |
/// |----|---------|-------|------|
/// | 1  | mobile  | 30    | -    |
/// | 2  | mobile  | -10   | 60   |
/// | 3  | mobile  | 90    | 60   |
/// | 4  | connect | 15    | 0    |
/// | 5  | connect | -     | 120  |
/// | 6  | connect | 200   | 180  |
/// | 7  | mobile  | 45    | 300  |
/// | 8  | connect | 0     | 30   |
pub fn sample_dataset() -> DelayDataset {
    DelayDataset::new(vec![
        record(1, "mobile", Some(30.0), None),
        record(2, "mobile", Some(-10.0), Some(60.0)),
        record(3, "mobile", Some(90.0), Some(60.0)),
        record(4, "connect", Some(15.0), Some(0.0)),
        record(5, "connect", None, Some(120.0)),
        record(6, "connect", Some(200.0), Some(180.0)),
        record(7, "mobile", Some(45.0), Some(300.0)),
        record(8, "connect", Some(0.0), Some(30.0)),
    ])
}

pub fn build_test_app() -> Router {
    build_app(AppState::new(sample_dataset(), test_config()))
}

/// Application whose dataset file does not exist.
pub fn build_degraded_app() -> Router {
    let config = test_config();
    let loaded = dataset::load(&config.dataset_path);
    build_app(AppState::from_load(loaded, config))
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
