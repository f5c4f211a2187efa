//! Integration tests for the model metadata endpoints.

mod common;

use std::io::Write;

use axum::http::StatusCode;
use common::{body_json, example_row, get, post_json};
use getaround_core::model::ModelHost;
use serde_json::json;

// ---------------------------------------------------------------------------
// Test: GET /model-info describes the shipped artifact
// ---------------------------------------------------------------------------

#[tokio::test]
async fn model_info_describes_loaded_model() {
    let response = get(common::build_test_app(), "/model-info").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["model_name"], "Linear Regression (demo)");
    assert_eq!(json["features_count"], 56);
    assert_eq!(json["feature_names"].as_array().unwrap().len(), 56);
    assert_eq!(json["feature_names"][1], "mileage");
    assert!((json["metrics"]["r2_test"].as_f64().unwrap() - 0.73).abs() < 1e-9);
    assert!((json["metrics"]["mape_test"].as_f64().unwrap() - 14.84).abs() < 1e-9);
}

// ---------------------------------------------------------------------------
// Test: GET /features lists the schema in order
// ---------------------------------------------------------------------------

#[tokio::test]
async fn features_lists_schema() {
    let response = get(common::build_test_app(), "/features").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["count"], 56);
    assert_eq!(json["features"][2], "engine_power");
    assert!(json["description"].as_str().unwrap().contains("56"));
}

// ---------------------------------------------------------------------------
// Test: the documented example row's one-hot columns name its vehicle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn example_row_one_hot_columns_match_schema() {
    let json = body_json(get(common::build_test_app(), "/features").await).await;
    let features = json["features"].as_array().unwrap();

    let one_hot: Vec<&str> = example_row()
        .iter()
        .enumerate()
        .skip(10)
        .filter(|(_, value)| **value == 1.0)
        .map(|(i, _)| features[i].as_str().unwrap())
        .collect();

    assert_eq!(one_hot, ["model_key_Peugeot", "fuel_petrol", "car_type_hatchback"]);
}

// ---------------------------------------------------------------------------
// Test: metadata endpoints are 503 when degraded
// ---------------------------------------------------------------------------

#[tokio::test]
async fn metadata_endpoints_return_503_when_degraded() {
    for uri in ["/model-info", "/features"] {
        let response = get(common::build_degraded_app(), uri).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE, "{uri}");

        let json = body_json(response).await;
        assert_eq!(json["code"], "MODEL_UNAVAILABLE");
        assert_eq!(json["error"], "Model not loaded");
    }
}

// ---------------------------------------------------------------------------
// Test: any artifact file drives the schema, not a fixed width
// ---------------------------------------------------------------------------

#[tokio::test]
async fn custom_artifact_drives_schema_and_predictions() {
    let artifact = json!({
        "model_name": "Tiny",
        "feature_names": ["a", "b"],
        "scaler": { "kind": "standard", "mean": [0.0, 0.0], "scale": [1.0, 1.0] },
        "model": { "kind": "linear", "coefficients": [2.0, 3.0], "intercept": 1.0 },
    });
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{artifact}").unwrap();

    let host = ModelHost::load(file.path());
    assert!(host.is_loaded());

    let json = body_json(get(common::build_app_with_host(host), "/model-info").await).await;
    assert_eq!(json["model_name"], "Tiny");
    assert_eq!(json["features_count"], 2);
    assert_eq!(json["metrics"], json!({}));

    let host = ModelHost::load(file.path());
    let response = post_json(
        common::build_app_with_host(host),
        "/predict",
        json!({ "input": [[1.0, 1.0], [0.5, 0.25]] }),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["prediction"], json!([6.0, 2.75]));
}

// ---------------------------------------------------------------------------
// Test: a malformed artifact degrades the service instead of failing startup
// ---------------------------------------------------------------------------

#[tokio::test]
async fn malformed_artifact_degrades_service() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{\"model\": 42}}").unwrap();

    let host = ModelHost::load(file.path());
    let response = get(common::build_app_with_host(host), "/health").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
