//! Tests for the shared middleware stack, driven through `oneshot`.

use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::routing::get;
use axum::Router;
use getaround_server::config::{HttpConfig, LogFormat};
use getaround_server::middleware::{apply_middleware, REQUEST_ID_HEADER};
use tower::ServiceExt;

fn test_config() -> HttpConfig {
    HttpConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:8501".parse().unwrap()],
        request_timeout_secs: 1,
        shutdown_timeout_secs: 1,
        log_format: LogFormat::Pretty,
    }
}

fn test_app() -> Router {
    let router = Router::new()
        .route("/ok", get(|| async { "ok" }))
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(10)).await;
                "late"
            }),
        )
        .route(
            "/panic",
            get(|| async {
                if true {
                    panic!("handler failure");
                }
                "unreachable"
            }),
        );
    apply_middleware(router, &test_config(), [Method::GET])
}

async fn send(app: Router, request: Request<Body>) -> axum::response::Response {
    app.oneshot(request).await.unwrap()
}

// ---------------------------------------------------------------------------
// Test: every response carries a request id
// ---------------------------------------------------------------------------

#[tokio::test]
async fn request_id_is_generated() {
    let response = send(
        test_app(),
        Request::builder().uri("/ok").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(REQUEST_ID_HEADER));
}

#[tokio::test]
async fn incoming_request_id_is_propagated() {
    let response = send(
        test_app(),
        Request::builder()
            .uri("/ok")
            .header(REQUEST_ID_HEADER, "abc-123")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.headers()[REQUEST_ID_HEADER], "abc-123");
}

// ---------------------------------------------------------------------------
// Test: slow handlers are cut off with 408
// ---------------------------------------------------------------------------

#[tokio::test]
async fn slow_handler_times_out_with_408() {
    let response = send(
        test_app(),
        Request::builder().uri("/slow").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
}

// ---------------------------------------------------------------------------
// Test: a panicking handler becomes a 500
// ---------------------------------------------------------------------------

#[tokio::test]
async fn panic_becomes_500() {
    let response = send(
        test_app(),
        Request::builder().uri("/panic").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// ---------------------------------------------------------------------------
// Test: CORS answers preflights for configured origins and methods
// ---------------------------------------------------------------------------

#[tokio::test]
async fn preflight_lists_configured_methods() {
    let response = send(
        test_app(),
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/ok")
            .header("origin", "http://localhost:8501")
            .header("access-control-request-method", "GET")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    let headers = response.headers();
    assert_eq!(
        headers["access-control-allow-origin"],
        "http://localhost:8501"
    );
    let methods = headers["access-control-allow-methods"].to_str().unwrap();
    assert!(methods.contains("GET"));
    assert!(!methods.contains("POST"));
}

#[tokio::test]
async fn unknown_origin_gets_no_cors_headers() {
    let response = send(
        test_app(),
        Request::builder()
            .uri("/ok")
            .header("origin", "http://evil.test")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(!response
        .headers()
        .contains_key("access-control-allow-origin"));
}
