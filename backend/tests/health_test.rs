//! Integration tests for health check endpoints

mod common;

use axum::http::StatusCode;
use metabolic_ai_backend::routes::HealthResponse;

#[tokio::test]
async fn test_health_endpoint() {
    let app = common::TestApp::new(common::test_config());

    let (status, body) = app.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("healthy"));
}

#[tokio::test]
async fn test_liveness_endpoint() {
    let app = common::TestApp::new(common::test_config());

    let (status, body) = app.get("/health/live").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("alive"));
}

#[tokio::test]
async fn test_readiness_endpoint() {
    let app = common::TestApp::new(common::config_with_upstream("http://127.0.0.1:1"));

    let (status, body) = app.get("/health/ready").await;

    assert_eq!(status, StatusCode::OK);
    let health: HealthResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(health.status, "ready");
}

#[tokio::test]
async fn test_readiness_without_credential() {
    let app = common::TestApp::new(common::test_config());

    let (status, body) = app.get("/health/ready").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    let health: HealthResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(health.checks.unwrap().completion_service.status, "unhealthy");
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let app = common::TestApp::new(common::test_config());
    let request = axum::http::Request::builder()
        .uri("/health")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = tower::ServiceExt::oneshot(app.app.clone(), request)
        .await
        .unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}
