//! Common test utilities for integration tests
//!
//! This module provides shared setup for driving the router in-process.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use metabolic_ai_backend::{
    config::AppConfig, routes, services::CompletionClient, state::AppState,
};
use metabolic_ai_shared::errors::ServiceError;
use secrecy::SecretString;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use tower::ServiceExt;

/// Response pieces the tests look at
pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: String,
}

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
}

impl TestApp {
    /// Create a test application backed by the real completion client
    pub fn new(config: AppConfig) -> Self {
        let state = AppState::new(config).expect("Failed to create app state");
        Self {
            app: routes::create_router(state),
        }
    }

    /// Create a test application with a stub completion client
    pub fn with_client(client: Arc<dyn CompletionClient>) -> Self {
        let state = AppState::with_client(test_config(), client);
        Self {
            app: routes::create_router(state),
        }
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        let response = self.send(request).await;
        (response.status, response.body)
    }

    /// Make a POST request with JSON body
    pub async fn post(&self, path: &str, body: &str) -> (StatusCode, String) {
        let response = self.post_json(path, body).await;
        (response.status, response.body)
    }

    /// Make a POST request with JSON body, keeping the content type
    pub async fn post_json(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = String::from_utf8(body.to_vec()).unwrap();

        TestResponse {
            status,
            content_type,
            body,
        }
    }
}

/// Configuration pointing the completion client at `base_url`
pub fn config_with_upstream(base_url: &str) -> AppConfig {
    let mut config = test_config();
    config.ai.base_url = base_url.to_string();
    config.ai.api_key = Some(SecretString::new("sk-test".to_string()));
    config
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.server.host = "127.0.0.1".to_string();
    config.server.port = 0;
    config
}

/// Well-formed analysis payload
pub const PAYLOAD: &str = r#"{
    "weight": 70, "height": 175, "age": 30, "gender": "male",
    "activity": 1.375, "bmi": 22.9, "bmr": 1649, "tdee": 2267
}"#;

/// Completion client with a canned outcome that counts its calls
pub struct StubClient {
    reply: Option<String>,
    pub calls: AtomicUsize,
}

impl StubClient {
    pub fn answering(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionClient for StubClient {
    async fn complete(&self, _prompt: &str) -> Result<String, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone().ok_or_else(|| ServiceError::UpstreamStatus {
            status: 502,
            body: "upstream exploded".to_string(),
        })
    }
}
