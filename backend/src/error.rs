//! Application error handling
//!
//! This module provides unified error handling for the API,
//! converting internal errors to `{ "error": string }` responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use metabolic_ai_shared::errors::ServiceError;
use metabolic_ai_shared::types::ErrorResponse;
use thiserror::Error;
use tracing::error;

/// Message returned whenever the analysis cannot be produced
pub const ANALYSIS_ERROR_MESSAGE: &str = "Failed to analyze health data";

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Analysis failed")]
    Analysis(#[from] ServiceError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Analysis(err) => {
                error!("AI Error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ANALYSIS_ERROR_MESSAGE.to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_bad_request_status() {
        let error = ApiError::BadRequest("missing field `tdee`".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_bad_request_keeps_message() {
        let response = ApiError::BadRequest("missing field `tdee`".to_string()).into_response();
        let body: ErrorResponse = serde_json::from_str(&body_of(response).await).unwrap();
        assert_eq!(body.error, "missing field `tdee`");
    }

    #[tokio::test]
    async fn test_analysis_error_hides_upstream_detail() {
        let error = ApiError::from(ServiceError::UpstreamStatus {
            status: 401,
            body: "No auth credentials found".to_string(),
        });
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: ErrorResponse = serde_json::from_str(&body_of(response).await).unwrap();
        assert_eq!(body.error, ANALYSIS_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn test_error_body_is_json() {
        let response = ApiError::from(ServiceError::MissingCredentials).into_response();
        let content_type = response.headers()[axum::http::header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .to_string();
        assert!(content_type.contains("application/json"));
    }
}
