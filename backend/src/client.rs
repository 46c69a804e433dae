//! Caller side of the analysis endpoint
//!
//! Sends the metrics payload to a running relay and interprets the reply the
//! way the front-end does: a reply without a JSON content type is an error,
//! and every failure maps to one localized message.

use metabolic_ai_shared::errors::ReplyError;
use metabolic_ai_shared::health_metrics::{DerivedMetrics, ProfileInput};
use metabolic_ai_shared::types::{parse_analyze_reply, AnalyzeRequest, ANALYZE_PATH};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use thiserror::Error;
use tracing::error;

/// Analysis client error types
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Reply(#[from] ReplyError),
}

impl ClientError {
    /// Localized message for the user
    pub fn user_message(&self) -> &'static str {
        metabolic_ai_shared::errors::ANALYSIS_FAILED_MESSAGE
    }
}

/// HTTP client for `POST /api/analyze`
#[derive(Clone)]
pub struct AnalyzeClient {
    client: Client,
    base_url: String,
}

impl AnalyzeClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Request an analysis for a profile and its derived metrics
    pub async fn analyze(
        &self,
        profile: &ProfileInput,
        metrics: &DerivedMetrics,
    ) -> Result<String, ClientError> {
        self.send(&AnalyzeRequest::new(profile, metrics)).await
    }

    /// Send a prepared payload
    pub async fn send(&self, req: &AnalyzeRequest) -> Result<String, ClientError> {
        let result = self.try_send(req).await;
        if let Err(e) = &result {
            error!("AI Analysis failed: {}", e);
        }
        result
    }

    async fn try_send(&self, req: &AnalyzeRequest) -> Result<String, ClientError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, ANALYZE_PATH))
            .header(ACCEPT, "application/json")
            .json(req)
            .send()
            .await?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response.text().await?;

        Ok(parse_analyze_reply(content_type.as_deref(), &body)?)
    }
}
