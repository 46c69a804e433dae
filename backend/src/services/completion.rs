//! Chat-completion client for the external language-model service
//!
//! Talks to any OpenAI-compatible `chat/completions` endpoint. One prompt
//! goes out as a single user message; the text of the first choice comes back.

use crate::config::AiConfig;
use async_trait::async_trait;
use metabolic_ai_shared::errors::ServiceError;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

/// Text completion over a single-turn prompt
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Complete `prompt`, returning the generated text unmodified
    async fn complete(&self, prompt: &str) -> Result<String, ServiceError>;
}

// ============================================================================
// API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

// ============================================================================
// Client Implementation
// ============================================================================

/// OpenAI-compatible completion client
pub struct ChatCompletionClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<SecretString>,
    referer: String,
    app_title: String,
}

impl ChatCompletionClient {
    /// Build a client from the completion service configuration
    ///
    /// A missing credential is not an error here; every call then fails
    /// with [`ServiceError::MissingCredentials`].
    pub fn new(config: &AiConfig) -> Result<Self, ServiceError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| ServiceError::Transport(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            referer: config.referer.clone(),
            app_title: config.app_title.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionClient for ChatCompletionClient {
    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    async fn complete(&self, prompt: &str) -> Result<String, ServiceError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or(ServiceError::MissingCredentials)?;

        let request = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        debug!(endpoint = %self.endpoint, "Sending chat completion request");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key.expose_secret())
            .header("HTTP-Referer", &self.referer)
            .header("X-Title", &self.app_title)
            .json(&request)
            .send()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::UpstreamStatus {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::MalformedResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ServiceError::MalformedResponse("no choices returned".to_string()))?
            .message
            .content
            .ok_or_else(|| ServiceError::MalformedResponse("first choice has no content".to_string()))
    }
}
