//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.

use crate::config::AppConfig;
use crate::services::completion::{ChatCompletionClient, CompletionClient};
use crate::services::AnalysisService;
use metabolic_ai_shared::errors::ServiceError;
use std::sync::Arc;

/// Shared application state
///
/// All fields are designed for cheap cloning across async tasks:
/// the configuration and the completion client sit behind `Arc`s.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Analysis service wrapping the completion client
    pub analysis: AnalysisService,
}

impl AppState {
    /// Create state backed by the configured completion service
    pub fn new(config: AppConfig) -> Result<Self, ServiceError> {
        let client = ChatCompletionClient::new(&config.ai)?;
        Ok(Self::with_client(config, Arc::new(client)))
    }

    /// Create state with an explicit completion client
    pub fn with_client(config: AppConfig, client: Arc<dyn CompletionClient>) -> Self {
        Self {
            config: Arc::new(config),
            analysis: AnalysisService::new(client),
        }
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get a reference to the analysis service
    #[inline]
    pub fn analysis(&self) -> &AnalysisService {
        &self.analysis
    }
}
