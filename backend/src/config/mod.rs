//! Configuration management for the MetabolicAI backend
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: MAI__)
//! 4. `OPENROUTER_API_KEY` / `OPENROUTER_MODEL`, when set

use anyhow::Result;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::env;

/// Environment variable holding the completion service credential
pub const API_KEY_ENV: &str = "OPENROUTER_API_KEY";

/// Environment variable selecting the completion model
pub const MODEL_ENV: &str = "OPENROUTER_MODEL";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub ai: AiConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory with the built front-end; nothing is served when unset
    #[serde(default)]
    pub static_dir: Option<String>,
}

/// Completion service configuration
///
/// Any OpenAI-compatible chat-completions endpoint works; the defaults
/// point at OpenRouter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    pub base_url: String,
    pub model: String,
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,
    /// Sent as `HTTP-Referer`
    pub referer: String,
    /// Sent as `X-Title`
    pub app_title: String,
    /// Outbound request timeout; the HTTP client default applies when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://openrouter.ai/api/v1".to_string(),
            model: "qwen/qwen3-4b:free".to_string(),
            api_key: None,
            referer: "https://replit.com".to_string(),
            app_title: "MetabolicAI".to_string(),
            timeout_secs: None,
        }
    }
}

impl AiConfig {
    /// Whether a credential is available for the completion service
    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }

    /// Fill credential and model from the OpenRouter environment variables
    fn apply_provider_env(&mut self) {
        if self.api_key.is_none() {
            self.api_key = env::var(API_KEY_ENV)
                .ok()
                .filter(|key| !key.is_empty())
                .map(SecretString::new);
        }
        if let Ok(model) = env::var(MODEL_ENV) {
            if !model.is_empty() {
                self.model = model;
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
                static_dir: None,
            },
            ai: AiConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with MAI__ prefix
    /// 4. OpenRouter variables for the model and a still-missing credential
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // Load from environment-specific config file
            .add_source(config::File::with_name(&config_file).required(false))
            // Override with environment variables (MAI__ prefix)
            // e.g., MAI__SERVER__PORT=9000 sets server.port
            .add_source(config::Environment::with_prefix("MAI").separator("__"))
            .build()?;

        let mut config: AppConfig = config.try_deserialize()?;
        config.ai.apply_provider_env();
        Ok(config)
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}
