//! Error types for the MetabolicAI application

use thiserror::Error;

/// Failures of the external completion service
///
/// None of these details are shown to API callers; they are logged on the
/// server and replaced with a generic message.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Completion service credential is not configured")]
    MissingCredentials,

    #[error("Completion request failed: {0}")]
    Transport(String),

    #[error("Completion service returned {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("Malformed completion response: {0}")]
    MalformedResponse(String),
}

/// History persistence error types
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to serialize history: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Reasons an analysis reply cannot be shown to the user
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ReplyError {
    #[error("Response is not JSON (content type: {0:?})")]
    NotJson(Option<String>),

    #[error("Response body could not be parsed: {0}")]
    Malformed(String),

    #[error("Server reported an error: {0}")]
    Server(String),
}

/// Message shown to the user whenever an analysis cannot be displayed
pub const ANALYSIS_FAILED_MESSAGE: &str =
    "Wystąpił błąd podczas analizy AI. Spróbuj ponownie za chwilę.";

impl ReplyError {
    /// Localized message for the user
    ///
    /// Every reply failure maps to the same message; the variant is for logs.
    pub fn user_message(&self) -> &'static str {
        ANALYSIS_FAILED_MESSAGE
    }
}
