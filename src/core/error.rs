//! Custom error types for Pulse
//!
//! Provides a unified error handling system across all modules.

use thiserror::Error;

/// Main error type for Pulse operations
#[derive(Error, Debug)]
pub enum PulseError {
    /// Inference endpoint or model invocation errors. Fatal for the
    /// session: the loop does not retry an inference call.
    #[error("Inference error: {0}")]
    Inference(String),

    /// State store persistence errors. Callers log and swallow these.
    #[error("State store error: {0}")]
    State(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error for other cases
    #[error("{0}")]
    Other(String),
}

/// Convenience Result type for Pulse operations
pub type Result<T> = std::result::Result<T, PulseError>;

impl PulseError {
    /// Create an inference error
    pub fn inference(msg: impl Into<String>) -> Self {
        Self::Inference(msg.into())
    }

    /// Create a state store error
    pub fn state(msg: impl Into<String>) -> Self {
        Self::State(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
