//! Core error types used across the system

use thiserror::Error;

/// Errors raised before any request leaves the process
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl CoreError {
    pub fn configuration(message: impl Into<String>) -> Self {
        CoreError::Configuration(message.into())
    }

    pub fn invalid_url(url: impl Into<String>, reason: impl ToString) -> Self {
        CoreError::InvalidUrl {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}
