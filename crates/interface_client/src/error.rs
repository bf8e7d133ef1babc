//! Client error handling

use core_kernel::{CoreError, PortError};
use thiserror::Error;

/// Errors raised while setting up or driving the client
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Port(#[from] PortError),

    /// The same action is still in flight; nothing was sent
    #[error("{0} already in progress")]
    Busy(&'static str),
}

impl ClientError {
    pub fn is_busy(&self) -> bool {
        matches!(self, ClientError::Busy(_))
    }

    /// The port failure behind this error, if the request was sent
    pub fn port_error(&self) -> Option<&PortError> {
        match self {
            ClientError::Port(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_busy_message() {
        let err = ClientError::Busy("update");
        assert!(err.is_busy());
        assert_eq!(err.to_string(), "update already in progress");
        assert!(err.port_error().is_none());
    }

    #[test]
    fn test_port_error_is_transparent() {
        let err = ClientError::from(PortError::not_found("Claim", "c1"));
        assert!(err.port_error().is_some_and(PortError::is_not_found));
        assert!(err.to_string().contains("c1"));
    }
}
