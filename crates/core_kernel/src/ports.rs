//! Ports and Adapters Infrastructure
//!
//! The client reaches the external Claims API only through a port trait
//! defined in `domain_claims`. Adapters implement that trait: the HTTP adapter
//! in `interface_client` and the in-memory adapter in `test_utils`.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │        Claims Client         │
//! │  (state container + view)    │
//! └──────────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────┐
//! │         ClaimsPort           │
//! └──────────────────────────────┘
//!         ▲                ▲
//!         │                │
//!  ┌──────┴──────┐  ┌──────┴──────┐
//!  │ HTTP adapter│  │  In-memory  │
//!  │  (reqwest)  │  │  (tests)    │
//!  └─────────────┘  └─────────────┘
//! ```

use std::fmt;
use thiserror::Error;

/// Error type for port operations
///
/// Every adapter reports failures through this enum so callers can handle
/// them uniformly regardless of transport.
#[derive(Debug, Error)]
pub enum PortError {
    /// The requested entity was not found
    #[error("Not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: String,
        id: String,
    },

    /// The service answered with a status the client does not accept
    #[error("Unexpected status {status}: {body}")]
    UnexpectedStatus {
        status: u16,
        body: String,
    },

    /// Connection to the underlying system failed
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The operation timed out
    #[error("Timeout: {operation}")]
    Timeout {
        operation: String,
    },

    /// A response body could not be decoded
    #[error("Transformation error: {message}")]
    Transformation {
        message: String,
    },

    /// An internal error occurred
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PortError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    /// Creates an UnexpectedStatus error
    pub fn unexpected_status(status: u16, body: impl Into<String>) -> Self {
        PortError::UnexpectedStatus {
            status,
            body: body.into(),
        }
    }

    /// Creates a Connection error
    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a Timeout error
    pub fn timeout(operation: impl Into<String>) -> Self {
        PortError::Timeout {
            operation: operation.into(),
        }
    }

    /// Creates a Transformation error
    pub fn transformation(message: impl Into<String>) -> Self {
        PortError::Transformation {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true if the request may have never reached the service
    pub fn is_transient(&self) -> bool {
        match self {
            PortError::Connection { .. } | PortError::Timeout { .. } => true,
            PortError::UnexpectedStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns true if this error indicates the entity was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }
}

/// Marker trait for all domain ports
///
/// Port traits extend this marker so adapters can be shared across tasks.
pub trait DomainPort: Send + Sync + 'static {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_error_not_found() {
        let error = PortError::not_found("Claim", "c1");
        assert!(error.is_not_found());
        assert!(!error.is_transient());
        assert!(error.to_string().contains("Claim"));
        assert!(error.to_string().contains("c1"));
    }

    #[test]
    fn test_port_error_transient() {
        assert!(PortError::timeout("list_claims").is_transient());
        assert!(PortError::connection("refused").is_transient());
        assert!(PortError::unexpected_status(503, "").is_transient());
        assert!(!PortError::unexpected_status(422, "amount").is_transient());
        assert!(!PortError::transformation("bad json").is_transient());
    }
}
