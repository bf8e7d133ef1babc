//! Claims domain errors

use thiserror::Error;

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Unknown claim status: {0:?} (expected PENDING, APPROVED or REJECTED)")]
    UnknownStatus(String),
}
