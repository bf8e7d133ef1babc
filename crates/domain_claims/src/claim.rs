//! Claim record and status set

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{ClaimId, UserId};
use crate::error::ClaimError;

/// Claim status the client is allowed to request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ClaimStatus {
    /// Awaiting review; the service's default for new claims
    Pending,
    /// Accepted by a reviewer
    Approved,
    /// Refused by a reviewer
    Rejected,
}

impl ClaimStatus {
    /// Every status, in the order choice controls list them
    pub const ALL: [ClaimStatus; 3] = [
        ClaimStatus::Pending,
        ClaimStatus::Approved,
        ClaimStatus::Rejected,
    ];

    /// Wire spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Pending => "PENDING",
            ClaimStatus::Approved => "APPROVED",
            ClaimStatus::Rejected => "REJECTED",
        }
    }

    /// Label shown in choice controls
    pub fn label(&self) -> &'static str {
        match self {
            ClaimStatus::Pending => "Pending",
            ClaimStatus::Approved => "Approved",
            ClaimStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimStatus {
    type Err = ClaimError;

    /// Parses user input; case and surrounding whitespace are ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ClaimStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ClaimError::UnknownStatus(s.to_string()))
    }
}

/// Status as recorded by the service
///
/// The service is the source of truth, so a value outside the known set is
/// kept verbatim instead of failing the whole list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecordedStatus {
    Known(ClaimStatus),
    Other(String),
}

impl RecordedStatus {
    /// Returns the known status, if any
    pub fn known(&self) -> Option<ClaimStatus> {
        match self {
            RecordedStatus::Known(status) => Some(*status),
            RecordedStatus::Other(_) => None,
        }
    }

    /// Returns the text exactly as the service sent it
    pub fn as_str(&self) -> &str {
        match self {
            RecordedStatus::Known(status) => status.as_str(),
            RecordedStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for RecordedStatus {
    fn from(raw: String) -> Self {
        // Exact match only: anything else is the service's own spelling
        match ClaimStatus::ALL.into_iter().find(|s| s.as_str() == raw) {
            Some(status) => RecordedStatus::Known(status),
            None => RecordedStatus::Other(raw),
        }
    }
}

impl From<RecordedStatus> for String {
    fn from(status: RecordedStatus) -> String {
        match status {
            RecordedStatus::Known(status) => status.as_str().to_string(),
            RecordedStatus::Other(raw) => raw,
        }
    }
}

impl From<ClaimStatus> for RecordedStatus {
    fn from(status: ClaimStatus) -> Self {
        RecordedStatus::Known(status)
    }
}

impl PartialEq<ClaimStatus> for RecordedStatus {
    fn eq(&self, other: &ClaimStatus) -> bool {
        self.known() == Some(*other)
    }
}

impl fmt::Display for RecordedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A claim as returned by `GET /api/claims`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    /// Assigned by the service
    pub claim_id: ClaimId,
    /// Submitter
    pub user_id: UserId,
    /// Claimed amount, a JSON number on the wire
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Free text
    #[serde(default)]
    pub description: Option<String>,
    /// Current status
    pub status: RecordedStatus,
    /// Creation timestamp, kept as the service formatted it
    pub created_at: String,
}

impl Claim {
    /// Returns true if the service reports the given status for this claim
    pub fn has_status(&self, status: ClaimStatus) -> bool {
        self.status == status
    }
}
