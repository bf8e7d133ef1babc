//! Request payloads sent to the Claims API

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::UserId;
use crate::claim::{Claim, ClaimStatus};

/// Body of `POST /api/claims`
///
/// Nothing is validated here; empty ids and zero amounts go to the service
/// as entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewClaim {
    pub user_id: UserId,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub description: Option<String>,
}

/// Body of `PATCH /api/claims/{claim_id}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusPatch {
    pub status: ClaimStatus,
}

/// Optional narrowing of `GET /api/claims`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimFilter {
    /// Only claims submitted by this user
    pub user_id: Option<UserId>,
    /// Only claims in this status
    pub status: Option<ClaimStatus>,
}

impl ClaimFilter {
    /// Filter that matches every claim
    pub fn all() -> Self {
        Self::default()
    }

    /// Restricts to one submitter
    pub fn with_user_id(mut self, user_id: impl Into<UserId>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Restricts to one status
    pub fn with_status(mut self, status: ClaimStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns true if no restriction is set
    pub fn is_empty(&self) -> bool {
        self.user_id.is_none() && self.status.is_none()
    }

    /// Query parameters for the list endpoint; empty for an unrestricted load
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(ref user_id) = self.user_id {
            pairs.push(("user_id", user_id.to_string()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        pairs
    }

    /// Applies the filter locally, the way the service does
    pub fn matches(&self, claim: &Claim) -> bool {
        if let Some(ref user_id) = self.user_id {
            if &claim.user_id != user_id {
                return false;
            }
        }
        if let Some(status) = self.status {
            if !claim.status.as_str().eq_ignore_ascii_case(status.as_str()) {
                return false;
            }
        }
        true
    }
}
