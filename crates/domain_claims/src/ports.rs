//! Claims API port
//!
//! The client depends on this trait only. The HTTP adapter talks to the real
//! service; tests plug in an in-memory implementation.

use async_trait::async_trait;

use core_kernel::{ClaimId, DomainPort, PortError};
use crate::claim::{Claim, ClaimStatus};
use crate::request::{ClaimFilter, NewClaim};

/// Operations the client needs from the Claims API
///
/// Mutating calls return `()`: the client never reads a creation or update
/// response, it re-fetches the list instead.
#[async_trait]
pub trait ClaimsPort: DomainPort {
    /// Fetches the claim collection, optionally narrowed by `filter`
    ///
    /// # Returns
    ///
    /// Claims in the order the service returned them
    async fn list_claims(&self, filter: &ClaimFilter) -> Result<Vec<Claim>, PortError>;

    /// Creates a claim; the service assigns id, status, and timestamp
    async fn create_claim(&self, request: &NewClaim) -> Result<(), PortError>;

    /// Requests a status transition for an existing claim
    ///
    /// # Returns
    ///
    /// `PortError::NotFound` if the service does not know `claim_id`
    async fn update_status(&self, claim_id: &ClaimId, status: ClaimStatus) -> Result<(), PortError>;

    /// Checks that the service is reachable
    async fn health(&self) -> Result<(), PortError>;
}
