//! Claims Domain
//!
//! This crate describes the claim records the external Claims API stores and
//! the requests the client may send it.
//!
//! # Claim Lifecycle
//!
//! ```text
//! submit -> PENDING <-> APPROVED
//!              ^  \       ^
//!              |   v      |
//!              REJECTED <-+
//! ```
//!
//! The service assigns the id, timestamp, and initial status. The client only
//! requests transitions; which transitions are allowed is the service's call.

pub mod claim;
pub mod request;
pub mod ports;
pub mod error;

pub use claim::{Claim, ClaimStatus, RecordedStatus};
pub use request::{NewClaim, StatusPatch, ClaimFilter};
pub use ports::ClaimsPort;
pub use error::ClaimError;
