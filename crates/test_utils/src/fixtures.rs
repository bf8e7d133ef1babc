//! Pre-built Test Fixtures
//!
//! Provides ready-to-use claims whose ids, submitters and timestamps are fixed,
//! so tests can refer to them by value.

use core_kernel::{ClaimId, UserId};
use domain_claims::{Claim, ClaimStatus, NewClaim, RecordedStatus};
use rust_decimal_macros::dec;

/// Fixture for stored claims
pub struct ClaimFixtures;

impl ClaimFixtures {
    /// `c1`: a pending taxi claim from `u1`
    pub fn pending_taxi() -> Claim {
        Claim {
            claim_id: ClaimId::new("c1"),
            user_id: UserId::new("u1"),
            amount: dec!(100),
            description: Some("taxi".to_string()),
            status: ClaimStatus::Pending.into(),
            created_at: "2024-05-01T09:30:00.000000".to_string(),
        }
    }

    /// `c2`: an approved hotel claim from `u2`
    pub fn approved_hotel() -> Claim {
        Claim {
            claim_id: ClaimId::new("c2"),
            user_id: UserId::new("u2"),
            amount: dec!(240.50),
            description: Some("hotel".to_string()),
            status: ClaimStatus::Approved.into(),
            created_at: "2024-05-02T18:05:12.500000".to_string(),
        }
    }

    /// `c3`: a rejected claim from `u1` without a description
    pub fn rejected_without_description() -> Claim {
        Claim {
            claim_id: ClaimId::new("c3"),
            user_id: UserId::new("u1"),
            amount: dec!(12.99),
            description: None,
            status: ClaimStatus::Rejected.into(),
            created_at: "2024-05-03T07:00:00.000000".to_string(),
        }
    }

    /// `c4`: a claim in a status the client does not know
    pub fn escalated() -> Claim {
        Claim {
            claim_id: ClaimId::new("c4"),
            user_id: UserId::new("u3"),
            amount: dec!(5000),
            description: Some("surgery".to_string()),
            status: RecordedStatus::from("ESCALATED".to_string()),
            created_at: "2024-05-04T12:00:00.000000".to_string(),
        }
    }

    /// The three known-status fixtures, oldest first
    pub fn seeded() -> Vec<Claim> {
        vec![
            Self::pending_taxi(),
            Self::approved_hotel(),
            Self::rejected_without_description(),
        ]
    }
}

/// Fixture for creation requests
pub struct RequestFixtures;

impl RequestFixtures {
    /// `u1` claiming 100 for a taxi
    pub fn taxi() -> NewClaim {
        NewClaim {
            user_id: UserId::new("u1"),
            amount: dec!(100),
            description: Some("taxi".to_string()),
        }
    }

    /// A request the service rejects
    pub fn negative_amount() -> NewClaim {
        NewClaim {
            user_id: UserId::new("u1"),
            amount: dec!(-1),
            description: Some("refund?".to_string()),
        }
    }
}
