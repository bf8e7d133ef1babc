//! Test Data Builders
//!
//! Builders for claims and creation requests. Tests set only the fields they
//! care about; the rest are filled with plausible fake values.

use chrono::{Duration, TimeZone, Utc};
use fake::faker::lorem::en::Words;
use fake::Fake;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use core_kernel::{ClaimId, UserId};
use domain_claims::{Claim, ClaimStatus, NewClaim, RecordedStatus};

fn fake_description() -> String {
    let words: Vec<String> = Words(1..4).fake();
    words.join(" ")
}

/// Builder for stored claims as the service would return them
pub struct TestClaimBuilder {
    claim_id: ClaimId,
    user_id: UserId,
    amount: Decimal,
    description: Option<String>,
    status: RecordedStatus,
    created_at: String,
}

impl Default for TestClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClaimBuilder {
    /// Creates a pending claim with a random id and description
    pub fn new() -> Self {
        Self {
            claim_id: ClaimId::new(Uuid::new_v4().to_string()),
            user_id: UserId::new(format!("u{}", (1..1000).fake::<u32>())),
            amount: Decimal::new((100..1_000_000).fake::<i64>(), 2),
            description: Some(fake_description()),
            status: ClaimStatus::Pending.into(),
            created_at: "2024-05-01T00:00:00.000000".to_string(),
        }
    }

    pub fn with_id(mut self, claim_id: impl Into<ClaimId>) -> Self {
        self.claim_id = claim_id.into();
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<UserId>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = amount;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn without_description(mut self) -> Self {
        self.description = None;
        self
    }

    pub fn with_status(mut self, status: ClaimStatus) -> Self {
        self.status = status.into();
        self
    }

    /// Sets a status string verbatim, known or not
    pub fn with_raw_status(mut self, status: impl Into<String>) -> Self {
        self.status = RecordedStatus::from(status.into());
        self
    }

    pub fn with_created_at(mut self, created_at: impl Into<String>) -> Self {
        self.created_at = created_at.into();
        self
    }

    /// Builds the claim
    pub fn build(self) -> Claim {
        Claim {
            claim_id: self.claim_id,
            user_id: self.user_id,
            amount: self.amount,
            description: self.description,
            status: self.status,
            created_at: self.created_at,
        }
    }

    /// Builds `count` claims for one submitter with ids `<prefix>-0..` and
    /// creation times one minute apart, oldest first
    pub fn batch(prefix: &str, user_id: &str, count: usize) -> Vec<Claim> {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).single().unwrap_or_else(Utc::now);
        (0..count)
            .map(|i| {
                let created = start + Duration::minutes(i as i64);
                Self::new()
                    .with_id(format!("{prefix}-{i}"))
                    .with_user_id(user_id)
                    .with_created_at(created.format("%Y-%m-%dT%H:%M:%S%.6f").to_string())
                    .build()
            })
            .collect()
    }
}

/// Builder for creation requests
pub struct TestNewClaimBuilder {
    user_id: UserId,
    amount: Decimal,
    description: Option<String>,
}

impl Default for TestNewClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestNewClaimBuilder {
    pub fn new() -> Self {
        Self {
            user_id: UserId::new("u1"),
            amount: dec!(100),
            description: Some(fake_description()),
        }
    }

    pub fn with_user_id(mut self, user_id: impl Into<UserId>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = amount;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn build(self) -> NewClaim {
        NewClaim {
            user_id: self.user_id,
            amount: self.amount,
            description: self.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_builder_defaults() {
        let claim = TestClaimBuilder::new().build();
        assert!(claim.has_status(ClaimStatus::Pending));
        assert!(claim.amount > Decimal::ZERO);
        assert!(claim.description.is_some());
    }

    #[test]
    fn test_claim_builder_overrides() {
        let claim = TestClaimBuilder::new()
            .with_id("c9")
            .with_user_id("u9")
            .with_amount(dec!(1.5))
            .without_description()
            .with_raw_status("ON_HOLD")
            .build();

        assert_eq!(claim.claim_id.as_str(), "c9");
        assert_eq!(claim.user_id.as_str(), "u9");
        assert_eq!(claim.amount, dec!(1.5));
        assert_eq!(claim.description, None);
        assert_eq!(claim.status.as_str(), "ON_HOLD");
    }

    #[test]
    fn test_batch_is_ordered() {
        let claims = TestClaimBuilder::batch("b", "u1", 3);
        assert_eq!(claims.len(), 3);
        assert_eq!(claims[2].claim_id.as_str(), "b-2");
        assert!(claims[0].created_at < claims[2].created_at);
    }

    #[test]
    fn test_new_claim_builder() {
        let request = TestNewClaimBuilder::new().with_amount(dec!(42)).build();
        assert_eq!(request.user_id.as_str(), "u1");
        assert_eq!(request.amount, dec!(42));
    }
}
