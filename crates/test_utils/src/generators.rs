//! Property-Based Test Generators
//!
//! Provides proptest strategies for claims, statuses and status labels.

use proptest::prelude::*;
use rust_decimal::Decimal;

use core_kernel::{ClaimId, UserId};
use domain_claims::{Claim, ClaimStatus, NewClaim, RecordedStatus};

/// Strategy for the three known statuses
pub fn claim_status_strategy() -> impl Strategy<Value = ClaimStatus> {
    prop_oneof![
        Just(ClaimStatus::Pending),
        Just(ClaimStatus::Approved),
        Just(ClaimStatus::Rejected),
    ]
}

/// Strategy for arbitrary status labels, known ones mixed with anything else
pub fn status_label_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        claim_status_strategy().prop_map(|s| s.as_str().to_string()),
        "[A-Za-z_]{0,12}",
        any::<String>(),
    ]
}

/// Strategy for statuses as received from the service
pub fn recorded_status_strategy() -> impl Strategy<Value = RecordedStatus> {
    status_label_strategy().prop_map(RecordedStatus::from)
}

/// Strategy for non-negative amounts with two decimal places
pub fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for submitter ids as the service accepts them
pub fn user_id_strategy() -> impl Strategy<Value = UserId> {
    "u[0-9]{1,4}".prop_map(UserId::new)
}

/// Strategy for claims as the service returns them
pub fn claim_strategy() -> impl Strategy<Value = Claim> {
    (
        "[a-f0-9]{8}",
        user_id_strategy(),
        amount_strategy(),
        proptest::option::of("[a-z ]{0,20}"),
        recorded_status_strategy(),
    )
        .prop_map(|(id, user_id, amount, description, status)| Claim {
            claim_id: ClaimId::new(id),
            user_id,
            amount,
            description,
            status,
            created_at: "2024-05-01T00:00:00.000000".to_string(),
        })
}

/// Strategy for valid creation requests
pub fn new_claim_strategy() -> impl Strategy<Value = NewClaim> {
    (user_id_strategy(), amount_strategy(), "[a-z ]{0,20}").prop_map(
        |(user_id, amount, description)| NewClaim {
            user_id,
            amount,
            description: Some(description),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn test_amounts_are_non_negative(amount in amount_strategy()) {
            prop_assert!(amount >= Decimal::ZERO);
        }

        #[test]
        fn test_known_labels_parse(status in claim_status_strategy()) {
            prop_assert_eq!(RecordedStatus::from(status.as_str().to_string()).known(), Some(status));
        }
    }
}
