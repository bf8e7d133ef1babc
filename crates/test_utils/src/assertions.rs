//! Custom Test Assertions
//!
//! Assertion helpers for claim lists that give more meaningful failure
//! messages than comparing vectors directly.

use std::collections::HashSet;

use domain_claims::{Claim, ClaimStatus};

fn ids(claims: &[Claim]) -> Vec<&str> {
    claims.iter().map(|c| c.claim_id.as_str()).collect()
}

/// Asserts two lists hold the same claims in the same order
pub fn assert_same_claims(actual: &[Claim], expected: &[Claim]) {
    assert_eq!(
        ids(actual),
        ids(expected),
        "Claim lists differ by id or order"
    );
    for (a, e) in actual.iter().zip(expected) {
        assert_eq!(a, e, "Claim {} differs", a.claim_id);
    }
}

/// Asserts no claim id appears twice
pub fn assert_no_duplicate_ids(claims: &[Claim]) {
    let mut seen = HashSet::new();
    for claim in claims {
        assert!(
            seen.insert(claim.claim_id.as_str()),
            "Duplicate claim id {} in {:?}",
            claim.claim_id,
            ids(claims)
        );
    }
}

/// Asserts a claim with `claim_id` is present and returns it
pub fn assert_has_claim<'a>(claims: &'a [Claim], claim_id: &str) -> &'a Claim {
    claims
        .iter()
        .find(|c| c.claim_id.as_str() == claim_id)
        .unwrap_or_else(|| panic!("No claim {claim_id} in {:?}", ids(claims)))
}

/// Asserts a claim with `claim_id` is present in `status`
pub fn assert_claim_status(claims: &[Claim], claim_id: &str, status: ClaimStatus) {
    let claim = assert_has_claim(claims, claim_id);
    assert!(
        claim.has_status(status),
        "Claim {claim_id} has status {}, expected {status}",
        claim.status
    );
}

/// Asserts some claim satisfies `predicate`
pub fn assert_has_claim_with(claims: &[Claim], description: &str, predicate: impl Fn(&Claim) -> bool) {
    assert!(
        claims.iter().any(predicate),
        "No claim {description} in {:?}",
        ids(claims)
    );
}
