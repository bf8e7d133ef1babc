//! Unit tests for the Identifiers module
//!
//! Identifiers are opaque: whatever the service sends must come back unchanged
//! through display, parsing, and serialization.

use core_kernel::{ClaimId, UserId};
use proptest::prelude::*;
use std::collections::HashSet;

mod claim_id_tests {
    use super::*;

    #[test]
    fn test_label() {
        assert_eq!(ClaimId::label(), "claim");
    }

    #[test]
    fn test_display_is_verbatim() {
        let id = ClaimId::new("9b2e7c4a-0c3f-4d8e-a2a1-5b1f0e6d7c88");
        assert_eq!(id.to_string(), "9b2e7c4a-0c3f-4d8e-a2a1-5b1f0e6d7c88");
    }

    #[test]
    fn test_non_uuid_ids_are_accepted() {
        let id: ClaimId = "c1".parse().unwrap();
        assert_eq!(id.as_str(), "c1");
    }

    #[test]
    fn test_json_is_a_bare_string() {
        let id = ClaimId::new("c1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"c1\"");

        let back: ClaimId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_hash_lookup_by_str() {
        let mut set = HashSet::new();
        set.insert(ClaimId::new("c1"));
        assert!(set.contains("c1"));
    }
}

mod user_id_tests {
    use super::*;

    #[test]
    fn test_label() {
        assert_eq!(UserId::label(), "user");
    }

    #[test]
    fn test_empty_user_id_is_allowed() {
        let id = UserId::new("");
        assert!(id.is_empty());
        assert_eq!(id.to_string(), "");
    }

    #[test]
    fn test_into_inner() {
        let id = UserId::new("u1");
        assert_eq!(id.into_inner(), "u1".to_string());
    }
}

proptest! {
    #[test]
    fn prop_claim_id_json_preserves_text(text in ".*") {
        let id = ClaimId::new(text.clone());
        let json = serde_json::to_string(&id).unwrap();
        let back: ClaimId = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back.as_str(), text.as_str());
    }
}
