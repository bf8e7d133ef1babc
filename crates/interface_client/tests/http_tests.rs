//! End-to-end tests: the reqwest adapter against the stub Claims API

use std::sync::Arc;
use std::time::Instant;

use rust_decimal_macros::dec;

use core_kernel::{ClaimId, PortError};
use domain_claims::{ClaimFilter, ClaimStatus, ClaimsPort};
use interface_client::config::ClientConfig;
use interface_client::state::{SUBMIT_FAILURE, SUBMIT_SUCCESS};
use interface_client::{ClaimsClient, HttpClaimsApi, Severity};
use test_utils::{
    assert_claim_status, assert_same_claims, ClaimFixtures, InMemoryClaimsPort, RequestFixtures,
    StubClaimsApi, TestNewClaimBuilder,
};

fn config_for(stub: &StubClaimsApi) -> ClientConfig {
    ClientConfig {
        base_url: stub.base_url(),
        ..Default::default()
    }
}

fn adapter(config: &ClientConfig) -> HttpClaimsApi {
    HttpClaimsApi::new(config).unwrap()
}

fn client_for(config: &ClientConfig) -> ClaimsClient<HttpClaimsApi> {
    ClaimsClient::new(Arc::new(adapter(config)), config.notification_ttl())
}

async fn seeded_stub() -> StubClaimsApi {
    StubClaimsApi::spawn_with(Arc::new(InMemoryClaimsPort::with_claims(ClaimFixtures::seeded())))
        .await
        .unwrap()
}

// ============================================================================
// Adapter Tests
// ============================================================================

mod adapter_tests {
    use super::*;

    #[tokio::test]
    async fn test_list_decodes_service_payload() {
        let stub = seeded_stub().await;
        let api = adapter(&config_for(&stub));

        let claims = api.list_claims(&ClaimFilter::all()).await.unwrap();

        assert_same_claims(&claims, &stub.port().stored().await);
        let hotel = claims.iter().find(|c| c.claim_id.as_str() == "c2").unwrap();
        assert_eq!(hotel.amount, dec!(240.5));
        let bare = claims.iter().find(|c| c.claim_id.as_str() == "c3").unwrap();
        assert_eq!(bare.description, None);
    }

    #[tokio::test]
    async fn test_filters_are_sent_as_query() {
        let stub = seeded_stub().await;
        let api = adapter(&config_for(&stub));

        let pending = api
            .list_claims(&ClaimFilter::all().with_status(ClaimStatus::Pending))
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].claim_id.as_str(), "c1");

        let mine = api
            .list_claims(&ClaimFilter::all().with_user_id("u1").with_status(ClaimStatus::Rejected))
            .await
            .unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].claim_id.as_str(), "c3");
    }

    #[tokio::test]
    async fn test_create_posts_the_request() {
        let stub = StubClaimsApi::spawn().await.unwrap();
        let api = adapter(&config_for(&stub));

        api.create_claim(&RequestFixtures::taxi()).await.unwrap();

        let stored = stub.port().stored().await;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].user_id.as_str(), "u1");
        assert_eq!(stored[0].amount, dec!(100));
        assert!(stored[0].has_status(ClaimStatus::Pending));
    }

    #[tokio::test]
    async fn test_create_sends_fractional_amount_and_description() {
        let stub = StubClaimsApi::spawn().await.unwrap();
        let api = adapter(&config_for(&stub));
        let request = TestNewClaimBuilder::new()
            .with_user_id("u42")
            .with_amount(dec!(19.99))
            .with_description("parking at the airport")
            .build();

        api.create_claim(&request).await.unwrap();

        let stored = stub.port().stored().await;
        assert_eq!(stored[0].user_id.as_str(), "u42");
        assert_eq!(stored[0].amount, dec!(19.99));
        assert_eq!(stored[0].description.as_deref(), Some("parking at the airport"));
    }

    #[tokio::test]
    async fn test_rejected_create_reports_status() {
        let stub = StubClaimsApi::spawn().await.unwrap();
        let api = adapter(&config_for(&stub));

        let err = api.create_claim(&RequestFixtures::negative_amount()).await.unwrap_err();

        assert!(matches!(err, PortError::UnexpectedStatus { status: 422, .. }));
        assert!(!err.is_transient());
    }

    #[tokio::test]
    async fn test_patch_unknown_claim_is_not_found() {
        let stub = StubClaimsApi::spawn().await.unwrap();
        let api = adapter(&config_for(&stub));

        let err = api
            .update_status(&ClaimId::new("missing"), ClaimStatus::Approved)
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_server_error_is_transient() {
        let stub = seeded_stub().await;
        stub.port().fail_update(true);
        let api = adapter(&config_for(&stub));

        let err = api
            .update_status(&ClaimId::new("c1"), ClaimStatus::Approved)
            .await
            .unwrap_err();

        assert!(matches!(err, PortError::UnexpectedStatus { status: 500, .. }));
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn test_unreachable_service_is_connection_error() {
        let config = ClientConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            ..Default::default()
        };
        let err = adapter(&config).health().await.unwrap_err();

        assert!(matches!(err, PortError::Connection { .. }));
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn test_health() {
        let stub = StubClaimsApi::spawn().await.unwrap();
        adapter(&config_for(&stub)).health().await.unwrap();
    }

    #[tokio::test]
    async fn test_bearer_token_is_attached() {
        let port = Arc::new(InMemoryClaimsPort::with_claims(ClaimFixtures::seeded()));
        let stub = StubClaimsApi::spawn_with_token(port, "s3cret").await.unwrap();

        let anonymous = adapter(&config_for(&stub));
        let err = anonymous.list_claims(&ClaimFilter::all()).await.unwrap_err();
        assert!(matches!(err, PortError::UnexpectedStatus { status: 401, .. }));

        let config = ClientConfig {
            api_token: Some("s3cret".to_string()),
            ..config_for(&stub)
        };
        let claims = adapter(&config).list_claims(&ClaimFilter::all()).await.unwrap();
        assert_eq!(claims.len(), 3);
    }
}

// ============================================================================
// Client Scenario Tests
// ============================================================================

mod scenario_tests {
    use super::*;

    #[tokio::test]
    async fn test_submit_then_see_it_listed() {
        let stub = StubClaimsApi::spawn().await.unwrap();
        let client = client_for(&config_for(&stub));
        client.load_list().await;
        assert!(client.snapshot().claims().is_empty());

        client.with_state(|state| {
            state.set_user_id("u1");
            state.set_amount(dec!(100));
            state.set_description("taxi");
        });
        client.submit_claim().await.unwrap();

        let state = client.snapshot();
        assert_eq!(stub.port().create_calls(), 1);
        assert_eq!(state.claims().len(), 1);
        assert_eq!(state.claims()[0].user_id.as_str(), "u1");
        assert_eq!(state.claims()[0].amount, dec!(100));
        assert!(state.claims()[0].has_status(ClaimStatus::Pending));
        assert!(!state.is_submitting());
        assert_eq!(
            state.visible_notification(Instant::now()),
            Some((SUBMIT_SUCCESS, Severity::Success))
        );
    }

    #[tokio::test]
    async fn test_approve_pending_claim() {
        let stub = seeded_stub().await;
        let client = client_for(&config_for(&stub));
        client.load_list().await;

        client
            .request_status_transition(ClaimId::new("c1"), ClaimStatus::Approved)
            .await
            .unwrap();

        let state = client.snapshot();
        assert_claim_status(state.claims(), "c1", ClaimStatus::Approved);
        assert_same_claims(state.claims(), &stub.port().stored().await);
        assert_eq!(
            state.visible_notification(Instant::now()),
            Some(("Status updated to APPROVED", Severity::Success))
        );
    }

    #[tokio::test]
    async fn test_failed_submit_over_http() {
        let stub = seeded_stub().await;
        let client = client_for(&config_for(&stub));
        client.load_list().await;
        let before = client.snapshot().claims().to_vec();

        stub.port().fail_create(true);
        client.with_state(|state| {
            state.set_user_id("u1");
            state.set_amount(dec!(100));
            state.set_description("taxi");
        });
        assert!(client.submit_claim().await.is_err());

        let state = client.snapshot();
        assert_eq!(state.form().description, "taxi");
        assert_eq!(state.form().amount, dec!(100));
        assert_same_claims(state.claims(), &before);
        assert!(!state.is_submitting());
        assert_eq!(
            state.visible_notification(Instant::now()),
            Some((SUBMIT_FAILURE, Severity::Error))
        );
    }

    #[tokio::test]
    async fn test_unknown_status_survives_the_round_trip() {
        let port = Arc::new(InMemoryClaimsPort::with_claims(vec![ClaimFixtures::escalated()]));
        let stub = StubClaimsApi::spawn_with(port).await.unwrap();
        let client = client_for(&config_for(&stub));

        assert!(client.load_list().await);

        let state = client.snapshot();
        assert_eq!(state.claims()[0].status.as_str(), "ESCALATED");
        assert_eq!(state.claims()[0].status.known(), None);
    }

    #[tokio::test]
    async fn test_service_down_keeps_client_usable() {
        let stub = seeded_stub().await;
        let client = client_for(&config_for(&stub));
        client.load_list().await;

        stub.port().fail_list(true);
        assert!(!client.load_list().await);
        assert_eq!(client.snapshot().claims().len(), 3);

        stub.port().fail_list(false);
        assert!(client.load_list().await);
    }
}
