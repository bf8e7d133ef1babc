//! Client state container
//!
//! Everything the client shows lives here, and every change goes through one
//! of the transition methods below. The claim list is a cache: only a load
//! writes it, and a load replaces it wholesale.

use std::time::{Duration, Instant};

use rust_decimal::Decimal;
use tracing::debug;

use core_kernel::{ClaimId, UserId};
use domain_claims::{Claim, ClaimFilter, ClaimStatus, NewClaim};

use crate::error::ClientError;
use crate::notification::{Notification, Severity};

pub const SUBMIT_SUCCESS: &str = "Claim submitted successfully";
pub const SUBMIT_FAILURE: &str = "Error submitting claim";
pub const UPDATE_FAILURE: &str = "Error updating status";

/// Message shown after a successful transition
pub fn update_success(status: ClaimStatus) -> String {
    format!("Status updated to {status}")
}

/// Submission form fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClaimForm {
    pub user_id: String,
    pub amount: Decimal,
    pub description: String,
}

impl ClaimForm {
    /// Builds the creation request exactly as entered
    pub fn to_request(&self) -> NewClaim {
        NewClaim {
            user_id: UserId::new(self.user_id.clone()),
            amount: self.amount,
            description: Some(self.description.clone()),
        }
    }

    /// Clears amount and description; the submitter id stays for the next claim
    fn reset_after_submit(&mut self) {
        self.amount = Decimal::ZERO;
        self.description.clear();
    }
}

/// Explicit state of the claims client
#[derive(Debug, Clone)]
pub struct ClaimsState {
    form: ClaimForm,
    claims: Vec<Claim>,
    filter: ClaimFilter,
    notification: Notification,
    submitting: bool,
    updating: Option<ClaimId>,
    /// Ticket handed to the most recently started load
    load_issued: u64,
    /// Ticket of the load whose result is currently cached
    load_applied: u64,
}

impl Default for ClaimsState {
    fn default() -> Self {
        Self::new(Notification::DEFAULT_TTL)
    }
}

impl ClaimsState {
    pub fn new(notification_ttl: Duration) -> Self {
        Self {
            form: ClaimForm::default(),
            claims: Vec::new(),
            filter: ClaimFilter::default(),
            notification: Notification::new(notification_ttl),
            submitting: false,
            updating: None,
            load_issued: 0,
            load_applied: 0,
        }
    }

    // ------------------------------------------------------------------
    // Form
    // ------------------------------------------------------------------

    pub fn set_user_id(&mut self, user_id: impl Into<String>) {
        self.form.user_id = user_id.into();
    }

    pub fn set_amount(&mut self, amount: Decimal) {
        self.form.amount = amount;
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.form.description = description.into();
    }

    // ------------------------------------------------------------------
    // Load
    // ------------------------------------------------------------------

    /// Replaces the active filter used by every subsequent load
    pub fn set_filter(&mut self, filter: ClaimFilter) {
        self.filter = filter;
    }

    /// Starts a load and returns its ticket
    pub fn begin_load(&mut self) -> u64 {
        self.load_issued += 1;
        self.load_issued
    }

    /// Replaces the cache with a load result
    ///
    /// Results from a load older than the one already applied are dropped so a
    /// slow response cannot overwrite a newer one. Returns whether the cache
    /// changed.
    pub fn claims_loaded(&mut self, ticket: u64, claims: Vec<Claim>) -> bool {
        if ticket <= self.load_applied {
            debug!(ticket, applied = self.load_applied, "Dropping stale claim list");
            return false;
        }
        self.load_applied = ticket;
        self.claims = claims;
        true
    }

    // ------------------------------------------------------------------
    // Submit
    // ------------------------------------------------------------------

    /// Refuses a submit while another one is in flight
    pub fn check_submit(&self) -> Result<(), ClientError> {
        if self.submitting {
            return Err(ClientError::Busy("submission"));
        }
        Ok(())
    }

    pub fn submit_started(&mut self) {
        self.submitting = true;
    }

    pub fn submit_finished(&mut self) {
        self.submitting = false;
    }

    pub fn submit_succeeded(&mut self) {
        self.form.reset_after_submit();
        self.notification.show(SUBMIT_SUCCESS, Severity::Success);
    }

    /// Leaves the form untouched so the user can resubmit
    pub fn submit_failed(&mut self) {
        self.notification.show(SUBMIT_FAILURE, Severity::Error);
    }

    // ------------------------------------------------------------------
    // Status transition
    // ------------------------------------------------------------------

    /// Refuses a transition for the row whose update is still in flight
    ///
    /// Other rows may start their own; the marker then moves to them.
    pub fn check_transition(&self, claim_id: &ClaimId) -> Result<(), ClientError> {
        if self.is_updating(claim_id) {
            return Err(ClientError::Busy("update"));
        }
        Ok(())
    }

    /// Marks `claim_id` as the row with an update in flight; single slot
    pub fn transition_started(&mut self, claim_id: ClaimId) {
        self.updating = Some(claim_id);
    }

    pub fn transition_finished(&mut self) {
        self.updating = None;
    }

    pub fn transition_succeeded(&mut self, status: ClaimStatus) {
        self.notification.show(update_success(status), Severity::Success);
    }

    pub fn transition_failed(&mut self) {
        self.notification.show(UPDATE_FAILURE, Severity::Error);
    }

    // ------------------------------------------------------------------
    // Notification
    // ------------------------------------------------------------------

    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) {
        self.notification.show(message, severity);
    }

    pub fn dismiss_notification(&mut self) {
        self.notification.dismiss();
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn form(&self) -> &ClaimForm {
        &self.form
    }

    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    pub fn filter(&self) -> &ClaimFilter {
        &self.filter
    }

    pub fn find_claim(&self, claim_id: &ClaimId) -> Option<&Claim> {
        self.claims.iter().find(|c| &c.claim_id == claim_id)
    }

    pub fn notification(&self) -> &Notification {
        &self.notification
    }

    /// Visible notification, if any
    pub fn visible_notification(&self, now: Instant) -> Option<(&str, Severity)> {
        self.notification.visible_at(now)
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn updating(&self) -> Option<&ClaimId> {
        self.updating.as_ref()
    }

    pub fn is_updating(&self, claim_id: &ClaimId) -> bool {
        self.updating.as_ref() == Some(claim_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn claim(id: &str) -> Claim {
        Claim {
            claim_id: ClaimId::new(id),
            user_id: UserId::new("u1"),
            amount: dec!(10),
            description: None,
            status: ClaimStatus::Pending.into(),
            created_at: "2024-01-01T00:00:00".to_string(),
        }
    }

    #[test]
    fn test_form_request_sends_values_as_entered() {
        let mut state = ClaimsState::default();
        state.set_user_id("u1");
        state.set_amount(dec!(100));
        state.set_description("taxi");

        let request = state.form().to_request();
        assert_eq!(request.user_id.as_str(), "u1");
        assert_eq!(request.amount, dec!(100));
        assert_eq!(request.description.as_deref(), Some("taxi"));
    }

    #[test]
    fn test_submit_success_resets_amount_and_description_only() {
        let mut state = ClaimsState::default();
        state.set_user_id("u1");
        state.set_amount(dec!(100));
        state.set_description("taxi");

        state.submit_succeeded();

        assert_eq!(state.form().user_id, "u1");
        assert_eq!(state.form().amount, Decimal::ZERO);
        assert_eq!(state.form().description, "");
        assert_eq!(state.notification().message(), SUBMIT_SUCCESS);
    }

    #[test]
    fn test_submit_failure_keeps_form() {
        let mut state = ClaimsState::default();
        state.set_user_id("u1");
        state.set_amount(dec!(100));

        state.submit_failed();

        assert_eq!(state.form().amount, dec!(100));
        assert_eq!(state.notification().severity(), Severity::Error);
    }

    #[test]
    fn test_loaded_list_replaces_cache() {
        let mut state = ClaimsState::default();
        let first = state.begin_load();
        assert!(state.claims_loaded(first, vec![claim("a"), claim("b")]));

        let second = state.begin_load();
        assert!(state.claims_loaded(second, vec![claim("c")]));

        assert_eq!(state.claims().len(), 1);
        assert!(state.find_claim(&ClaimId::new("c")).is_some());
        assert!(state.find_claim(&ClaimId::new("a")).is_none());
    }

    #[test]
    fn test_stale_load_is_dropped() {
        let mut state = ClaimsState::default();
        let older = state.begin_load();
        let newer = state.begin_load();

        assert!(state.claims_loaded(newer, vec![claim("new")]));
        assert!(!state.claims_loaded(older, vec![claim("old")]));

        assert_eq!(state.claims()[0].claim_id.as_str(), "new");
    }

    #[test]
    fn test_busy_marker_is_a_single_slot() {
        let mut state = ClaimsState::default();
        state.transition_started(ClaimId::new("a"));
        state.transition_started(ClaimId::new("b"));

        assert!(state.is_updating(&ClaimId::new("b")));
        assert!(!state.is_updating(&ClaimId::new("a")));

        state.transition_finished();
        assert_eq!(state.updating(), None);
    }

    #[test]
    fn test_submit_refused_while_submitting() {
        let mut state = ClaimsState::default();
        assert!(state.check_submit().is_ok());

        state.submit_started();
        assert!(state.check_submit().unwrap_err().is_busy());

        state.submit_finished();
        assert!(state.check_submit().is_ok());
    }

    #[test]
    fn test_transition_refused_only_for_the_busy_row() {
        let mut state = ClaimsState::default();
        state.transition_started(ClaimId::new("a"));

        let err = state.check_transition(&ClaimId::new("a")).unwrap_err();
        assert_eq!(err.to_string(), "update already in progress");
        assert!(state.check_transition(&ClaimId::new("b")).is_ok());
    }

    #[test]
    fn test_update_success_message() {
        assert_eq!(update_success(ClaimStatus::Approved), "Status updated to APPROVED");
    }
}
