//! Claims client operations
//!
//! Each operation talks to the port, then moves the shared state through its
//! transitions. The state lock is only taken for those synchronous
//! transitions, never across a request.
//!
//! Every successful mutation is followed by a full reload; nothing is written
//! to the cache optimistically.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::{info, warn};

use core_kernel::{ClaimId, PortError};
use domain_claims::{ClaimFilter, ClaimStatus, ClaimsPort};

use crate::error::ClientError;
use crate::state::ClaimsState;

type SharedState = Arc<Mutex<ClaimsState>>;

fn lock(state: &Mutex<ClaimsState>) -> MutexGuard<'_, ClaimsState> {
    // The state holds plain data; a panicked writer cannot leave it half-built
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Busy flag that is lowered when dropped, whatever the outcome
enum BusyGuard {
    Submit(SharedState),
    Transition(SharedState),
}

impl BusyGuard {
    /// Raises the submit flag, unless a submit is already in flight
    fn submit(state: &SharedState) -> Result<Self, ClientError> {
        let mut guarded = lock(state);
        guarded.check_submit()?;
        guarded.submit_started();
        Ok(BusyGuard::Submit(Arc::clone(state)))
    }

    /// Marks the row busy, unless that row already has an update in flight
    fn transition(state: &SharedState, claim_id: ClaimId) -> Result<Self, ClientError> {
        let mut guarded = lock(state);
        guarded.check_transition(&claim_id)?;
        guarded.transition_started(claim_id);
        Ok(BusyGuard::Transition(Arc::clone(state)))
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        match self {
            BusyGuard::Submit(state) => lock(state).submit_finished(),
            BusyGuard::Transition(state) => lock(state).transition_finished(),
        }
    }
}

/// Client for the external Claims API
///
/// Cheap to clone; clones share the port and the state, so operations can be
/// spawned onto separate tasks.
pub struct ClaimsClient<P: ?Sized> {
    port: Arc<P>,
    state: SharedState,
}

impl<P: ?Sized> Clone for ClaimsClient<P> {
    fn clone(&self) -> Self {
        Self {
            port: Arc::clone(&self.port),
            state: Arc::clone(&self.state),
        }
    }
}

impl<P: ClaimsPort + ?Sized> ClaimsClient<P> {
    /// Creates a client with empty state
    pub fn new(port: Arc<P>, notification_ttl: Duration) -> Self {
        Self {
            port,
            state: Arc::new(Mutex::new(ClaimsState::new(notification_ttl))),
        }
    }

    /// Returns a copy of the current state
    pub fn snapshot(&self) -> ClaimsState {
        lock(&self.state).clone()
    }

    /// Runs `f` against the state under the lock
    pub fn with_state<R>(&self, f: impl FnOnce(&mut ClaimsState) -> R) -> R {
        f(&mut lock(&self.state))
    }

    /// Reloads the list with the active filter
    ///
    /// Failures are logged and otherwise ignored; the previous list stays.
    /// Returns whether the cache was replaced.
    pub async fn load_list(&self) -> bool {
        let (ticket, filter) = {
            let mut state = lock(&self.state);
            (state.begin_load(), state.filter().clone())
        };

        match self.port.list_claims(&filter).await {
            Ok(claims) => {
                let count = claims.len();
                let applied = lock(&self.state).claims_loaded(ticket, claims);
                if applied {
                    info!(count, "Claim list refreshed");
                }
                applied
            }
            Err(e) => {
                warn!(error = %e, "Failed to load claims");
                false
            }
        }
    }

    /// Sets the active filter and reloads
    pub async fn load_filtered(&self, filter: ClaimFilter) -> bool {
        lock(&self.state).set_filter(filter);
        self.load_list().await
    }

    /// Submits the form as a new claim
    ///
    /// Sends exactly one creation request. On success the amount and
    /// description are cleared and the list is reloaded; on failure the form
    /// is left as entered. The error is also returned to the caller.
    ///
    /// Returns `ClientError::Busy` without sending anything while an earlier
    /// submit is still in flight.
    pub async fn submit_claim(&self) -> Result<(), ClientError> {
        let outcome = {
            let _busy = BusyGuard::submit(&self.state)
                .inspect_err(|e| info!(error = %e, "Submit refused"))?;
            let request = lock(&self.state).form().to_request();
            self.port.create_claim(&request).await
        };

        match outcome {
            Ok(()) => {
                lock(&self.state).submit_succeeded();
                self.load_list().await;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Claim submission failed");
                lock(&self.state).submit_failed();
                Err(e.into())
            }
        }
    }

    /// Requests a status transition for a loaded claim
    ///
    /// The displayed status only changes through the reload that follows a
    /// success. A second request for a row whose update is still in flight
    /// returns `ClientError::Busy` without sending anything.
    pub async fn request_status_transition(
        &self,
        claim_id: ClaimId,
        status: ClaimStatus,
    ) -> Result<(), ClientError> {
        let outcome = {
            let _busy = BusyGuard::transition(&self.state, claim_id.clone())
                .inspect_err(|e| info!(claim_id = %claim_id, error = %e, "Status transition refused"))?;
            self.port.update_status(&claim_id, status).await
        };

        match outcome {
            Ok(()) => {
                lock(&self.state).transition_succeeded(status);
                self.load_list().await;
                Ok(())
            }
            Err(e) => {
                warn!(claim_id = %claim_id, status = %status, error = %e, "Status transition failed");
                lock(&self.state).transition_failed();
                Err(e.into())
            }
        }
    }

    /// Checks that the Claims API answers
    pub async fn health(&self) -> Result<(), PortError> {
        self.port.health().await
    }
}
