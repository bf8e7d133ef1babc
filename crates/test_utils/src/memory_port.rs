//! In-memory Claims API
//!
//! Behaves like the real service closely enough for client tests: it assigns
//! ids and timestamps, defaults new claims to PENDING, rejects an empty
//! submitter or a negative amount, and lists newest first. Each operation can
//! be made to fail on demand, and status updates can be held at a gate to keep
//! them in flight.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::{RwLock, Semaphore};
use uuid::Uuid;

use core_kernel::{ClaimId, DomainPort, PortError};
use domain_claims::{Claim, ClaimFilter, ClaimStatus, ClaimsPort, NewClaim, RecordedStatus};

pub const INJECTED_FAILURE: &str = "injected failure";

#[derive(Debug, Default)]
struct Switches {
    list: AtomicBool,
    create: AtomicBool,
    update: AtomicBool,
}

#[derive(Debug, Default)]
struct Calls {
    list: AtomicUsize,
    create: AtomicUsize,
    update: AtomicUsize,
}

/// Holds requests of one kind until released
#[derive(Debug, Clone)]
pub struct RequestGate {
    permits: Arc<Semaphore>,
}

impl RequestGate {
    fn closed() -> Self {
        Self {
            permits: Arc::new(Semaphore::new(0)),
        }
    }

    /// Lets `n` waiting (or future) requests through
    pub fn release(&self, n: usize) {
        self.permits.add_permits(n);
    }

    async fn pass(gate: &RwLock<Option<RequestGate>>) -> Result<(), PortError> {
        let gate = gate.read().await.clone();
        if let Some(gate) = gate {
            gate.permits
                .acquire()
                .await
                .map_err(|e| PortError::internal(e.to_string()))?
                .forget();
        }
        Ok(())
    }
}

/// In-memory implementation of `ClaimsPort`
#[derive(Debug, Default)]
pub struct InMemoryClaimsPort {
    /// Insertion order; listing reverses it
    claims: RwLock<Vec<Claim>>,
    failing: Switches,
    calls: Calls,
    update_gate: RwLock<Option<RequestGate>>,
    create_gate: RwLock<Option<RequestGate>>,
}

impl InMemoryClaimsPort {
    /// Creates an empty port
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates with claims, oldest first
    pub fn with_claims(claims: Vec<Claim>) -> Self {
        Self {
            claims: RwLock::new(claims),
            ..Self::default()
        }
    }

    /// Adds a claim as if it had just been created
    pub async fn seed(&self, claim: Claim) {
        self.claims.write().await.push(claim);
    }

    /// Current contents in list order, ignoring failure switches
    pub async fn stored(&self) -> Vec<Claim> {
        self.claims.read().await.iter().rev().cloned().collect()
    }

    pub fn fail_list(&self, failing: bool) {
        self.failing.list.store(failing, Ordering::SeqCst);
    }

    pub fn fail_create(&self, failing: bool) {
        self.failing.create.store(failing, Ordering::SeqCst);
    }

    pub fn fail_update(&self, failing: bool) {
        self.failing.update.store(failing, Ordering::SeqCst);
    }

    pub fn list_calls(&self) -> usize {
        self.calls.list.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.calls.create.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.calls.update.load(Ordering::SeqCst)
    }

    /// Makes every later status update wait for a permit from the returned gate
    pub async fn gate_updates(&self) -> RequestGate {
        let gate = RequestGate::closed();
        *self.update_gate.write().await = Some(gate.clone());
        gate
    }

    /// Makes every later creation wait for a permit from the returned gate
    pub async fn gate_creates(&self) -> RequestGate {
        let gate = RequestGate::closed();
        *self.create_gate.write().await = Some(gate.clone());
        gate
    }

    /// Lists claims matching `filter`, newest first
    pub async fn list(&self, filter: &ClaimFilter) -> Result<Vec<Claim>, PortError> {
        self.calls.list.fetch_add(1, Ordering::SeqCst);
        if self.failing.list.load(Ordering::SeqCst) {
            return Err(PortError::unexpected_status(500, INJECTED_FAILURE));
        }
        Ok(self
            .claims
            .read()
            .await
            .iter()
            .rev()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect())
    }

    /// Creates a claim and returns it with the service-assigned fields
    pub async fn insert(&self, request: &NewClaim) -> Result<Claim, PortError> {
        self.calls.create.fetch_add(1, Ordering::SeqCst);
        RequestGate::pass(&self.create_gate).await?;
        if self.failing.create.load(Ordering::SeqCst) {
            return Err(PortError::connection(INJECTED_FAILURE));
        }
        if request.user_id.is_empty() {
            return Err(PortError::unexpected_status(422, "user_id must not be empty"));
        }
        if request.amount < Decimal::ZERO {
            return Err(PortError::unexpected_status(422, "amount must be >= 0"));
        }

        let claim = Claim {
            claim_id: ClaimId::new(Uuid::new_v4().to_string()),
            user_id: request.user_id.clone(),
            amount: request.amount,
            description: request.description.clone(),
            status: ClaimStatus::Pending.into(),
            created_at: Utc::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
        };
        self.claims.write().await.push(claim.clone());
        Ok(claim)
    }

    /// Sets a claim's status to the upper-cased `status`, whatever its text
    pub async fn set_status(&self, claim_id: &ClaimId, status: &str) -> Result<Claim, PortError> {
        self.calls.update.fetch_add(1, Ordering::SeqCst);

        RequestGate::pass(&self.update_gate).await?;

        if self.failing.update.load(Ordering::SeqCst) {
            return Err(PortError::unexpected_status(500, INJECTED_FAILURE));
        }

        let mut claims = self.claims.write().await;
        let claim = claims
            .iter_mut()
            .find(|c| &c.claim_id == claim_id)
            .ok_or_else(|| PortError::not_found("Claim", claim_id))?;
        claim.status = RecordedStatus::from(status.to_uppercase());
        Ok(claim.clone())
    }
}

impl DomainPort for InMemoryClaimsPort {}

#[async_trait]
impl ClaimsPort for InMemoryClaimsPort {
    async fn list_claims(&self, filter: &ClaimFilter) -> Result<Vec<Claim>, PortError> {
        self.list(filter).await
    }

    async fn create_claim(&self, request: &NewClaim) -> Result<(), PortError> {
        self.insert(request).await.map(|_| ())
    }

    async fn update_status(&self, claim_id: &ClaimId, status: ClaimStatus) -> Result<(), PortError> {
        self.set_status(claim_id, status.as_str()).await.map(|_| ())
    }

    async fn health(&self) -> Result<(), PortError> {
        Ok(())
    }
}
