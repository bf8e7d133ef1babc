//! HTTP adapter for the Claims API
//!
//! Implements `ClaimsPort` with reqwest. Error mapping:
//!
//! - Connection refused / request not sent -> `PortError::Connection`
//! - Transport timeout -> `PortError::Timeout`
//! - Undecodable body -> `PortError::Transformation`
//! - 404 on a single claim -> `PortError::NotFound`
//! - Any other non-2xx -> `PortError::UnexpectedStatus`

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, Url};
use tracing::{debug, info};

use core_kernel::{ClaimId, CoreError, DomainPort, PortError};
use domain_claims::{Claim, ClaimFilter, ClaimStatus, ClaimsPort, NewClaim, StatusPatch};

use crate::config::ClientConfig;
use crate::error::ClientError;

const CLAIMS_PATH: &str = "api/claims";
const HEALTH_PATH: &str = "health";

/// `ClaimsPort` backed by the real Claims API
#[derive(Debug, Clone)]
pub struct HttpClaimsApi {
    root: Url,
    api_token: Option<String>,
    http: reqwest::Client,
}

impl HttpClaimsApi {
    /// Creates an adapter for the configured base URL
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is unusable or the HTTP client
    /// cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;

        // Trailing slash so joins append instead of replacing the last segment
        let root = Url::parse(&format!("{}/", config.api_root()))
            .map_err(|e| CoreError::invalid_url(config.api_root(), e))?;

        // No timeout: transport defaults apply
        let http = reqwest::Client::builder().build()?;

        Ok(Self {
            root,
            api_token: config.api_token.clone(),
            http,
        })
    }

    /// Returns the collection URL, `{base}/api/claims`
    pub fn claims_url(&self) -> Result<Url, PortError> {
        self.root
            .join(CLAIMS_PATH)
            .map_err(|e| PortError::internal(format!("cannot build claims URL: {e}")))
    }

    /// Returns `{base}/api/claims/{claim_id}` with the id percent-encoded
    pub fn claim_url(&self, claim_id: &ClaimId) -> Result<Url, PortError> {
        let mut url = self.claims_url()?;
        url.path_segments_mut()
            .map_err(|()| PortError::internal("base URL cannot carry a path"))?
            .push(claim_id.as_str());
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.api_token {
            Some(ref token) => request.bearer_auth(token),
            None => request,
        }
    }
}

fn transport_error(operation: &str, err: reqwest::Error) -> PortError {
    if err.is_timeout() {
        PortError::timeout(operation)
    } else if err.is_decode() {
        PortError::transformation(format!("{operation}: {err}"))
    } else {
        PortError::Connection {
            message: format!("{operation}: {err}"),
            source: Some(Box::new(err)),
        }
    }
}

async fn require_success(operation: &str, response: Response) -> Result<Response, PortError> {
    let status = response.status();
    debug!(operation, status = status.as_u16(), "Claims API responded");
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(PortError::unexpected_status(status.as_u16(), body))
}

impl DomainPort for HttpClaimsApi {}

#[async_trait]
impl ClaimsPort for HttpClaimsApi {
    async fn list_claims(&self, filter: &ClaimFilter) -> Result<Vec<Claim>, PortError> {
        const OP: &str = "list_claims";
        let url = self.claims_url()?;
        let mut request = self.http.get(url);
        if !filter.is_empty() {
            request = request.query(&filter.query_pairs());
        }

        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| transport_error(OP, e))?;
        let response = require_success(OP, response).await?;

        let claims: Vec<Claim> = response.json().await.map_err(|e| transport_error(OP, e))?;
        debug!(count = claims.len(), "Loaded claims");
        Ok(claims)
    }

    async fn create_claim(&self, request: &NewClaim) -> Result<(), PortError> {
        const OP: &str = "create_claim";
        let url = self.claims_url()?;

        info!(user_id = %request.user_id, amount = %request.amount, "Submitting claim");

        let response = self
            .authorize(self.http.post(url).json(request))
            .send()
            .await
            .map_err(|e| transport_error(OP, e))?;
        require_success(OP, response).await?;
        Ok(())
    }

    async fn update_status(&self, claim_id: &ClaimId, status: ClaimStatus) -> Result<(), PortError> {
        const OP: &str = "update_status";
        let url = self.claim_url(claim_id)?;

        info!(claim_id = %claim_id, status = %status, "Requesting status transition");

        let response = self
            .authorize(self.http.patch(url).json(&StatusPatch { status }))
            .send()
            .await
            .map_err(|e| transport_error(OP, e))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(PortError::not_found("Claim", claim_id));
        }
        require_success(OP, response).await?;
        Ok(())
    }

    async fn health(&self) -> Result<(), PortError> {
        const OP: &str = "health";
        let url = self
            .root
            .join(HEALTH_PATH)
            .map_err(|e| PortError::internal(format!("cannot build health URL: {e}")))?;

        let response = self
            .authorize(self.http.get(url))
            .send()
            .await
            .map_err(|e| transport_error(OP, e))?;
        require_success(OP, response).await?;
        Ok(())
    }
}
