//! Stub Claims API served over HTTP
//!
//! Serves an [`InMemoryClaimsPort`] with the same routes and status codes as
//! the real service, bound to an ephemeral localhost port. Tests point the
//! real HTTP adapter at [`StubClaimsApi::base_url`].

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;

use core_kernel::{ClaimId, PortError, UserId};
use domain_claims::{Claim, ClaimFilter, ClaimStatus, NewClaim};

use crate::memory_port::InMemoryClaimsPort;

type SharedPort = Arc<InMemoryClaimsPort>;

/// Port errors rendered the way the service renders them
struct StubError(PortError);

impl IntoResponse for StubError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self.0 {
            PortError::NotFound { .. } => (StatusCode::NOT_FOUND, "Claim not found".to_string()),
            PortError::UnexpectedStatus { status, body } => (
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                body.clone(),
            ),
            other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

impl From<PortError> for StubError {
    fn from(err: PortError) -> Self {
        StubError(err)
    }
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    user_id: Option<String>,
    status: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
struct RawStatusPatch {
    status: String,
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn list_claims(
    State(port): State<SharedPort>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Claim>>, StubError> {
    let mut filter = ClaimFilter::all();
    if let Some(user_id) = query.user_id.filter(|u| !u.is_empty()) {
        filter.user_id = Some(UserId::new(user_id));
    }
    if let Some(status) = query.status.filter(|s| !s.is_empty()) {
        match status.parse::<ClaimStatus>() {
            Ok(status) => filter.status = Some(status),
            // The service compares text, so an unknown status matches nothing
            Err(_) => return Ok(Json(Vec::new())),
        }
    }
    Ok(Json(port.list(&filter).await?))
}

async fn create_claim(
    State(port): State<SharedPort>,
    Json(request): Json<NewClaim>,
) -> Result<Json<Claim>, StubError> {
    Ok(Json(port.insert(&request).await?))
}

async fn update_status(
    State(port): State<SharedPort>,
    Path(claim_id): Path<String>,
    Json(patch): Json<RawStatusPatch>,
) -> Result<Json<Claim>, StubError> {
    let claim = port.set_status(&ClaimId::new(claim_id), &patch.status).await?;
    Ok(Json(claim))
}

/// Rejects requests to the claims routes without the expected bearer token
async fn require_token(State(token): State<Arc<String>>, request: Request, next: Next) -> Response {
    let expected = format!("Bearer {token}");
    let presented = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    if presented == Some(expected.as_str()) {
        next.run(request).await
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({ "detail": "Not authenticated" }))).into_response()
    }
}

/// Builds the stub router around `port`
pub fn router(port: SharedPort) -> Router {
    router_with_token(port, None)
}

/// Builds the stub router; with a token, the claims routes require it
pub fn router_with_token(port: SharedPort, token: Option<String>) -> Router {
    let mut claims = Router::new()
        .route("/api/claims", get(list_claims).post(create_claim))
        .route("/api/claims/:claim_id", axum::routing::patch(update_status));
    if let Some(token) = token {
        claims = claims.layer(middleware::from_fn_with_state(Arc::new(token), require_token));
    }

    Router::new()
        .route("/health", get(health))
        .merge(claims)
        .layer(TraceLayer::new_for_http())
        .with_state(port)
}

/// A running stub server; stops when dropped
pub struct StubClaimsApi {
    port: SharedPort,
    addr: SocketAddr,
    server: JoinHandle<()>,
}

impl StubClaimsApi {
    /// Starts an empty stub
    pub async fn spawn() -> io::Result<Self> {
        Self::spawn_with(Arc::new(InMemoryClaimsPort::new())).await
    }

    /// Starts a stub serving `port`
    pub async fn spawn_with(port: SharedPort) -> io::Result<Self> {
        Self::serve(router(Arc::clone(&port)), port).await
    }

    /// Starts a stub whose claims routes require `Authorization: Bearer <token>`
    pub async fn spawn_with_token(port: SharedPort, token: impl Into<String>) -> io::Result<Self> {
        Self::serve(router_with_token(Arc::clone(&port), Some(token.into())), port).await
    }

    async fn serve(app: Router, port: SharedPort) -> io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let server = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::warn!(error = %e, "Stub Claims API stopped");
            }
        });

        tracing::debug!(%addr, "Stub Claims API listening");
        Ok(Self { port, addr, server })
    }

    /// Base URL to hand to the client configuration
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// The store behind the server, for seeding and failure injection
    pub fn port(&self) -> &SharedPort {
        &self.port
    }
}

impl Drop for StubClaimsApi {
    fn drop(&mut self) {
        self.server.abort();
    }
}
