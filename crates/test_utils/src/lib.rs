//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! claims tracker test suite.
//!
//! # Modules
//!
//! - `memory_port`: In-memory `ClaimsPort` with failure injection
//! - `stub_api`: The in-memory port served over HTTP on an ephemeral port
//! - `fixtures`: Pre-built test data for common entities
//! - `builders`: Builder patterns for test data construction
//! - `assertions`: Custom assertion helpers for domain types
//! - `generators`: Property-based test data generators

pub mod memory_port;
pub mod stub_api;
pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use memory_port::{InMemoryClaimsPort, RequestGate};
pub use stub_api::StubClaimsApi;
pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
