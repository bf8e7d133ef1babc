//! Core Kernel - Foundational types for the claims tracker
//!
//! This crate provides the building blocks shared by the domain and client crates:
//! - Opaque identifiers assigned by the external Claims API
//! - The port error taxonomy used by every Claims API adapter
//! - A small core error type

pub mod identifiers;
pub mod ports;
pub mod error;

pub use identifiers::{ClaimId, UserId};
pub use ports::{PortError, DomainPort};
pub use error::CoreError;
