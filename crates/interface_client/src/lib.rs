//! Claims Client
//!
//! This crate is the user-facing side of the claims tracker. It talks to the
//! external Claims API and keeps a local, disposable copy of what the service
//! returned.
//!
//! # Architecture
//!
//! - **HTTP adapter**: `ClaimsPort` over reqwest
//! - **State**: one container holding form fields, the cached list, busy flags,
//!   and the notification slot
//! - **Client**: the operations (load, submit, transition) driving the state
//! - **View**: plain text rendering of the state
//! - **Shell**: parsing and busy checks for the interactive commands
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_client::{ClaimsClient, HttpClaimsApi, config::ClientConfig};
//!
//! let config = ClientConfig::from_env()?;
//! let port = Arc::new(HttpClaimsApi::new(&config)?);
//! let client = ClaimsClient::new(port, config.notification_ttl());
//! client.load_list().await;
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod notification;
pub mod state;
pub mod client;
pub mod view;
pub mod shell;

pub use client::ClaimsClient;
pub use error::ClientError;
pub use http::HttpClaimsApi;
pub use notification::{Notification, Severity};
pub use state::{ClaimForm, ClaimsState};
pub use view::{StatusCategory, ViewOptions};
pub use shell::ShellCommand;
