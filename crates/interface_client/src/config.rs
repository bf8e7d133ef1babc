//! Client configuration

use std::time::Duration;

use config::{builder::DefaultState, ConfigBuilder, Environment};
use core_kernel::CoreError;
use serde::Deserialize;

use crate::error::ClientError;

/// Where the Claims API lives when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the Claims API, without the `/api/claims` suffix
    pub base_url: String,
    /// Bearer token attached to every request when set
    #[serde(default)]
    pub api_token: Option<String>,
    /// How long a notification stays visible, in milliseconds
    pub notification_ttl_ms: u64,
    /// Log level
    pub log_level: String,
    /// Colour the status column
    pub color: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_token: None,
            notification_ttl_ms: 3000,
            log_level: "info".to_string(),
            color: true,
        }
    }
}

impl ClientConfig {
    /// Loads configuration from `CLAIMS_*` environment variables
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_environment(Environment::with_prefix("CLAIMS"))
    }

    /// Loads configuration from the given environment source over the defaults
    pub fn from_environment(environment: Environment) -> Result<Self, ClientError> {
        let config = Self::defaults()?
            .add_source(environment)
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
        let fallback = Self::default();
        config::Config::builder()
            .set_default("base_url", fallback.base_url)?
            .set_default("notification_ttl_ms", fallback.notification_ttl_ms)?
            .set_default("log_level", fallback.log_level)?
            .set_default("color", fallback.color)
    }

    /// Rejects base URLs reqwest could never reach
    pub fn validate(&self) -> Result<(), CoreError> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err(CoreError::configuration("base_url is empty"));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(CoreError::configuration(format!(
                "base_url must start with http:// or https://, got {url}"
            )));
        }
        Ok(())
    }

    /// Returns the base URL without a trailing slash
    pub fn api_root(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }

    /// Returns the notification time-to-live
    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }
}
