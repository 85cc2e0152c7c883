//! Gateway configuration.

use std::env;
use std::time::Duration;

use vitrine_core::error::{Result, VitrineError};

/// Default request timeout when none is configured.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the HTTP content gateway.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL of the backing content service
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl GatewayConfig {
    /// Creates a configuration with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Overrides the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Loads configuration from environment variables.
    ///
    /// `VITRINE_GATEWAY_URL` is required; `VITRINE_GATEWAY_TIMEOUT_SECS`
    /// optionally overrides the default timeout.
    pub fn try_from_env() -> Result<Self> {
        let base_url = env::var("VITRINE_GATEWAY_URL").map_err(|_| {
            VitrineError::validation("VITRINE_GATEWAY_URL not found in environment variables")
        })?;
        let timeout = env::var("VITRINE_GATEWAY_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        Ok(Self {
            base_url,
            timeout,
        })
    }
}
