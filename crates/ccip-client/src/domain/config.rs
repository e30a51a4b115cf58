//! Client configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Redirect cap used by ERC-3668 clients.
pub const DEFAULT_MAX_REDIRECTS: usize = 4;

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Maximum `OffchainLookup` redirects followed per call
    pub max_redirects: usize,
    /// Per-request HTTP timeout (seconds)
    pub timeout_secs: u64,
    /// TCP connect timeout (seconds)
    pub connect_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            max_redirects: DEFAULT_MAX_REDIRECTS,
            timeout_secs: 10,
            connect_timeout_secs: 2,
        }
    }
}

impl ClientConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_redirects == 0 {
            return Err(ConfigError::NoRedirects);
        }
        if self.timeout_secs == 0 || self.connect_timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        Ok(())
    }

    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Connect timeout
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The client could never follow a redirect
    #[error("max_redirects must be at least 1")]
    NoRedirects,
    /// A timeout is zero
    #[error("timeouts must be at least one second")]
    InvalidTimeout,
}
