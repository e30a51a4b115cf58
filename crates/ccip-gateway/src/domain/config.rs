//! Gateway configuration with validation.
//!
//! Defaults are overridden by environment variables ([`GatewayConfig::from_env`])
//! and then by command-line flags in the binary.

use serde::{Deserialize, Serialize};
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Main gateway configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// HTTP server configuration
    pub http: HttpConfig,
    /// Response signing configuration
    pub signing: SigningConfig,
    /// Record table configuration
    pub records: RecordsConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Timeout configuration
    pub timeouts: TimeoutConfig,
}

impl GatewayConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.signing.ttl_secs == 0 {
            return Err(ConfigError::InvalidTtl);
        }

        if self.timeouts.request_secs == 0 {
            return Err(ConfigError::InvalidTimeout(
                "request timeout cannot be 0".into(),
            ));
        }

        if let Some(key) = &self.signing.private_key {
            if key.trim().is_empty() {
                return Err(ConfigError::Invalid("private key is empty".into()));
            }
        }

        Ok(())
    }

    /// HTTP listen address
    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.http.host, self.http.port)
    }

    /// Create configuration from environment variables.
    ///
    /// Unset variables keep their defaults; a set variable that does not
    /// parse is an error.
    ///
    /// # Environment Variables
    ///
    /// - `CCIP_GATEWAY_HOST`: Listen address (default: 127.0.0.1)
    /// - `CCIP_GATEWAY_PORT`: Listen port (default: 8080)
    /// - `CCIP_GATEWAY_TTL_SECS`: Response validity in seconds (default: 300)
    /// - `CCIP_GATEWAY_PRIVATE_KEY`: Hex signing key (default: random per process)
    /// - `CCIP_GATEWAY_RECORDS`: Path to a JSON record file (default: none)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Same as [`Self::from_env`] with an explicit variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            http: HttpConfig {
                host: parse_var(&lookup, "CCIP_GATEWAY_HOST")?.unwrap_or(defaults.http.host),
                port: parse_var(&lookup, "CCIP_GATEWAY_PORT")?.unwrap_or(defaults.http.port),
            },
            signing: SigningConfig {
                ttl_secs: parse_var(&lookup, "CCIP_GATEWAY_TTL_SECS")?
                    .unwrap_or(defaults.signing.ttl_secs),
                private_key: lookup("CCIP_GATEWAY_PRIVATE_KEY"),
            },
            records: RecordsConfig {
                path: lookup("CCIP_GATEWAY_RECORDS").map(PathBuf::from),
            },
            ..defaults
        })
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(name)
        .map(|value| {
            value.trim().parse().map_err(|e: T::Err| ConfigError::Env {
                var: name,
                value: value.clone(),
                reason: e.to_string(),
            })
        })
        .transpose()
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Bind address
    pub host: IpAddr,
    /// Port
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8080,
        }
    }
}

/// Response signing configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SigningConfig {
    /// Seconds a signed response stays valid
    pub ttl_secs: u64,
    /// Hex-encoded secp256k1 secret; a random key is generated when absent
    #[serde(skip_serializing)]
    pub private_key: Option<String>,
}

impl Default for SigningConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 300,
            private_key: None,
        }
    }
}

impl std::fmt::Debug for SigningConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningConfig")
            .field("ttl_secs", &self.ttl_secs)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Record table configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordsConfig {
    /// JSON file of `{ name, data, result }` entries
    pub path: Option<PathBuf>,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Enable CORS headers
    pub enabled: bool,
    /// Allowed origins ("*" for any)
    pub allowed_origins: Vec<String>,
    /// Max age for preflight cache (seconds)
    pub max_age: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        // Browsers performing ERC-3668 lookups call gateways cross-origin.
        Self {
            enabled: true,
            allowed_origins: vec!["*".to_string()],
            max_age: 3600,
        }
    }
}

/// Timeout configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Per-request timeout (seconds)
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 10 }
    }
}

impl TimeoutConfig {
    /// Per-request timeout
    pub fn request(&self) -> Duration {
        Duration::from_secs(self.request_secs)
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Signed responses would expire immediately
    #[error("ttl must be at least one second")]
    InvalidTtl,
    /// Invalid timeout value
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
    /// General configuration error
    #[error("invalid configuration: {0}")]
    Invalid(String),
    /// Environment variable set to an unparseable value
    #[error("invalid {var}={value:?}: {reason}")]
    Env {
        /// Variable name
        var: &'static str,
        /// Raw value
        value: String,
        /// Parser message
        reason: String,
    },
}
