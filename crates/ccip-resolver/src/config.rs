//! Resolver configuration with validation.

use crate::domain::dns::dns_encode;
use crate::domain::errors::ConfigError;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Bytes};

/// Default gateway URL template.
pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:8080/{sender}/{data}.json";

/// Construction parameters for an offchain resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// The resolver's own address; signatures are bound to it.
    pub address: Address,
    /// Gateway URL template placed in every `OffchainLookup`.
    pub gateway_url: String,
    /// Dotted root name answered directly (`""` is the DNS root).
    pub root_name: String,
    /// Initial owner.
    pub owner: Address,
    /// Initial gateway signers.
    pub signers: Vec<Address>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            address: Address::ZERO,
            gateway_url: DEFAULT_GATEWAY_URL.to_string(),
            root_name: String::new(),
            owner: Address::ZERO,
            signers: Vec::new(),
        }
    }
}

impl ResolverConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.address.is_zero() {
            return Err(ConfigError::ZeroAddress);
        }
        if self.owner.is_zero() {
            return Err(ConfigError::ZeroOwner);
        }
        if self.gateway_url.trim().is_empty() {
            return Err(ConfigError::EmptyGatewayUrl);
        }
        dns_encode(&self.root_name)?;
        Ok(())
    }

    /// Root name in DNS wire format.
    pub fn root_name_wire(&self) -> Result<Bytes, ConfigError> {
        Ok(dns_encode(&self.root_name)?)
    }
}
