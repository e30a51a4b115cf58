//! ERC-3668 calling environment.
//!
//! Calls a contract, catches an `OffchainLookup` revert, fetches the answer
//! from the listed gateways and resubmits it through the callback.
//!
//! # Usage
//!
//! ```ignore
//! use ccip_client::{CcipReadClient, ClientConfig, HttpTransport};
//!
//! let config = ClientConfig::default();
//! let transport = Arc::new(HttpTransport::new(&config)?);
//! let client = CcipReadClient::new(transport, config)?;
//! let addr = client.resolve(&resolver, caller, "ducks.eth", &addr_call).await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod client;
pub mod domain;
pub mod ports;

// Re-exports for public API
pub use adapters::{expand_url, HttpTransport};
pub use client::CcipReadClient;
pub use domain::{
    ClientConfig, ClientError, ClientResult, ConfigError, TransportError, DEFAULT_MAX_REDIRECTS,
};
pub use ports::{CallTarget, GatewayTransport};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
