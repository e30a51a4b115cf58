//! Client error types.

use super::config::ConfigError;
use ccip_resolver::{DnsError, RevertPayload};
use shared_types::Address;
use thiserror::Error;

/// A single gateway fetch failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The gateway answered with a non-success status
    #[error("gateway returned {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Error message from the body, or the status text
        message: String,
    },

    /// The request never completed
    #[error("request failed: {0}")]
    Network(String),

    /// The success body was not `{ "data": "0x…" }`
    #[error("invalid response body: {0}")]
    InvalidBody(String),
}

impl TransportError {
    /// 4xx answers end the lookup; anything else moves on to the next URL.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Status { status, .. } if (400..500).contains(status))
    }
}

/// Errors returned by [`crate::CcipReadClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// The target reverted with something other than `OffchainLookup`
    #[error("call reverted ({} bytes)", .0.len())]
    Reverted(RevertPayload),

    /// `OffchainLookup.sender` does not name the called contract
    #[error("OffchainLookup sender {actual} does not match target {expected}")]
    SenderMismatch {
        /// Address that was called
        expected: Address,
        /// Address carried in the redirect
        actual: Address,
    },

    /// The redirect listed no gateways
    #[error("OffchainLookup carried no gateway URLs")]
    NoGateways,

    /// A gateway rejected the request (4xx)
    #[error("gateway {url} rejected the request: {source}")]
    Rejected {
        /// Gateway URL template
        url: String,
        /// Underlying failure
        source: TransportError,
    },

    /// Every gateway failed
    #[error("all gateways failed; last error: {0}")]
    GatewaysExhausted(TransportError),

    /// The target kept redirecting
    #[error("exceeded {0} redirects")]
    TooManyRedirects(usize),

    /// Return data did not decode
    #[error("malformed return data: {0}")]
    MalformedReturn(String),

    /// The name could not be DNS-encoded
    #[error("invalid name: {0}")]
    InvalidName(#[from] DnsError),

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// HTTP client construction failed
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;
