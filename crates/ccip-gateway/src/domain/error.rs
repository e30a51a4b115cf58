//! Gateway error types and their HTTP mapping.
//!
//! | Error | Status |
//! |-------|--------|
//! | malformed sender / call data, unsupported call | 400 |
//! | no record for the query | 404 |
//! | signing failure, record source failure | 500 |

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use shared_crypto::CryptoError;
use shared_types::Selector;
use thiserror::Error;

/// Errors raised while answering a lookup.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// `sender` is not a 20-byte hex address
    #[error("invalid sender address: {0}")]
    InvalidSender(String),

    /// Call data is not hex or does not decode
    #[error("invalid call data: {0}")]
    InvalidCallData(String),

    /// Call data carries a selector this gateway does not answer
    #[error("unsupported call {0}")]
    UnsupportedCall(Selector),

    /// No record matches the query
    #[error("no record for {name}")]
    RecordNotFound {
        /// Dotted name (or hex if not decodable)
        name: String,
    },

    /// The record source failed
    #[error("record source error: {0}")]
    Source(String),

    /// Signing the response failed
    #[error("signing failed: {0}")]
    Signing(#[from] CryptoError),

    /// Startup configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Listener or server failure
    #[error("server error: {0}")]
    Server(String),
}

impl GatewayError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidSender(_) | Self::InvalidCallData(_) | Self::UnsupportedCall(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::RecordNotFound { .. } => StatusCode::NOT_FOUND,
            Self::Source(_) | Self::Signing(_) | Self::Config(_) | Self::Server(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Error body returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable reason
    pub message: String,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Result alias for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;
