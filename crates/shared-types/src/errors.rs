//! # Error Types
//!
//! Errors raised when parsing shared primitives.

use thiserror::Error;

/// Errors from constructing fixed-width primitives.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TypeError {
    /// Input had the wrong number of bytes.
    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Required length in bytes
        expected: usize,
        /// Supplied length in bytes
        actual: usize,
    },

    /// Input was not valid hex.
    #[error("Invalid hex: {0}")]
    InvalidHex(String),
}
