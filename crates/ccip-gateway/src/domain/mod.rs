//! Domain types for the gateway.
//!
//! Configuration, error mapping and record entries.

pub mod config;
pub mod error;
pub mod records;

// Re-exports for convenience
pub use config::{ConfigError, GatewayConfig};
pub use error::{ErrorBody, GatewayError, GatewayResult};
pub use records::{RecordEntry, RecordKey};
