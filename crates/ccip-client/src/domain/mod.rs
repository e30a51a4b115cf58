//! Domain types for the client.

pub mod config;
pub mod error;

pub use config::{ClientConfig, ConfigError, DEFAULT_MAX_REDIRECTS};
pub use error::{ClientError, ClientResult, TransportError};
