//! CCIP gateway - answers ERC-3668 deferred lookups with signed responses.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      ccip-gateway                        │
//! ├──────────────────────────────────────────────────────────┤
//! │  GET /{sender}/{data}.json        POST /                 │
//! │         │                            │                   │
//! │  ┌──────┴────────────────────────────┴──────┐            │
//! │  │   Middleware: CORS → Tracing → Timeout   │            │
//! │  └────────────────────┬─────────────────────┘            │
//! │                       │                                  │
//! │  ┌────────────────────┴─────────────────────┐            │
//! │  │  GatewayService                          │            │
//! │  │  decode resolve(name, data) → lookup     │            │
//! │  │  → sign (target, expires, request, res)  │            │
//! │  └────────────────────┬─────────────────────┘            │
//! │                       │                                  │
//! │               RecordSource (port)                        │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use ccip_gateway::{GatewayConfig, GatewayServer, GatewayService, InMemoryRecordSource};
//!
//! let service = GatewayService::new(key, Arc::new(records), Arc::new(SystemClock), 300);
//! GatewayServer::new(GatewayConfig::default(), Arc::new(service))?
//!     .serve(shutdown)
//!     .await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod domain;
pub mod middleware;
pub mod ports;
pub mod server;
pub mod service;
pub mod telemetry;

// Re-exports for public API
pub use adapters::InMemoryRecordSource;
pub use domain::config::GatewayConfig;
pub use domain::error::{ErrorBody, GatewayError, GatewayResult};
pub use domain::records::{RecordEntry, RecordKey};
pub use ports::RecordSource;
pub use server::{build_router, GatewayServer, LookupRequest, LookupResponse};
pub use service::GatewayService;
pub use telemetry::{init_tracing, TelemetryConfig, TelemetryError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
