//! Middleware stack for the gateway.
//!
//! Layer order: Request → CORS → Tracing → Timeout → Handler

pub mod cors;
pub mod tracing;

pub use cors::create_cors_layer;
pub use tracing::TracingLayer;
