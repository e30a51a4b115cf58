//! # Ports Layer
//!
//! Trait definitions for the hexagonal architecture.
//! - **Inbound (Driving)**: API that callers of the resolver use
//! - **Outbound (Driven)**: Root delegate, event sink, clock, delegate lookup

pub mod inbound;
pub mod outbound;
