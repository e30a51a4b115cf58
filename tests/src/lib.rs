//! # CCIP Resolver Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Deployment and in-process gateway transport
//! ├── exploits/         # Relay and replay attacks against proof verification
//! └── integration/      # Client ↔ resolver ↔ gateway flows
//!     ├── flows.rs      # In-process end-to-end scenarios
//!     └── http.rs       # The same flow over a live HTTP gateway
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p ccip-tests
//! cargo test -p ccip-tests integration::
//! cargo test -p ccip-tests exploits::
//! ```

#![allow(dead_code)]

pub mod exploits;
pub mod fixtures;
pub mod integration;
