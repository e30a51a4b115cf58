//! Cross-crate flows: resolver, gateway and client working together.

pub mod flows;
pub mod http;
