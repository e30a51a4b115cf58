//! Adapters for the client's ports.

pub mod http;

pub use http::{expand_url, HttpTransport};
