//! Adapters for the gateway's outbound ports.

pub mod records;

pub use records::InMemoryRecordSource;
