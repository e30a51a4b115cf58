//! # CCIP Offchain Resolver
//!
//! A name resolver for a delegated namespace. Queries for the root name are
//! answered by a wrapped root delegate; every other query is refused with an
//! ERC-3668 `OffchainLookup` redirect. The caller fetches a signed answer
//! from a gateway and submits it to `resolve_with_proof`, which accepts it
//! only if a registered signer produced it and it has not expired.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): ABI codec, canonical digest, signer
//!   registry, deferred-lookup types, verifier. No I/O.
//! - **Ports Layer** (`ports/`): `OffchainResolverApi` inbound; root
//!   delegate, event sink, clock and delegate directory outbound
//! - **Adapters** (`adapters/`): in-memory port implementations
//! - **Service Layer** (`service.rs`, `dispatch.rs`): wires domain logic to
//!   ports and exposes a raw call-data surface
//!
//! ## Security Notes
//!
//! - **Target binding**: signatures commit to this resolver's address
//! - **Request binding**: signatures commit to the exact extra data bytes
//! - **Low-S only**: malleable signatures are rejected during recovery
//! - **Owner-only administration**: checked before any mutation

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod config;
pub mod dispatch;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use config::ResolverConfig;
pub use domain::abi::{ParamType, Token};
pub use domain::dns::{dns_decode, dns_encode};
pub use domain::entities::{
    CallOutcome, ResolverSnapshot, ResolverState, RevertPayload, VerifiedResponse,
};
pub use domain::errors::{AbiError, ConfigError, DnsError, ResolverError};
pub use domain::events::ResolverEvent;
pub use domain::hasher::{sign_response, signature_hash, SignedResponse};
pub use domain::lookup::{selectors, DeferredRequest, OffchainLookup, Resolution};
pub use domain::registry::SignerRegistry;
pub use domain::verifier::{recover_signer, verify};
pub use ports::inbound::OffchainResolverApi;
pub use ports::outbound::{DelegateDirectory, EventSink, RootDelegate, TimeSource};
pub use service::OffchainResolverService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
