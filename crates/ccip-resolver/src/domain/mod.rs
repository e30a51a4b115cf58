//! # Domain Layer
//!
//! Pure resolver logic: ABI codec, canonical digest, signer registry,
//! deferred-lookup types and the response verifier. No I/O.

pub mod abi;
pub mod dns;
pub mod entities;
pub mod errors;
pub mod events;
pub mod hasher;
pub mod lookup;
pub mod registry;
pub mod verifier;
