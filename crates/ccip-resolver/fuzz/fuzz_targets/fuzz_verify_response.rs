//! Fuzz target for gateway response verification.
//!
//! ## Running
//!
//! ```bash
//! cd crates/ccip-resolver
//! cargo +nightly fuzz run fuzz_verify_response
//! ```

#![no_main]

use ccip_resolver::{verify, SignedResponse, SignerRegistry};
use libfuzzer_sys::fuzz_target;
use shared_types::Address;

/// Fuzz input structure for response verification.
#[derive(Debug, arbitrary::Arbitrary)]
struct FuzzInput {
    /// Resolver address the signature is bound to
    target: [u8; 20],
    /// Extra data (the signed request)
    request: Vec<u8>,
    /// Result bytes
    result: Vec<u8>,
    /// Expiry
    expires: u64,
    /// Raw signature bytes (any length)
    signature: Vec<u8>,
    /// Verification time
    now: u64,
}

fuzz_target!(|input: FuzzInput| {
    let target = Address::new(input.target);
    let response = SignedResponse {
        result: input.result,
        expires: input.expires,
        signature: input.signature,
    }
    .encode();

    // Verify - this should NEVER panic, regardless of input
    let empty = SignerRegistry::new();
    let first = verify(&target, &input.request, &response, &empty, input.now);

    // An empty registry can never accept anything
    assert!(first.is_err());

    // Deterministic
    let second = verify(&target, &input.request, &response, &empty, input.now);
    assert_eq!(first, second);
});
