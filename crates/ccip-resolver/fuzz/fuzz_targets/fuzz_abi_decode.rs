//! Fuzz target for strict ABI decoding.
//!
//! Gateway responses, callback arguments and revert payloads all arrive
//! from untrusted parties; decoding must never panic or over-allocate.
//!
//! ## Running
//!
//! ```bash
//! cd crates/ccip-resolver
//! cargo +nightly fuzz run fuzz_abi_decode
//! ```

#![no_main]

use ccip_resolver::domain::abi::{decode, encode, ParamType};
use ccip_resolver::{DeferredRequest, OffchainLookup, SignedResponse};
use libfuzzer_sys::fuzz_target;
use shared_types::Address;

fuzz_target!(|data: &[u8]| {
    // Anything that decodes must re-encode to something that decodes the same way.
    let types = [
        ParamType::Bytes,
        ParamType::Uint(64),
        ParamType::Array(Box::new(ParamType::String)),
    ];
    if let Ok(tokens) = decode(&types, data) {
        let again = decode(&types, &encode(&tokens)).expect("canonical encoding must decode");
        assert_eq!(tokens, again);
    }

    let _ = SignedResponse::decode(data);
    let _ = OffchainLookup::decode(data);
    let _ = DeferredRequest::from_extra_data(Address::ZERO, data);
});
