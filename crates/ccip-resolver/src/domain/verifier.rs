//! # Signature Verifier
//!
//! Turns a gateway response into result bytes, or refuses it.
//!
//! ## Gates (in order)
//!
//! 1. The response decodes as `(bytes, uint64, bytes)`.
//! 2. The signature recovers to some address over the canonical digest.
//! 3. That address is a registered signer.
//! 4. `now <= expires`.
//!
//! The signer gate runs before the expiry gate, so an expired response from
//! an unknown key reports `InvalidSigner`.

use super::entities::VerifiedResponse;
use super::errors::ResolverError;
use super::hasher::{signature_hash, SignedResponse};
use super::registry::SignerRegistry;
use shared_crypto::{recover_address, RecoverableSignature};
use shared_types::Address;

/// Recovers the signer of a response without consulting any registry.
///
/// Returns the recovered address together with the decoded response.
pub fn recover_signer(
    target: &Address,
    request: &[u8],
    response: &[u8],
) -> Result<(Address, SignedResponse), ResolverError> {
    let signed = SignedResponse::decode(response).map_err(ResolverError::MalformedResponse)?;
    let digest = signature_hash(target, signed.expires, request, &signed.result);
    let signature =
        RecoverableSignature::from_bytes(&signed.signature).map_err(ResolverError::InvalidSignature)?;
    let signer = recover_address(&digest, &signature).map_err(ResolverError::InvalidSignature)?;
    Ok((signer, signed))
}

/// Verifies a response against the registry and the current time.
pub fn verify(
    target: &Address,
    request: &[u8],
    response: &[u8],
    registry: &SignerRegistry,
    now: u64,
) -> Result<VerifiedResponse, ResolverError> {
    let (signer, signed) = recover_signer(target, request, response)?;

    if !registry.contains(&signer) {
        return Err(ResolverError::InvalidSigner { signer });
    }
    if now > signed.expires {
        return Err(ResolverError::Expired {
            expires: signed.expires,
            now,
        });
    }

    Ok(VerifiedResponse {
        signer,
        result: signed.result,
        expires: signed.expires,
    })
}
