//! # Canonical Hasher
//!
//! The digest a gateway signs and the resolver recovers from:
//!
//! ```text
//! keccak256(0x19 ‖ 0x00 ‖ target(20) ‖ expires(8, big-endian)
//!           ‖ keccak256(request) ‖ keccak256(result))
//! ```
//!
//! `0x1900` is the EIP-191 "version 0" prefix (data with intended
//! validator), so the signature is bound to one resolver instance.

use super::abi::{decode, encode, ParamType, Token};
use super::errors::AbiError;
use shared_crypto::{keccak256, CryptoError, Keccak256Hasher, Secp256k1KeyPair};
use shared_types::{Address, Bytes, Hash, U256};

const EIP191_VERSION_0: [u8; 2] = [0x19, 0x00];

/// Digest binding `(target, expires, request, result)`.
#[must_use]
pub fn signature_hash(target: &Address, expires: u64, request: &[u8], result: &[u8]) -> Hash {
    let mut hasher = Keccak256Hasher::new();
    hasher.update(&EIP191_VERSION_0);
    hasher.update(target.as_bytes());
    hasher.update(&expires.to_be_bytes());
    hasher.update(keccak256(request).as_bytes());
    hasher.update(keccak256(result).as_bytes());
    hasher.finalize()
}

/// Gateway response body: `abi.encode(bytes result, uint64 expires, bytes sig)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedResponse {
    /// Result bytes returned to the original caller.
    pub result: Bytes,
    /// Unix time after which the response is rejected.
    pub expires: u64,
    /// 65-byte `r ‖ s ‖ v` (or 64-byte compact) signature.
    pub signature: Bytes,
}

impl SignedResponse {
    /// ABI-encodes the response.
    #[must_use]
    pub fn encode(&self) -> Bytes {
        encode(&[
            Token::Bytes(self.result.clone()),
            Token::Uint(U256::from(self.expires)),
            Token::Bytes(self.signature.clone()),
        ])
    }

    /// Strictly decodes a response.
    pub fn decode(data: &[u8]) -> Result<Self, AbiError> {
        let mut tokens = decode(&[ParamType::Bytes, ParamType::Uint(64), ParamType::Bytes], data)?
            .into_iter();
        let mut next = || tokens.next().ok_or(AbiError::UnexpectedToken("response field"));

        let result = next()?.into_bytes()?;
        // Uint(64) decoding already rejects wider values.
        let expires = next()?.into_uint()?.low_u64();
        let signature = next()?.into_bytes()?;
        Ok(Self {
            result,
            expires,
            signature,
        })
    }
}

/// Signs `(target, expires, request, result)` the way a gateway does.
pub fn sign_response(
    key: &Secp256k1KeyPair,
    target: &Address,
    expires: u64,
    request: &[u8],
    result: Bytes,
) -> Result<SignedResponse, CryptoError> {
    let digest = signature_hash(target, expires, request, &result);
    let signature = key.sign_prehash(&digest)?;
    Ok(SignedResponse {
        result,
        expires,
        signature: signature.to_bytes().to_vec(),
    })
}
