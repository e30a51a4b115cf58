//! # Resolver Errors
//!
//! Every failure of the resolver surfaces as a [`ResolverError`]. Each
//! variant maps to the revert payload the call surface returns through
//! [`ResolverError::revert_data`].

use super::abi::{encode_with_selector, Token};
use super::entities::RevertPayload;
use super::lookup::selectors;
use shared_crypto::CryptoError;
use shared_types::{Address, Bytes};
use thiserror::Error;

/// ABI decoding failures.
///
/// Decoding is strict: offsets, lengths and padding are all checked
/// against the input before any byte is read.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AbiError {
    /// Input ended before a word or byte run could be read.
    #[error("short buffer: need {needed} bytes, have {available}")]
    ShortBuffer {
        /// Bytes required from the start of the enclosing tuple.
        needed: usize,
        /// Bytes actually present.
        available: usize,
    },

    /// An offset or length word does not fit in memory.
    #[error("offset or length out of range")]
    OffsetOutOfRange,

    /// A value word carries bits outside its declared type.
    #[error("dirty high-order bits in {0} word")]
    DirtyBits(&'static str),

    /// A `bool` word is neither 0 nor 1.
    #[error("invalid bool word")]
    InvalidBool,

    /// A `string` value is not valid UTF-8.
    #[error("string is not valid UTF-8")]
    InvalidUtf8,

    /// Call data is shorter than a selector.
    #[error("call data shorter than a selector ({0} bytes)")]
    MissingSelector(usize),

    /// Decoded token does not have the shape the caller asked for.
    #[error("unexpected token: expected {0}")]
    UnexpectedToken(&'static str),
}

/// DNS wire-format name errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DnsError {
    /// A label between dots is empty.
    #[error("empty label in name {0:?}")]
    EmptyLabel(String),

    /// A label exceeds 63 bytes.
    #[error("label longer than 63 bytes: {0:?}")]
    LabelTooLong(String),

    /// Wire bytes do not terminate with the root label.
    #[error("truncated wire-format name")]
    Truncated,

    /// Wire bytes continue after the root label.
    #[error("trailing bytes after root label")]
    TrailingBytes,

    /// A decoded label is not valid UTF-8.
    #[error("label is not valid UTF-8")]
    InvalidUtf8,
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The gateway URL template is empty.
    #[error("gateway url must not be empty")]
    EmptyGatewayUrl,

    /// The resolver's own address is zero.
    #[error("resolver address must not be zero")]
    ZeroAddress,

    /// The owner address is zero.
    #[error("owner must not be zero")]
    ZeroOwner,

    /// The root name cannot be encoded.
    #[error("invalid root name: {0}")]
    InvalidRootName(#[from] DnsError),
}

/// Errors surfaced by the offchain resolver.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolverError {
    /// The recovered signer is not in the signer registry.
    #[error("invalid signer {signer}")]
    InvalidSigner {
        /// Address recovered from the response signature.
        signer: Address,
    },

    /// The response expired before it was presented.
    #[error("signature expired at {expires}, now {now}")]
    Expired {
        /// Expiry carried by the response.
        expires: u64,
        /// Ledger time at verification.
        now: u64,
    },

    /// The root delegate reverted; the payload is passed through untouched.
    #[error("root resolver reverted ({} bytes)", .0.len())]
    DelegateFailure(RevertPayload),

    /// An owner-only operation was invoked by someone else.
    #[error("caller {caller} is not the owner")]
    Unauthorized {
        /// The rejected caller.
        caller: Address,
    },

    /// Ownership cannot be handed to the zero address.
    #[error("new owner is the zero address")]
    ZeroOwner,

    /// The gateway response is not `(bytes, uint64, bytes)`.
    #[error("malformed gateway response: {0}")]
    MalformedResponse(AbiError),

    /// The callback's extra data is not `(bytes, bytes)`.
    #[error("malformed extra data: {0}")]
    MalformedExtraData(AbiError),

    /// Call data for a known selector does not decode.
    #[error("malformed call data: {0}")]
    MalformedCall(AbiError),

    /// The signature cannot be parsed or recovered.
    #[error("invalid signature: {0}")]
    InvalidSignature(CryptoError),

    /// No delegate is known at the requested address.
    #[error("unknown root resolver {0}")]
    UnknownDelegate(Address),
}

impl ResolverError {
    /// Short reason string carried by the `Error(string)` revert.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            Self::InvalidSigner { .. } => "SignatureVerifier: Invalid signature",
            Self::Expired { .. } => "SignatureVerifier: Signature expired",
            Self::DelegateFailure(_) => "OffchainResolver: Root resolver reverted",
            Self::Unauthorized { .. } => "Ownable: caller is not the owner",
            Self::ZeroOwner => "Ownable: new owner is the zero address",
            Self::MalformedResponse(_) => "SignatureVerifier: Malformed response",
            Self::MalformedExtraData(_) => "OffchainResolver: Malformed extra data",
            Self::MalformedCall(_) => "OffchainResolver: Malformed call data",
            Self::InvalidSignature(_) => "ECDSA: invalid signature",
            Self::UnknownDelegate(_) => "OffchainResolver: Unknown root resolver",
        }
    }

    /// Revert payload returned to the caller of the ABI surface.
    ///
    /// Delegate failures propagate their own payload verbatim; everything
    /// else is an `Error(string)` revert.
    #[must_use]
    pub fn revert_data(&self) -> Bytes {
        match self {
            Self::DelegateFailure(payload) => payload.as_bytes().to_vec(),
            other => error_string(other.reason()),
        }
    }
}

/// Encodes a Solidity `Error(string)` revert payload.
#[must_use]
pub fn error_string(reason: &str) -> Bytes {
    encode_with_selector(selectors::ERROR, &[Token::String(reason.to_string())])
}
