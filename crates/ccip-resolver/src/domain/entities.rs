//! # Resolver Entities
//!
//! Value types shared by the resolver's domain, ports and call surface.

use super::registry::SignerRegistry;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Bytes};

/// Opaque revert payload raised by a delegate (or by the resolver itself).
///
/// Forwarded byte-for-byte; the resolver never inspects or re-wraps it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevertPayload(#[serde(with = "shared_types::hex_bytes")] Bytes);

impl RevertPayload {
    /// Wraps raw revert bytes.
    #[must_use]
    pub fn new(bytes: Bytes) -> Self {
        Self(bytes)
    }

    /// Raw revert bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length of the payload.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the payload is empty (a bare `revert()`).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the payload, returning its bytes.
    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        self.0
    }
}

impl From<Bytes> for RevertPayload {
    fn from(bytes: Bytes) -> Self {
        Self(bytes)
    }
}

/// Result of executing raw call data against the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    /// Successful return data.
    Return(Bytes),
    /// Revert data (an `OffchainLookup`, an `Error(string)` or a delegate payload).
    Revert(Bytes),
}

impl CallOutcome {
    /// True for [`CallOutcome::Return`].
    #[must_use]
    pub fn is_return(&self) -> bool {
        matches!(self, Self::Return(_))
    }

    /// The bytes carried by either arm.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        match self {
            Self::Return(data) | Self::Revert(data) => data,
        }
    }
}

/// A gateway response that passed both the signer and the expiry gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedResponse {
    /// Registered signer that produced the signature.
    pub signer: Address,
    /// Result bytes handed back to the caller.
    pub result: Bytes,
    /// Expiry carried by the response.
    pub expires: u64,
}

/// Mutable administrative state, guarded as one unit.
#[derive(Debug, Clone)]
pub struct ResolverState {
    /// Gateway URL template placed in every `OffchainLookup`.
    pub url: String,
    /// Authorised gateway signers.
    pub signers: SignerRegistry,
    /// Sole identity allowed to mutate this state.
    pub owner: Address,
}

/// Read-only view of the resolver for status endpoints and tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverSnapshot {
    /// The resolver's own address (the signature target).
    pub address: Address,
    /// Gateway URL template.
    pub url: String,
    /// Registered signers, sorted.
    pub signers: Vec<Address>,
    /// Address of the current root delegate.
    pub root_resolver: Address,
    /// Current owner.
    pub owner: Address,
}
