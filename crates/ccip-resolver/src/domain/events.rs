//! # Resolver Events
//!
//! Emitted once per successful administrative mutation, after the state
//! change is visible to readers.

use serde::{Deserialize, Serialize};
use shared_types::Address;

/// Administrative change notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ResolverEvent {
    /// The gateway URL template changed.
    UrlSet {
        /// New URL template.
        url: String,
    },
    /// Signers were added; carries the list exactly as supplied.
    SignersAdded {
        /// Supplied signers, duplicates and already-present entries included.
        signers: Vec<Address>,
    },
    /// A signer was removed.
    SignerRemoved {
        /// The removed signer.
        signer: Address,
    },
    /// The root delegate changed.
    RootResolverSet {
        /// Address of the new delegate.
        resolver: Address,
    },
    /// Ownership moved to a new identity.
    OwnershipTransferred {
        /// Owner before the transfer.
        previous_owner: Address,
        /// Owner after the transfer.
        new_owner: Address,
    },
}

impl ResolverEvent {
    /// Stable event name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::UrlSet { .. } => "UrlSet",
            Self::SignersAdded { .. } => "SignersAdded",
            Self::SignerRemoved { .. } => "SignerRemoved",
            Self::RootResolverSet { .. } => "RootResolverSet",
            Self::OwnershipTransferred { .. } => "OwnershipTransferred",
        }
    }
}
