//! # Signer Registry
//!
//! The set of gateway identities whose signatures the resolver accepts.
//! Membership is the only state; adding a present signer or removing an
//! absent one is a no-op.

use shared_types::Address;
use std::collections::HashSet;

/// Set of authorised gateway signers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignerRegistry {
    signers: HashSet<Address>,
}

impl SignerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a signer. Returns false if it was already present.
    pub fn add(&mut self, signer: Address) -> bool {
        self.signers.insert(signer)
    }

    /// Adds every signer in the list (duplicates allowed).
    pub fn add_many(&mut self, signers: &[Address]) {
        self.signers.extend(signers.iter().copied());
    }

    /// Removes a signer. Returns false if it was not present.
    pub fn remove(&mut self, signer: &Address) -> bool {
        self.signers.remove(signer)
    }

    /// Membership test.
    #[must_use]
    pub fn contains(&self, signer: &Address) -> bool {
        self.signers.contains(signer)
    }

    /// Number of registered signers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.signers.len()
    }

    /// True if no signer is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.signers.is_empty()
    }

    /// Registered signers in ascending order.
    #[must_use]
    pub fn sorted(&self) -> Vec<Address> {
        let mut out: Vec<Address> = self.signers.iter().copied().collect();
        out.sort();
        out
    }
}

impl FromIterator<Address> for SignerRegistry {
    fn from_iter<I: IntoIterator<Item = Address>>(iter: I) -> Self {
        Self {
            signers: iter.into_iter().collect(),
        }
    }
}
