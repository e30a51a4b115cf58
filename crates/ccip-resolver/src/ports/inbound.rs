//! # Inbound Ports (Driving Ports / API)
//!
//! The resolver's public surface.

use crate::domain::entities::ResolverSnapshot;
use crate::domain::errors::ResolverError;
use crate::domain::lookup::Resolution;
use crate::ports::outbound::RootDelegate;
use shared_types::{Address, Bytes, InterfaceId};
use std::sync::Arc;

/// Offchain resolver API.
///
/// Owner-only mutators take the caller identity explicitly; authorisation is
/// checked before any state is read for mutation.
pub trait OffchainResolverApi: Send + Sync {
    /// Resolves `name` directly (root name) or defers it to the gateway.
    ///
    /// # Errors
    /// * `ResolverError::DelegateFailure` - the root delegate reverted
    fn resolve(&self, name: &[u8], data: &[u8]) -> Result<Resolution, ResolverError>;

    /// Verifies a gateway response and returns its result bytes.
    ///
    /// # Errors
    /// * `ResolverError::MalformedExtraData` - `extra_data` is not `(bytes, bytes)`
    /// * `ResolverError::MalformedResponse` - `response` is not `(bytes, uint64, bytes)`
    /// * `ResolverError::InvalidSignature` - signature unparseable or unrecoverable
    /// * `ResolverError::InvalidSigner` - recovered signer is not registered
    /// * `ResolverError::Expired` - response presented after its expiry
    fn resolve_with_proof(&self, response: &[u8], extra_data: &[u8]) -> Result<Bytes, ResolverError>;

    /// Forwards unrecognised call data to the root delegate.
    fn fallback(&self, call_data: &[u8]) -> Result<Bytes, ResolverError>;

    /// ERC-165 query.
    fn supports_interface(&self, interface_id: InterfaceId) -> bool;

    /// Replaces the gateway URL template.
    fn set_url(&self, caller: Address, url: String) -> Result<(), ResolverError>;

    /// Registers signers.
    fn add_signers(&self, caller: Address, signers: &[Address]) -> Result<(), ResolverError>;

    /// Deregisters a signer.
    fn remove_signer(&self, caller: Address, signer: Address) -> Result<(), ResolverError>;

    /// Replaces the root delegate.
    fn set_root_resolver(
        &self,
        caller: Address,
        delegate: Arc<dyn RootDelegate>,
    ) -> Result<(), ResolverError>;

    /// Hands ownership to `new_owner`.
    fn transfer_ownership(&self, caller: Address, new_owner: Address) -> Result<(), ResolverError>;

    /// Current gateway URL template.
    fn url(&self) -> String;

    /// Signer membership.
    fn is_signer(&self, signer: &Address) -> bool;

    /// Address of the current root delegate.
    fn root_resolver(&self) -> Address;

    /// Current owner.
    fn owner(&self) -> Address;

    /// Read-only view of all state.
    fn snapshot(&self) -> ResolverSnapshot;
}
