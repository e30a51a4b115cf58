//! # Offchain Resolver Service
//!
//! Application service implementing [`OffchainResolverApi`].
//!
//! ## Flow
//!
//! ```text
//! resolve(name, data)
//!   ├─ name == root name ──→ RootDelegate::resolve ──→ Resolved(result)
//!   └─ otherwise ─────────→ Redirect(OffchainLookup { urls: [url], .. })
//!
//! resolve_with_proof(response, extra_data)
//!   └─ verifier::verify(address, extra_data, response, signers, now) ──→ result
//! ```
//!
//! Administrative state lives behind one `RwLock`: every mutator checks the
//! owner and applies its change under a single write guard, then emits
//! exactly one event once the guard is released.

use crate::config::ResolverConfig;
use crate::domain::entities::{ResolverSnapshot, ResolverState};
use crate::domain::errors::{ConfigError, ResolverError};
use crate::domain::events::ResolverEvent;
use crate::domain::lookup::{selectors, DeferredRequest, OffchainLookup, Resolution};
use crate::domain::registry::SignerRegistry;
use crate::domain::verifier;
use crate::ports::inbound::OffchainResolverApi;
use crate::ports::outbound::{DelegateDirectory, EventSink, RootDelegate, TimeSource};
use parking_lot::RwLock;
use shared_types::{Address, Bytes, InterfaceId};
use std::sync::Arc;
use tracing::{debug, info, warn};

struct Inner {
    state: ResolverState,
    root: Arc<dyn RootDelegate>,
}

/// Offchain resolver.
pub struct OffchainResolverService {
    address: Address,
    root_name: Bytes,
    inner: RwLock<Inner>,
    events: Arc<dyn EventSink>,
    clock: Arc<dyn TimeSource>,
    directory: Option<Arc<dyn DelegateDirectory>>,
}

impl OffchainResolverService {
    /// Creates a resolver from validated configuration.
    ///
    /// Emits `SignersAdded` for the initial signer list if it is non-empty.
    pub fn new(
        config: ResolverConfig,
        root: Arc<dyn RootDelegate>,
        events: Arc<dyn EventSink>,
        clock: Arc<dyn TimeSource>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let root_name = config.root_name_wire()?;

        let mut signers = SignerRegistry::new();
        signers.add_many(&config.signers);

        let service = Self {
            address: config.address,
            root_name,
            inner: RwLock::new(Inner {
                state: ResolverState {
                    url: config.gateway_url,
                    signers,
                    owner: config.owner,
                },
                root,
            }),
            events,
            clock,
            directory: None,
        };

        if !config.signers.is_empty() {
            service.emit(ResolverEvent::SignersAdded {
                signers: config.signers,
            });
        }

        info!(
            address = %service.address,
            owner = %config.owner,
            "[ccip-resolver] resolver initialised"
        );
        Ok(service)
    }

    /// Attaches a directory used to look up delegates by address when
    /// `setRootResolver(address)` arrives as raw call data.
    #[must_use]
    pub fn with_directory(mut self, directory: Arc<dyn DelegateDirectory>) -> Self {
        self.directory = Some(directory);
        self
    }

    /// The resolver's own address (the signature target).
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    /// Root name in DNS wire format.
    #[must_use]
    pub fn root_name(&self) -> &[u8] {
        &self.root_name
    }

    pub(crate) fn lookup_delegate(&self, address: &Address) -> Option<Arc<dyn RootDelegate>> {
        self.directory.as_ref().and_then(|d| d.lookup(address))
    }

    fn emit(&self, event: ResolverEvent) {
        debug!(event = event.name(), "[ccip-resolver] emitting event");
        self.events.emit(self.address, event);
    }

    fn ensure_owner(&self, state: &ResolverState, caller: Address) -> Result<(), ResolverError> {
        if caller != state.owner {
            warn!(%caller, owner = %state.owner, "[ccip-resolver] rejected owner-only call");
            return Err(ResolverError::Unauthorized { caller });
        }
        Ok(())
    }

    fn root(&self) -> Arc<dyn RootDelegate> {
        Arc::clone(&self.inner.read().root)
    }
}

impl OffchainResolverApi for OffchainResolverService {
    fn resolve(&self, name: &[u8], data: &[u8]) -> Result<Resolution, ResolverError> {
        if name == self.root_name.as_slice() {
            debug!("[ccip-resolver] root name, answering via delegate");
            return self
                .root()
                .resolve(name, data)
                .map(Resolution::Resolved)
                .map_err(ResolverError::DelegateFailure);
        }

        let url = self.inner.read().state.url.clone();
        let request = DeferredRequest::new(self.address, name.to_vec(), data.to_vec());
        debug!(
            name_len = name.len(),
            data_len = data.len(),
            %url,
            "[ccip-resolver] deferring lookup"
        );
        Ok(Resolution::Redirect(OffchainLookup::for_request(&request, url)))
    }

    fn resolve_with_proof(&self, response: &[u8], extra_data: &[u8]) -> Result<Bytes, ResolverError> {
        DeferredRequest::from_extra_data(self.address, extra_data)
            .map_err(ResolverError::MalformedExtraData)?;

        let now = self.clock.now();
        let verified = {
            let inner = self.inner.read();
            verifier::verify(&self.address, extra_data, response, &inner.state.signers, now)
        };

        match verified {
            Ok(verified) => {
                debug!(
                    signer = %verified.signer,
                    expires = verified.expires,
                    result_len = verified.result.len(),
                    "[ccip-resolver] gateway response accepted"
                );
                Ok(verified.result)
            }
            Err(e) => {
                warn!(error = %e, "[ccip-resolver] rejected gateway response");
                Err(e)
            }
        }
    }

    fn fallback(&self, call_data: &[u8]) -> Result<Bytes, ResolverError> {
        self.root()
            .forward(call_data)
            .map_err(ResolverError::DelegateFailure)
    }

    fn supports_interface(&self, interface_id: InterfaceId) -> bool {
        interface_id == selectors::ERC165_INTERFACE
            || interface_id == selectors::EXTENDED_RESOLVER_INTERFACE
            || self.root().supports_interface(interface_id)
    }

    fn set_url(&self, caller: Address, url: String) -> Result<(), ResolverError> {
        {
            let mut inner = self.inner.write();
            self.ensure_owner(&inner.state, caller)?;
            inner.state.url = url.clone();
        }
        info!(%url, "[ccip-resolver] gateway url updated");
        self.emit(ResolverEvent::UrlSet { url });
        Ok(())
    }

    fn add_signers(&self, caller: Address, signers: &[Address]) -> Result<(), ResolverError> {
        {
            let mut inner = self.inner.write();
            self.ensure_owner(&inner.state, caller)?;
            inner.state.signers.add_many(signers);
        }
        info!(count = signers.len(), "[ccip-resolver] signers added");
        self.emit(ResolverEvent::SignersAdded {
            signers: signers.to_vec(),
        });
        Ok(())
    }

    fn remove_signer(&self, caller: Address, signer: Address) -> Result<(), ResolverError> {
        let removed = {
            let mut inner = self.inner.write();
            self.ensure_owner(&inner.state, caller)?;
            inner.state.signers.remove(&signer)
        };
        if removed {
            info!(%signer, "[ccip-resolver] signer removed");
            self.emit(ResolverEvent::SignerRemoved { signer });
        } else {
            debug!(%signer, "[ccip-resolver] signer not registered, nothing removed");
        }
        Ok(())
    }

    fn set_root_resolver(
        &self,
        caller: Address,
        delegate: Arc<dyn RootDelegate>,
    ) -> Result<(), ResolverError> {
        let resolver = delegate.address();
        {
            let mut inner = self.inner.write();
            self.ensure_owner(&inner.state, caller)?;
            inner.root = delegate;
        }
        info!(%resolver, "[ccip-resolver] root resolver replaced");
        self.emit(ResolverEvent::RootResolverSet { resolver });
        Ok(())
    }

    fn transfer_ownership(&self, caller: Address, new_owner: Address) -> Result<(), ResolverError> {
        let previous_owner = {
            let mut inner = self.inner.write();
            self.ensure_owner(&inner.state, caller)?;
            if new_owner.is_zero() {
                return Err(ResolverError::ZeroOwner);
            }
            std::mem::replace(&mut inner.state.owner, new_owner)
        };
        info!(%previous_owner, %new_owner, "[ccip-resolver] ownership transferred");
        self.emit(ResolverEvent::OwnershipTransferred {
            previous_owner,
            new_owner,
        });
        Ok(())
    }

    fn url(&self) -> String {
        self.inner.read().state.url.clone()
    }

    fn is_signer(&self, signer: &Address) -> bool {
        self.inner.read().state.signers.contains(signer)
    }

    fn root_resolver(&self) -> Address {
        self.inner.read().root.address()
    }

    fn owner(&self) -> Address {
        self.inner.read().state.owner
    }

    fn snapshot(&self) -> ResolverSnapshot {
        let inner = self.inner.read();
        ResolverSnapshot {
            address: self.address,
            url: inner.state.url.clone(),
            signers: inner.state.signers.sorted(),
            root_resolver: inner.root.address(),
            owner: inner.state.owner,
        }
    }
}
