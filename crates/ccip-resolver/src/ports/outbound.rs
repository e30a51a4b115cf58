//! # Outbound Ports (Driven Ports / SPI)
//!
//! Dependencies the resolver needs from its host environment. All calls
//! are synchronous; resolver execution is single-threaded per call.

use crate::domain::entities::RevertPayload;
use crate::domain::events::ResolverEvent;
use shared_types::{Address, Bytes, InterfaceId};
use std::sync::Arc;

/// The resolver that answers for the root name and receives unknown calls.
pub trait RootDelegate: Send + Sync {
    /// Address of the delegate; reported by `rootResolver()`.
    fn address(&self) -> Address;

    /// Answers `resolve(name, data)` for the root name.
    ///
    /// # Errors
    /// The delegate's revert payload, which the resolver propagates as-is.
    fn resolve(&self, name: &[u8], data: &[u8]) -> Result<Bytes, RevertPayload>;

    /// Executes raw call data the resolver does not recognise.
    fn forward(&self, call_data: &[u8]) -> Result<Bytes, RevertPayload>;

    /// ERC-165 support as reported by the delegate.
    fn supports_interface(&self, interface_id: InterfaceId) -> bool;
}

/// Destination for administrative events.
pub trait EventSink: Send + Sync {
    /// Records an event emitted by the resolver at `emitter`.
    fn emit(&self, emitter: Address, event: ResolverEvent);
}

/// Source of ledger time, in Unix seconds.
pub trait TimeSource: Send + Sync {
    /// Current time.
    fn now(&self) -> u64;
}

/// Maps addresses to delegates for `setRootResolver(address)` calls
/// arriving through the ABI surface.
pub trait DelegateDirectory: Send + Sync {
    /// The delegate deployed at `address`, if any.
    fn lookup(&self, address: &Address) -> Option<Arc<dyn RootDelegate>>;
}
