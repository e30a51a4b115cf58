//! Ports for the client.
//!
//! [`CallTarget`] is the contract being called; [`GatewayTransport`] carries
//! a deferred lookup to one gateway URL.

use crate::domain::TransportError;
use async_trait::async_trait;
use ccip_resolver::{CallOutcome, OffchainResolverService};
use shared_types::{Address, Bytes};

/// A callable contract.
pub trait CallTarget: Send + Sync {
    /// Address the contract is deployed at
    fn address(&self) -> Address;

    /// Execute `call_data` as `caller`.
    fn call(&self, caller: Address, call_data: &[u8]) -> CallOutcome;
}

impl CallTarget for OffchainResolverService {
    fn address(&self) -> Address {
        OffchainResolverService::address(self)
    }

    fn call(&self, caller: Address, call_data: &[u8]) -> CallOutcome {
        self.dispatch(caller, call_data)
    }
}

/// Fetches a gateway answer.
#[async_trait]
pub trait GatewayTransport: Send + Sync {
    /// Query the gateway at `url` (an ERC-3668 URL template) on behalf of
    /// `sender` and return the `data` field of its answer.
    async fn fetch(
        &self,
        url: &str,
        sender: Address,
        call_data: &[u8],
    ) -> Result<Bytes, TransportError>;
}
