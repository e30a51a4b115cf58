//! Gateway service: answers `resolve(name, data)` call data with a signed
//! `(result, expires, sig)` response.

use crate::domain::error::{GatewayError, GatewayResult};
use crate::ports::outbound::RecordSource;
use ccip_resolver::domain::abi::split_selector;
use ccip_resolver::{dns_decode, selectors, sign_response, DeferredRequest, TimeSource};
use shared_crypto::Secp256k1KeyPair;
use shared_types::{encode_hex, Address, Bytes};
use std::sync::Arc;
use tracing::{debug, info};

/// Signs answers for deferred lookups.
pub struct GatewayService {
    signer: Secp256k1KeyPair,
    records: Arc<dyn RecordSource>,
    clock: Arc<dyn TimeSource>,
    ttl_secs: u64,
}

impl GatewayService {
    /// Create a new gateway service
    pub fn new(
        signer: Secp256k1KeyPair,
        records: Arc<dyn RecordSource>,
        clock: Arc<dyn TimeSource>,
        ttl_secs: u64,
    ) -> Self {
        Self {
            signer,
            records,
            clock,
            ttl_secs,
        }
    }

    /// Address that must be registered with the resolver.
    pub fn signer_address(&self) -> Address {
        self.signer.address()
    }

    /// Response validity window.
    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    /// Answers call data sent by the resolver at `sender`.
    ///
    /// # Errors
    /// * `InvalidCallData` - not `resolve(bytes,bytes)` shaped
    /// * `UnsupportedCall` - a selector other than `resolve`
    /// * `RecordNotFound` - no record for the name and inner call
    /// * `Signing` - the signer failed
    pub async fn handle(&self, sender: Address, call_data: &[u8]) -> GatewayResult<Bytes> {
        let (selector, _) =
            split_selector(call_data).map_err(|e| GatewayError::InvalidCallData(e.to_string()))?;
        if selector != selectors::RESOLVE {
            return Err(GatewayError::UnsupportedCall(selector));
        }
        let request = DeferredRequest::from_call_data(sender, call_data)
            .map_err(|e| GatewayError::InvalidCallData(e.to_string()))?;

        let name = display_name(&request.name);
        let result = self
            .records
            .lookup(&request.name, &request.data)
            .await?
            .ok_or_else(|| GatewayError::RecordNotFound { name: name.clone() })?;

        let expires = self.clock.now().saturating_add(self.ttl_secs);
        let signed = sign_response(
            &self.signer,
            &sender,
            expires,
            &request.extra_data(),
            result,
        )?;

        info!(%sender, %name, expires, "Signed lookup response");
        debug!(result_len = signed.result.len(), "[ccip-gateway] response detail");
        Ok(signed.encode())
    }
}

fn display_name(wire: &[u8]) -> String {
    dns_decode(wire).unwrap_or_else(|_| encode_hex(wire))
}
