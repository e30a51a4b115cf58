//! The ERC-3668 client loop.
//!
//! ```text
//! call(target, data) ──► Return ─────────────────────────────► done
//!        │
//!        └─► Revert(OffchainLookup) ─► sender == target?
//!                                        │
//!                     for url in urls:  fetch(url) ── 4xx ──► stop
//!                                        │   └──── 5xx/io ──► next url
//!                                        ▼
//!                     call(target, callback ‖ (response, extraData))
//! ```

use crate::domain::{ClientConfig, ClientError, ClientResult, TransportError};
use crate::ports::{CallTarget, GatewayTransport};
use ccip_resolver::domain::abi::{decode, encode_with_selector};
use ccip_resolver::{dns_encode, selectors, CallOutcome, OffchainLookup, ParamType, RevertPayload, Token};
use shared_types::{Address, Bytes};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Follows `OffchainLookup` redirects until the target returns.
pub struct CcipReadClient {
    transport: Arc<dyn GatewayTransport>,
    config: ClientConfig,
}

impl CcipReadClient {
    /// Create a client; the configuration is validated here.
    pub fn new(transport: Arc<dyn GatewayTransport>, config: ClientConfig) -> ClientResult<Self> {
        config.validate()?;
        Ok(Self { transport, config })
    }

    /// Call `target` with `call_data`, following redirects.
    ///
    /// Returns the raw return data of the final call.
    pub async fn call(
        &self,
        target: &dyn CallTarget,
        caller: Address,
        call_data: &[u8],
    ) -> ClientResult<Bytes> {
        let mut data = call_data.to_vec();
        let mut redirects = 0;

        loop {
            let payload = match target.call(caller, &data) {
                CallOutcome::Return(output) => return Ok(output),
                CallOutcome::Revert(payload) => payload,
            };

            let lookup = match OffchainLookup::decode(&payload) {
                Ok(Some(lookup)) => lookup,
                Ok(None) | Err(_) => return Err(ClientError::Reverted(RevertPayload::new(payload))),
            };

            if redirects == self.config.max_redirects {
                warn!(resolver = %target.address(), redirects, "[ccip-client] redirect limit reached");
                return Err(ClientError::TooManyRedirects(redirects));
            }
            redirects += 1;

            if lookup.sender != target.address() {
                return Err(ClientError::SenderMismatch {
                    expected: target.address(),
                    actual: lookup.sender,
                });
            }

            info!(
                resolver = %target.address(),
                urls = lookup.urls.len(),
                callback = %lookup.callback_function,
                "[ccip-client] following OffchainLookup"
            );
            let response = self.fetch(&lookup).await?;
            data = lookup.callback_call_data(&response);
        }
    }

    /// `resolve(dnsName, data)` on `target`, returning the decoded `bytes` result.
    pub async fn resolve(
        &self,
        target: &dyn CallTarget,
        caller: Address,
        name: &str,
        data: &[u8],
    ) -> ClientResult<Bytes> {
        let call_data = encode_with_selector(
            selectors::RESOLVE,
            &[Token::Bytes(dns_encode(name)?), Token::Bytes(data.to_vec())],
        );
        let output = self.call(target, caller, &call_data).await?;

        decode(&[ParamType::Bytes], &output)
            .ok()
            .and_then(|tokens| tokens.into_iter().next())
            .and_then(|token| token.into_bytes().ok())
            .ok_or_else(|| ClientError::MalformedReturn(format!("{} bytes", output.len())))
    }

    async fn fetch(&self, lookup: &OffchainLookup) -> ClientResult<Bytes> {
        let mut last_error: Option<TransportError> = None;

        for url in &lookup.urls {
            match self
                .transport
                .fetch(url, lookup.sender, &lookup.call_data)
                .await
            {
                Ok(response) => {
                    debug!(url = %url, len = response.len(), "[ccip-client] gateway response");
                    return Ok(response);
                }
                Err(e) if e.is_client_error() => {
                    warn!(url = %url, error = %e, "[ccip-client] gateway rejected request");
                    return Err(ClientError::Rejected {
                        url: url.clone(),
                        source: e,
                    });
                }
                Err(e) => {
                    warn!(url = %url, error = %e, "[ccip-client] gateway failed, trying next");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.map_or(ClientError::NoGateways, ClientError::GatewaysExhausted))
    }
}
