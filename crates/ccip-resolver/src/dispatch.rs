//! # Call Dispatch
//!
//! Executes raw ABI call data against an [`OffchainResolverService`], the
//! way a contract would: known selectors are decoded and routed, everything
//! else (including data shorter than a selector) goes to the root
//! delegate's fallback.
//!
//! | Outcome | Revert payload |
//! |---------|----------------|
//! | Deferred lookup | `OffchainLookup(...)` |
//! | Resolver error | `Error(string)` |
//! | Delegate revert | delegate's bytes, untouched |

use crate::domain::abi::{decode, decode_bytes_pair, encode, split_selector, ParamType, Token};
use crate::domain::entities::CallOutcome;
use crate::domain::errors::{AbiError, ResolverError};
use crate::domain::lookup::{encode_bytes_return, selectors, Resolution};
use crate::ports::inbound::OffchainResolverApi;
use crate::service::OffchainResolverService;
use shared_types::{Address, Bytes, Selector};
use tracing::trace;

type Routed = Result<Bytes, Bytes>;

impl OffchainResolverService {
    /// Executes `call_data` on behalf of `sender`.
    pub fn dispatch(&self, sender: Address, call_data: &[u8]) -> CallOutcome {
        match self.route(sender, call_data) {
            Ok(data) => CallOutcome::Return(data),
            Err(data) => CallOutcome::Revert(data),
        }
    }

    fn route(&self, sender: Address, call_data: &[u8]) -> Routed {
        let Ok((selector, body)) = split_selector(call_data) else {
            return self.fallback(call_data).map_err(revert);
        };
        trace!(%selector, %sender, "[ccip-resolver] dispatch");

        match selector {
            selectors::RESOLVE => {
                let (name, data) = decode_bytes_pair(body).map_err(malformed)?;
                match self.resolve(&name, &data).map_err(revert)? {
                    Resolution::Resolved(result) => Ok(encode_bytes_return(&result)),
                    Resolution::Redirect(lookup) => Err(lookup.revert_data()),
                }
            }
            selectors::RESOLVE_WITH_PROOF => {
                let (response, extra_data) = decode_bytes_pair(body).map_err(malformed)?;
                self.resolve_with_proof(&response, &extra_data)
                    .map(|result| encode_bytes_return(&result))
                    .map_err(revert)
            }
            selectors::SUPPORTS_INTERFACE => {
                let raw = single(&ParamType::FixedBytes(4), body)?
                    .into_fixed_bytes()
                    .map_err(malformed)?;
                let interface_id = Selector::from_slice(&raw)
                    .map_err(|_| malformed(AbiError::UnexpectedToken("bytes4")))?;
                Ok(encode(&[Token::Bool(self.supports_interface(interface_id))]))
            }
            selectors::SET_URL => {
                let url = single(&ParamType::String, body)?
                    .into_string()
                    .map_err(malformed)?;
                self.set_url(sender, url).map(|()| Bytes::new()).map_err(revert)
            }
            selectors::ADD_SIGNERS => {
                let signers: Vec<Address> = single(&ParamType::Array(Box::new(ParamType::Address)), body)?
                    .into_array()
                    .and_then(|items| items.into_iter().map(Token::into_address).collect())
                    .map_err(malformed)?;
                self.add_signers(sender, &signers)
                    .map(|()| Bytes::new())
                    .map_err(revert)
            }
            selectors::REMOVE_SIGNER => {
                let signer = address_arg(body)?;
                self.remove_signer(sender, signer)
                    .map(|()| Bytes::new())
                    .map_err(revert)
            }
            selectors::SET_ROOT_RESOLVER => {
                let resolver = address_arg(body)?;
                // Owner check comes before the directory lookup.
                if sender != self.owner() {
                    return Err(revert(ResolverError::Unauthorized { caller: sender }));
                }
                let delegate = self
                    .lookup_delegate(&resolver)
                    .ok_or_else(|| revert(ResolverError::UnknownDelegate(resolver)))?;
                self.set_root_resolver(sender, delegate)
                    .map(|()| Bytes::new())
                    .map_err(revert)
            }
            selectors::TRANSFER_OWNERSHIP => {
                let new_owner = address_arg(body)?;
                self.transfer_ownership(sender, new_owner)
                    .map(|()| Bytes::new())
                    .map_err(revert)
            }
            selectors::URL => Ok(encode(&[Token::String(self.url())])),
            selectors::SIGNERS => {
                let signer = address_arg(body)?;
                Ok(encode(&[Token::Bool(self.is_signer(&signer))]))
            }
            selectors::ROOT_RESOLVER => Ok(encode(&[Token::Address(self.root_resolver())])),
            selectors::OWNER => Ok(encode(&[Token::Address(self.owner())])),
            _ => self.fallback(call_data).map_err(revert),
        }
    }
}

fn revert(error: ResolverError) -> Bytes {
    error.revert_data()
}

fn malformed(error: AbiError) -> Bytes {
    ResolverError::MalformedCall(error).revert_data()
}

fn single(ty: &ParamType, body: &[u8]) -> Result<Token, Bytes> {
    decode(std::slice::from_ref(ty), body)
        .map_err(malformed)?
        .into_iter()
        .next()
        .ok_or_else(|| malformed(AbiError::UnexpectedToken("argument")))
}

fn address_arg(body: &[u8]) -> Result<Address, Bytes> {
    single(&ParamType::Address, body)?
        .into_address()
        .map_err(malformed)
}
