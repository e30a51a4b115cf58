//! # Deferred Lookups
//!
//! Everything the resolver hands a caller when it refuses to answer
//! directly: the deferred request, its two encodings, and the
//! `OffchainLookup` redirect that carries them.
//!
//! ```text
//! callData  = resolve.selector ‖ abi.encode(name, data)
//! extraData =                    abi.encode(name, data)
//! callback  = resolveWithProof(response, extraData)
//! ```

use super::abi::{
    decode, decode_bytes_pair, encode, encode_bytes_pair, encode_with_selector, split_selector,
    ParamType, Token,
};
use super::errors::AbiError;
use shared_types::{Address, Bytes, Selector};

/// Function selectors and interface ids recognised by the resolver.
pub mod selectors {
    use shared_types::Selector;

    /// `resolve(bytes,bytes)`; also the extended-resolver interface id.
    pub const RESOLVE: Selector = Selector::new([0x90, 0x61, 0xb9, 0x23]);
    /// `resolveWithProof(bytes,bytes)`
    pub const RESOLVE_WITH_PROOF: Selector = Selector::new([0xf4, 0xd4, 0xd2, 0xf8]);
    /// `supportsInterface(bytes4)`; also the ERC-165 interface id.
    pub const SUPPORTS_INTERFACE: Selector = Selector::new([0x01, 0xff, 0xc9, 0xa7]);
    /// `OffchainLookup(address,string[],bytes,bytes4,bytes)` error selector.
    pub const OFFCHAIN_LOOKUP: Selector = Selector::new([0x55, 0x6f, 0x18, 0x30]);
    /// `Error(string)` revert selector.
    pub const ERROR: Selector = Selector::new([0x08, 0xc3, 0x79, 0xa0]);
    /// `setUrl(string)`
    pub const SET_URL: Selector = Selector::new([0x25, 0x24, 0x98, 0xa2]);
    /// `addSigners(address[])`
    pub const ADD_SIGNERS: Selector = Selector::new([0xe8, 0x90, 0x6a, 0x2d]);
    /// `removeSigner(address)`
    pub const REMOVE_SIGNER: Selector = Selector::new([0x0e, 0x31, 0x6a, 0xb7]);
    /// `setRootResolver(address)`
    pub const SET_ROOT_RESOLVER: Selector = Selector::new([0xb3, 0x5a, 0xa7, 0xa1]);
    /// `url()`
    pub const URL: Selector = Selector::new([0x56, 0x00, 0xf0, 0x4f]);
    /// `signers(address)`
    pub const SIGNERS: Selector = Selector::new([0x73, 0x6c, 0x0d, 0x5b]);
    /// `rootResolver()`
    pub const ROOT_RESOLVER: Selector = Selector::new([0xcb, 0xe7, 0xf1, 0x2a]);
    /// `owner()`
    pub const OWNER: Selector = Selector::new([0x8d, 0xa5, 0xcb, 0x5b]);
    /// `transferOwnership(address)`
    pub const TRANSFER_OWNERSHIP: Selector = Selector::new([0xf2, 0xfd, 0xe3, 0x8b]);

    /// ERC-165 interface id.
    pub const ERC165_INTERFACE: Selector = SUPPORTS_INTERFACE;
    /// Extended-resolver (`resolve(bytes,bytes)`) interface id.
    pub const EXTENDED_RESOLVER_INTERFACE: Selector = RESOLVE;
}

/// A query the resolver declined to answer itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeferredRequest {
    /// Resolver the request was issued by; the signature target.
    pub target: Address,
    /// DNS wire-format name.
    pub name: Bytes,
    /// Inner resolver call (e.g. `addr(bytes32)`).
    pub data: Bytes,
}

impl DeferredRequest {
    /// Creates a request.
    #[must_use]
    pub fn new(target: Address, name: Bytes, data: Bytes) -> Self {
        Self { target, name, data }
    }

    /// Call data the gateway is asked to answer.
    #[must_use]
    pub fn call_data(&self) -> Bytes {
        encode_with_selector(
            selectors::RESOLVE,
            &[Token::Bytes(self.name.clone()), Token::Bytes(self.data.clone())],
        )
    }

    /// Extra data threaded back through the callback; the signed request bytes.
    #[must_use]
    pub fn extra_data(&self) -> Bytes {
        encode_bytes_pair(&self.name, &self.data)
    }

    /// Parses the callback's extra data.
    pub fn from_extra_data(target: Address, extra_data: &[u8]) -> Result<Self, AbiError> {
        let (name, data) = decode_bytes_pair(extra_data)?;
        Ok(Self::new(target, name, data))
    }

    /// Parses gateway call data, requiring the `resolve` selector.
    pub fn from_call_data(target: Address, call_data: &[u8]) -> Result<Self, AbiError> {
        let (selector, body) = split_selector(call_data)?;
        if selector != selectors::RESOLVE {
            return Err(AbiError::UnexpectedToken("resolve selector"));
        }
        Self::from_extra_data(target, body)
    }
}

/// The ERC-3668 redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffchainLookup {
    /// Contract that raised the redirect; callers must check it is the target.
    pub sender: Address,
    /// Gateway URL templates, tried in order.
    pub urls: Vec<String>,
    /// Data the gateway is asked to answer.
    pub call_data: Bytes,
    /// Selector to invoke with the gateway response.
    pub callback_function: Selector,
    /// Opaque data threaded back to the callback.
    pub extra_data: Bytes,
}

impl OffchainLookup {
    /// Builds the redirect for a deferred request.
    #[must_use]
    pub fn for_request(request: &DeferredRequest, url: String) -> Self {
        Self {
            sender: request.target,
            urls: vec![url],
            call_data: request.call_data(),
            callback_function: selectors::RESOLVE_WITH_PROOF,
            extra_data: request.extra_data(),
        }
    }

    fn param_types() -> [ParamType; 5] {
        [
            ParamType::Address,
            ParamType::Array(Box::new(ParamType::String)),
            ParamType::Bytes,
            ParamType::FixedBytes(4),
            ParamType::Bytes,
        ]
    }

    /// Encodes the revert payload (`OffchainLookup` error selector plus arguments).
    #[must_use]
    pub fn revert_data(&self) -> Bytes {
        encode_with_selector(
            selectors::OFFCHAIN_LOOKUP,
            &[
                Token::Address(self.sender),
                Token::Array(self.urls.iter().cloned().map(Token::String).collect()),
                Token::Bytes(self.call_data.clone()),
                Token::FixedBytes(self.callback_function.as_bytes().to_vec()),
                Token::Bytes(self.extra_data.clone()),
            ],
        )
    }

    /// Parses revert data. Returns `Ok(None)` if the selector is not `OffchainLookup`.
    pub fn decode(revert_data: &[u8]) -> Result<Option<Self>, AbiError> {
        let (selector, body) = split_selector(revert_data)?;
        if selector != selectors::OFFCHAIN_LOOKUP {
            return Ok(None);
        }
        let mut tokens = decode(&Self::param_types(), body)?.into_iter();
        let mut next = || tokens.next().ok_or(AbiError::UnexpectedToken("OffchainLookup field"));

        let sender = next()?.into_address()?;
        let urls = next()?
            .into_array()?
            .into_iter()
            .map(Token::into_string)
            .collect::<Result<Vec<_>, _>>()?;
        let call_data = next()?.into_bytes()?;
        let callback = next()?.into_fixed_bytes()?;
        let callback_function =
            Selector::from_slice(&callback).map_err(|_| AbiError::UnexpectedToken("bytes4"))?;
        let extra_data = next()?.into_bytes()?;

        Ok(Some(Self {
            sender,
            urls,
            call_data,
            callback_function,
            extra_data,
        }))
    }

    /// Call data for the callback: `callback(response, extraData)`.
    #[must_use]
    pub fn callback_call_data(&self, response: &[u8]) -> Bytes {
        encode_with_selector(
            self.callback_function,
            &[Token::Bytes(response.to_vec()), Token::Bytes(self.extra_data.clone())],
        )
    }
}

/// Outcome of a `resolve` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Answered directly by the root delegate.
    Resolved(Bytes),
    /// Deferred to a gateway.
    Redirect(OffchainLookup),
}

/// Encodes a single `bytes` return value.
#[must_use]
pub fn encode_bytes_return(result: &[u8]) -> Bytes {
    encode(&[Token::Bytes(result.to_vec())])
}
