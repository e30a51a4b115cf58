//! # ABI Codec
//!
//! Contract ABI head/tail encoding for the handful of types the resolver
//! exchanges: `address`, `uintN`, `bool`, `bytesN`, `bytes`, `string` and
//! dynamic arrays of those.
//!
//! ## Layout
//!
//! ```text
//! tuple := head(t1) .. head(tn) tail(t1) .. tail(tn)
//! head  := value word            (static types)
//!        | offset from tuple start (dynamic types)
//! tail  := length word ‖ payload right-padded to 32 bytes
//! ```
//!
//! Decoding is strict. Offsets and lengths are bounds-checked before use,
//! and static words must not carry bits outside their declared width.

use super::errors::AbiError;
use shared_crypto::keccak256;
use shared_types::{Address, Bytes, Selector, U256};

/// Size of an ABI word.
pub const WORD: usize = 32;

/// A decoded (or to-be-encoded) ABI value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `address`
    Address(Address),
    /// `uintN` (N <= 256)
    Uint(U256),
    /// `bool`
    Bool(bool),
    /// `bytesN` (N <= 32)
    FixedBytes(Vec<u8>),
    /// `bytes`
    Bytes(Bytes),
    /// `string`
    String(String),
    /// `T[]`
    Array(Vec<Token>),
}

/// Type descriptor used to drive decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    /// `address`
    Address,
    /// `uintN` with the bit width
    Uint(usize),
    /// `bool`
    Bool,
    /// `bytesN` with the byte width
    FixedBytes(usize),
    /// `bytes`
    Bytes,
    /// `string`
    String,
    /// `T[]`
    Array(Box<ParamType>),
}

impl ParamType {
    /// Dynamic types are encoded by offset in the head.
    #[must_use]
    pub fn is_dynamic(&self) -> bool {
        matches!(self, Self::Bytes | Self::String | Self::Array(_))
    }
}

impl Token {
    fn is_dynamic(&self) -> bool {
        matches!(self, Self::Bytes(_) | Self::String(_) | Self::Array(_))
    }

    /// Unwraps a `bytes` token.
    pub fn into_bytes(self) -> Result<Bytes, AbiError> {
        match self {
            Self::Bytes(b) => Ok(b),
            _ => Err(AbiError::UnexpectedToken("bytes")),
        }
    }

    /// Unwraps a `string` token.
    pub fn into_string(self) -> Result<String, AbiError> {
        match self {
            Self::String(s) => Ok(s),
            _ => Err(AbiError::UnexpectedToken("string")),
        }
    }

    /// Unwraps an `address` token.
    pub fn into_address(self) -> Result<Address, AbiError> {
        match self {
            Self::Address(a) => Ok(a),
            _ => Err(AbiError::UnexpectedToken("address")),
        }
    }

    /// Unwraps a `uint` token.
    pub fn into_uint(self) -> Result<U256, AbiError> {
        match self {
            Self::Uint(v) => Ok(v),
            _ => Err(AbiError::UnexpectedToken("uint")),
        }
    }

    /// Unwraps a `bytesN` token.
    pub fn into_fixed_bytes(self) -> Result<Vec<u8>, AbiError> {
        match self {
            Self::FixedBytes(b) => Ok(b),
            _ => Err(AbiError::UnexpectedToken("bytesN")),
        }
    }

    /// Unwraps a `T[]` token.
    pub fn into_array(self) -> Result<Vec<Token>, AbiError> {
        match self {
            Self::Array(items) => Ok(items),
            _ => Err(AbiError::UnexpectedToken("array")),
        }
    }
}

// =============================================================================
// SELECTORS
// =============================================================================

/// First four bytes of the Keccak-256 of a canonical function signature.
#[must_use]
pub fn selector(signature: &str) -> Selector {
    let digest = keccak256(signature.as_bytes());
    let mut out = [0u8; 4];
    out.copy_from_slice(&digest.as_bytes()[..4]);
    Selector::new(out)
}

/// Splits call data into its selector and argument bytes.
pub fn split_selector(call_data: &[u8]) -> Result<(Selector, &[u8]), AbiError> {
    if call_data.len() < Selector::LEN {
        return Err(AbiError::MissingSelector(call_data.len()));
    }
    let (head, body) = call_data.split_at(Selector::LEN);
    let selector = Selector::from_slice(head).map_err(|_| AbiError::MissingSelector(head.len()))?;
    Ok((selector, body))
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes tokens as an ABI tuple.
#[must_use]
pub fn encode(tokens: &[Token]) -> Bytes {
    // Every supported static type occupies exactly one head word.
    let head_len = tokens.len() * WORD;
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();

    for token in tokens {
        if token.is_dynamic() {
            head.extend_from_slice(&usize_word(head_len + tail.len()));
            tail.extend_from_slice(&encode_dynamic(token));
        } else {
            head.extend_from_slice(&encode_static(token));
        }
    }

    head.extend_from_slice(&tail);
    head
}

/// Encodes tokens prefixed with a function selector.
#[must_use]
pub fn encode_with_selector(selector: Selector, tokens: &[Token]) -> Bytes {
    let mut out = selector.as_bytes().to_vec();
    out.extend_from_slice(&encode(tokens));
    out
}

fn encode_static(token: &Token) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    match token {
        Token::Address(address) => word = address.to_word(),
        Token::Uint(value) => value.to_big_endian(&mut word),
        Token::Bool(flag) => word[WORD - 1] = u8::from(*flag),
        Token::FixedBytes(bytes) => {
            let len = bytes.len().min(WORD);
            word[..len].copy_from_slice(&bytes[..len]);
        }
        Token::Bytes(_) | Token::String(_) | Token::Array(_) => {}
    }
    word
}

fn encode_dynamic(token: &Token) -> Bytes {
    match token {
        Token::Bytes(bytes) => encode_packed_run(bytes),
        Token::String(s) => encode_packed_run(s.as_bytes()),
        Token::Array(items) => {
            let mut out = usize_word(items.len()).to_vec();
            out.extend_from_slice(&encode(items));
            out
        }
        _ => encode_static(token).to_vec(),
    }
}

fn encode_packed_run(bytes: &[u8]) -> Bytes {
    let padded = padded_len(bytes.len());
    let mut out = Vec::with_capacity(WORD + padded);
    out.extend_from_slice(&usize_word(bytes.len()));
    out.extend_from_slice(bytes);
    out.resize(WORD + padded, 0);
    out
}

fn padded_len(len: usize) -> usize {
    len.div_ceil(WORD) * WORD
}

fn usize_word(value: usize) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    U256::from(value).to_big_endian(&mut word);
    word
}

// =============================================================================
// DECODING
// =============================================================================

/// Decodes an ABI tuple of the given types.
///
/// Trailing bytes after the last tail are ignored, as on-ledger decoders do.
pub fn decode(types: &[ParamType], data: &[u8]) -> Result<Vec<Token>, AbiError> {
    decode_tuple(types, data)
}

fn decode_tuple(types: &[ParamType], data: &[u8]) -> Result<Vec<Token>, AbiError> {
    let mut tokens = Vec::with_capacity(types.len());
    for (index, ty) in types.iter().enumerate() {
        let head = read_word(data, index * WORD)?;
        let token = if ty.is_dynamic() {
            let offset = word_to_usize(head)?;
            decode_dynamic(ty, data, offset)?
        } else {
            decode_static(ty, head)?
        };
        tokens.push(token);
    }
    Ok(tokens)
}

fn decode_static(ty: &ParamType, word: &[u8; WORD]) -> Result<Token, AbiError> {
    match ty {
        ParamType::Address => {
            if word[..12].iter().any(|b| *b != 0) {
                return Err(AbiError::DirtyBits("address"));
            }
            let mut raw = [0u8; 20];
            raw.copy_from_slice(&word[12..]);
            Ok(Token::Address(Address::new(raw)))
        }
        ParamType::Uint(bits) => {
            let value = U256::from_big_endian(word);
            if *bits < 256 && value.bits() > *bits {
                return Err(AbiError::DirtyBits("uint"));
            }
            Ok(Token::Uint(value))
        }
        ParamType::Bool => match U256::from_big_endian(word).low_u64() {
            0 if word.iter().all(|b| *b == 0) => Ok(Token::Bool(false)),
            1 if word[..WORD - 1].iter().all(|b| *b == 0) => Ok(Token::Bool(true)),
            _ => Err(AbiError::InvalidBool),
        },
        ParamType::FixedBytes(len) => {
            let len = (*len).min(WORD);
            if word[len..].iter().any(|b| *b != 0) {
                return Err(AbiError::DirtyBits("bytesN"));
            }
            Ok(Token::FixedBytes(word[..len].to_vec()))
        }
        ParamType::Bytes | ParamType::String | ParamType::Array(_) => {
            Err(AbiError::UnexpectedToken("static type"))
        }
    }
}

fn decode_dynamic(ty: &ParamType, data: &[u8], offset: usize) -> Result<Token, AbiError> {
    let len = word_to_usize(read_word(data, offset)?)?;
    let start = offset.checked_add(WORD).ok_or(AbiError::OffsetOutOfRange)?;

    match ty {
        ParamType::Bytes | ParamType::String => {
            let run = read_run(data, start, len)?;
            if matches!(ty, ParamType::String) {
                let s = String::from_utf8(run.to_vec()).map_err(|_| AbiError::InvalidUtf8)?;
                Ok(Token::String(s))
            } else {
                Ok(Token::Bytes(run.to_vec()))
            }
        }
        ParamType::Array(inner) => {
            let body = data.get(start..).ok_or(AbiError::ShortBuffer {
                needed: start,
                available: data.len(),
            })?;
            // Refuse lengths whose heads cannot possibly fit before allocating.
            let head_bytes = len.checked_mul(WORD).ok_or(AbiError::OffsetOutOfRange)?;
            if head_bytes > body.len() {
                return Err(AbiError::ShortBuffer {
                    needed: start + head_bytes,
                    available: data.len(),
                });
            }
            let types = vec![(**inner).clone(); len];
            decode_tuple(&types, body).map(Token::Array)
        }
        _ => Err(AbiError::UnexpectedToken("dynamic type")),
    }
}

fn read_word(data: &[u8], at: usize) -> Result<&[u8; WORD], AbiError> {
    let end = at.checked_add(WORD).ok_or(AbiError::OffsetOutOfRange)?;
    data.get(at..end)
        .and_then(|slice| slice.try_into().ok())
        .ok_or(AbiError::ShortBuffer {
            needed: end,
            available: data.len(),
        })
}

/// Reads a `bytes`/`string` payload. The right padding up to the next word
/// boundary must be present and zero.
fn read_run(data: &[u8], start: usize, len: usize) -> Result<&[u8], AbiError> {
    let end = start.checked_add(len).ok_or(AbiError::OffsetOutOfRange)?;
    let padded_end = start
        .checked_add(padded_len(len))
        .ok_or(AbiError::OffsetOutOfRange)?;
    let run = data.get(start..padded_end).ok_or(AbiError::ShortBuffer {
        needed: padded_end,
        available: data.len(),
    })?;
    let (payload, padding) = run.split_at(end - start);
    if padding.iter().any(|b| *b != 0) {
        return Err(AbiError::DirtyBits("padding"));
    }
    Ok(payload)
}

fn word_to_usize(word: &[u8; WORD]) -> Result<usize, AbiError> {
    let value = U256::from_big_endian(word);
    if value > U256::from(u32::MAX) {
        return Err(AbiError::OffsetOutOfRange);
    }
    usize::try_from(value.low_u64()).map_err(|_| AbiError::OffsetOutOfRange)
}

// =============================================================================
// HELPERS
// =============================================================================

/// Decodes `(bytes, bytes)`.
pub fn decode_bytes_pair(data: &[u8]) -> Result<(Bytes, Bytes), AbiError> {
    let mut tokens = decode(&[ParamType::Bytes, ParamType::Bytes], data)?.into_iter();
    let first = tokens.next().ok_or(AbiError::UnexpectedToken("bytes"))?.into_bytes()?;
    let second = tokens.next().ok_or(AbiError::UnexpectedToken("bytes"))?.into_bytes()?;
    Ok((first, second))
}

/// Encodes `(bytes, bytes)`.
#[must_use]
pub fn encode_bytes_pair(first: &[u8], second: &[u8]) -> Bytes {
    encode(&[Token::Bytes(first.to_vec()), Token::Bytes(second.to_vec())])
}
