//! # Core Entities
//!
//! Fixed-width byte primitives.
//!
//! ## Clusters
//!
//! - **Identity**: `Address` (20 bytes, the last 20 bytes of a Keccak-256 public-key digest)
//! - **Digests**: `Hash` (32 bytes)
//! - **Dispatch**: `Selector` (4 bytes, also used as an ERC-165 interface id)

use crate::errors::TypeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// Re-export U256 from primitive-types for ABI words
pub use primitive_types::U256;

/// Variable-length byte string (call data, results, revert payloads).
pub type Bytes = Vec<u8>;

/// Decode `0x`-prefixed or bare hex into bytes.
pub fn decode_hex(input: &str) -> Result<Vec<u8>, TypeError> {
    let trimmed = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input);
    hex::decode(trimmed).map_err(|e| TypeError::InvalidHex(e.to_string()))
}

/// Encode bytes as lowercase `0x`-prefixed hex.
pub fn encode_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

macro_rules! fixed_bytes {
    ($(#[$meta:meta])* $name:ident, $len:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
        pub struct $name(pub [u8; $len]);

        impl $name {
            /// Width in bytes.
            pub const LEN: usize = $len;

            /// All-zero value.
            pub const ZERO: Self = Self([0u8; $len]);

            /// Creates a value from a fixed-size array.
            #[must_use]
            pub const fn new(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            /// Creates a value from a slice of exactly `LEN` bytes.
            pub fn from_slice(slice: &[u8]) -> Result<Self, TypeError> {
                let bytes: [u8; $len] =
                    slice.try_into().map_err(|_| TypeError::InvalidLength {
                        expected: $len,
                        actual: slice.len(),
                    })?;
                Ok(Self(bytes))
            }

            /// Returns the underlying bytes.
            #[must_use]
            pub const fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            /// Returns true if every byte is zero.
            #[must_use]
            pub fn is_zero(&self) -> bool {
                self.0 == [0u8; $len]
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "0x{}", hex::encode(self.0))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "0x{}", hex::encode(self.0))
            }
        }

        impl FromStr for $name {
            type Err = TypeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_slice(&decode_hex(s)?)
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }

        impl From<$name> for [u8; $len] {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

fixed_bytes!(
    /// A 20-byte Ethereum-style address.
    ///
    /// Identifies signers, owners, delegates and the resolver instance itself.
    Address,
    20
);

fixed_bytes!(
    /// A 32-byte digest (Keccak-256).
    Hash,
    32
);

fixed_bytes!(
    /// A 4-byte function selector or ERC-165 interface id.
    Selector,
    4
);

impl Address {
    /// Left-pads the address into a 32-byte ABI word.
    #[must_use]
    pub fn to_word(&self) -> [u8; 32] {
        let mut word = [0u8; 32];
        word[12..].copy_from_slice(&self.0);
        word
    }
}

/// ERC-165 interface id.
pub type InterfaceId = Selector;
