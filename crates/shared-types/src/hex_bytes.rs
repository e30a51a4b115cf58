//! Serde helpers for `0x`-hex byte strings.
//!
//! Use with `#[serde(with = "shared_types::hex_bytes")]` on `Vec<u8>` fields.

use crate::entities::{decode_hex, encode_hex};
use serde::{Deserialize, Deserializer, Serializer};

/// Serialize bytes as a `0x`-prefixed hex string.
pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&encode_hex(bytes))
}

/// Deserialize a `0x`-prefixed (or bare) hex string into bytes.
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
    let s = String::deserialize(deserializer)?;
    decode_hex(&s).map_err(serde::de::Error::custom)
}
