//! Record entries served by the gateway.

use ccip_resolver::{dns_encode, DnsError};
use serde::{Deserialize, Serialize};
use shared_types::Bytes;

/// One answer as written in a record file.
///
/// ```json
/// { "name": "test.eth", "data": "0x3b3b57de…", "result": "0x…" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordEntry {
    /// Dotted name
    pub name: String,
    /// Inner resolver call data the entry answers
    #[serde(with = "shared_types::hex_bytes")]
    pub data: Bytes,
    /// Result bytes returned for the call
    #[serde(with = "shared_types::hex_bytes")]
    pub result: Bytes,
}

/// Lookup key: DNS wire-format name and inner call data.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordKey {
    /// DNS wire-format name
    pub name: Bytes,
    /// Inner call data
    pub data: Bytes,
}

impl RecordEntry {
    /// Splits the entry into its lookup key and result.
    pub fn into_keyed(self) -> Result<(RecordKey, Bytes), DnsError> {
        let name = dns_encode(&self.name)?;
        Ok((
            RecordKey {
                name,
                data: self.data,
            },
            self.result,
        ))
    }
}
