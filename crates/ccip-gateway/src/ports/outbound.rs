//! Outbound ports for the gateway.

use crate::domain::error::GatewayError;
use async_trait::async_trait;
use shared_types::Bytes;

/// Source of answers for deferred lookups.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Result bytes for `(name, data)`, or `None` when there is no record.
    ///
    /// # Errors
    /// `GatewayError::Source` if the backing store is unavailable.
    async fn lookup(&self, name: &[u8], data: &[u8]) -> Result<Option<Bytes>, GatewayError>;
}
