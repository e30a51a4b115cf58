//! In-memory record source, optionally loaded from a JSON file.

use crate::domain::error::GatewayError;
use crate::domain::records::{RecordEntry, RecordKey};
use crate::ports::outbound::RecordSource;
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::Bytes;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Records held in a hash map.
#[derive(Debug, Default)]
pub struct InMemoryRecordSource {
    records: RwLock<HashMap<RecordKey, Bytes>>,
}

impl InMemoryRecordSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a source from entries.
    pub fn from_entries(entries: Vec<RecordEntry>) -> Result<Self, GatewayError> {
        let source = Self::new();
        for entry in entries {
            source.insert_entry(entry)?;
        }
        Ok(source)
    }

    /// Loads a JSON array of [`RecordEntry`] from `path`.
    pub fn from_json_file(path: &Path) -> Result<Self, GatewayError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| GatewayError::Config(format!("{}: {e}", path.display())))?;
        let entries: Vec<RecordEntry> = serde_json::from_str(&raw)
            .map_err(|e| GatewayError::Config(format!("{}: {e}", path.display())))?;
        let source = Self::from_entries(entries)?;
        info!(path = %path.display(), records = source.len(), "Loaded gateway records");
        Ok(source)
    }

    /// Adds or replaces one entry.
    pub fn insert_entry(&self, entry: RecordEntry) -> Result<(), GatewayError> {
        let (key, result) = entry
            .into_keyed()
            .map_err(|e| GatewayError::Config(e.to_string()))?;
        self.records.write().insert(key, result);
        Ok(())
    }

    /// Adds or replaces a record keyed by wire-format name.
    pub fn insert(&self, name: Bytes, data: Bytes, result: Bytes) {
        self.records.write().insert(RecordKey { name, data }, result);
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// True if there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

#[async_trait]
impl RecordSource for InMemoryRecordSource {
    async fn lookup(&self, name: &[u8], data: &[u8]) -> Result<Option<Bytes>, GatewayError> {
        let key = RecordKey {
            name: name.to_vec(),
            data: data.to_vec(),
        };
        Ok(self.records.read().get(&key).cloned())
    }
}
