//! In-memory root delegate.
//!
//! Answers `resolve` from a record table keyed by `(name, data)` and
//! unknown calls from a table keyed by selector. Both can be forced to
//! revert with a fixed payload.

use crate::domain::abi::split_selector;
use crate::domain::entities::RevertPayload;
use crate::domain::errors::error_string;
use crate::ports::outbound::RootDelegate;
use parking_lot::RwLock;
use shared_types::{Address, Bytes, InterfaceId, Selector};
use std::collections::{HashMap, HashSet};

#[derive(Default)]
struct DelegateTables {
    records: HashMap<(Bytes, Bytes), Bytes>,
    calls: HashMap<Selector, Result<Bytes, RevertPayload>>,
    interfaces: HashSet<InterfaceId>,
    failure: Option<RevertPayload>,
    forwarded: Vec<Bytes>,
}

/// Root delegate backed by in-memory tables.
pub struct InMemoryRootDelegate {
    address: Address,
    tables: RwLock<DelegateTables>,
}

impl InMemoryRootDelegate {
    /// Creates an empty delegate at `address`.
    #[must_use]
    pub fn new(address: Address) -> Self {
        Self {
            address,
            tables: RwLock::new(DelegateTables::default()),
        }
    }

    /// Sets the answer for `resolve(name, data)`.
    pub fn set_record(&self, name: Bytes, data: Bytes, result: Bytes) {
        self.tables.write().records.insert((name, data), result);
    }

    /// Sets the outcome of a forwarded call by selector.
    pub fn set_call_response(&self, selector: Selector, outcome: Result<Bytes, RevertPayload>) {
        self.tables.write().calls.insert(selector, outcome);
    }

    /// Declares support for an interface.
    pub fn add_interface(&self, interface_id: InterfaceId) {
        self.tables.write().interfaces.insert(interface_id);
    }

    /// Makes every `resolve` revert with `payload` (or clears the failure).
    pub fn set_failure(&self, payload: Option<RevertPayload>) {
        self.tables.write().failure = payload;
    }

    /// Call data received through `forward`, oldest first.
    pub fn forwarded(&self) -> Vec<Bytes> {
        self.tables.read().forwarded.clone()
    }
}

impl RootDelegate for InMemoryRootDelegate {
    fn address(&self) -> Address {
        self.address
    }

    fn resolve(&self, name: &[u8], data: &[u8]) -> Result<Bytes, RevertPayload> {
        let tables = self.tables.read();
        if let Some(payload) = &tables.failure {
            return Err(payload.clone());
        }
        tables
            .records
            .get(&(name.to_vec(), data.to_vec()))
            .cloned()
            .ok_or_else(|| RevertPayload::new(error_string("record not found")))
    }

    fn forward(&self, call_data: &[u8]) -> Result<Bytes, RevertPayload> {
        let mut tables = self.tables.write();
        tables.forwarded.push(call_data.to_vec());
        // Calls without a selector hit the delegate's own fallback, which accepts them.
        let Ok((selector, _)) = split_selector(call_data) else {
            return Ok(Bytes::new());
        };
        tables
            .calls
            .get(&selector)
            .cloned()
            .unwrap_or_else(|| Err(RevertPayload::default()))
    }

    fn supports_interface(&self, interface_id: InterfaceId) -> bool {
        self.tables.read().interfaces.contains(&interface_id)
    }
}
