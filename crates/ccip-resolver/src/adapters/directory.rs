//! Address-to-delegate directory.

use crate::ports::outbound::{DelegateDirectory, RootDelegate};
use parking_lot::RwLock;
use shared_types::Address;
use std::collections::HashMap;
use std::sync::Arc;

/// Delegates registered by address.
#[derive(Default)]
pub struct InMemoryDelegateDirectory {
    delegates: RwLock<HashMap<Address, Arc<dyn RootDelegate>>>,
}

impl InMemoryDelegateDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a delegate under its own address.
    pub fn register(&self, delegate: Arc<dyn RootDelegate>) {
        self.delegates.write().insert(delegate.address(), delegate);
    }
}

impl DelegateDirectory for InMemoryDelegateDirectory {
    fn lookup(&self, address: &Address) -> Option<Arc<dyn RootDelegate>> {
        self.delegates.read().get(address).cloned()
    }
}
