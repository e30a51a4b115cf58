//! # Shared Test Fixtures
//!
//! A [`Deployment`] wires one resolver to one gateway whose signer is
//! registered, sharing a manual clock. [`InProcessTransport`] hands deferred
//! lookups straight to a [`GatewayService`] without HTTP.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use ccip_client::{CcipReadClient, ClientConfig, GatewayTransport, TransportError};
use ccip_gateway::{GatewayService, InMemoryRecordSource};
use ccip_resolver::adapters::{InMemoryEventLog, InMemoryRootDelegate, ManualClock};
use ccip_resolver::{dns_encode, OffchainResolverService, ResolverConfig};
use shared_crypto::Secp256k1KeyPair;
use shared_types::{Address, Bytes};

/// Resolver address used throughout the suite.
pub const RESOLVER: Address = Address::new([0xaa; 20]);
/// Resolver owner.
pub const OWNER: Address = Address::new([0x01; 20]);
/// Root delegate address.
pub const ROOT_DELEGATE: Address = Address::new([0xd0; 20]);
/// Configured gateway URL template.
pub const GATEWAY_URL: &str = "https://gateway.test/{sender}/{data}.json";
/// Starting clock value.
pub const NOW: u64 = 1_700_000_000;
/// Gateway response validity.
pub const TTL: u64 = 300;

/// `addr(bytes32)` call data for a fixed node.
pub fn addr_call() -> Bytes {
    let mut data = vec![0x3b, 0x3b, 0x57, 0xde];
    data.extend_from_slice(&[0x11; 32]);
    data
}

/// Routes lookups to an in-process gateway and records the URLs asked for.
pub struct InProcessTransport {
    gateway: Arc<GatewayService>,
    calls: Mutex<Vec<String>>,
}

impl InProcessTransport {
    /// Create a transport in front of `gateway`.
    pub fn new(gateway: Arc<GatewayService>) -> Self {
        Self {
            gateway,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// URLs fetched so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl GatewayTransport for InProcessTransport {
    async fn fetch(
        &self,
        url: &str,
        sender: Address,
        call_data: &[u8],
    ) -> Result<Bytes, TransportError> {
        self.calls.lock().push(url.to_string());
        self.gateway
            .handle(sender, call_data)
            .await
            .map_err(|e| TransportError::Status {
                status: e.status().as_u16(),
                message: e.to_string(),
            })
    }
}

/// A resolver with a registered gateway.
pub struct Deployment {
    /// The resolver under test
    pub resolver: Arc<OffchainResolverService>,
    /// Its root delegate
    pub root: Arc<InMemoryRootDelegate>,
    /// Event log of the resolver
    pub events: Arc<InMemoryEventLog>,
    /// Clock shared by resolver and gateway
    pub clock: Arc<ManualClock>,
    /// Gateway records
    pub records: Arc<InMemoryRecordSource>,
    /// Gateway holding the registered key
    pub gateway: Arc<GatewayService>,
}

impl Deployment {
    /// Deploy with a freshly generated gateway key registered as signer.
    pub fn new() -> Self {
        Self::with_key(Secp256k1KeyPair::generate())
    }

    /// Deploy with `key` registered as signer.
    pub fn with_key(key: Secp256k1KeyPair) -> Self {
        let root = Arc::new(InMemoryRootDelegate::new(ROOT_DELEGATE));
        let events = Arc::new(InMemoryEventLog::new());
        let clock = Arc::new(ManualClock::new(NOW));
        let records = Arc::new(InMemoryRecordSource::new());

        let config = ResolverConfig {
            address: RESOLVER,
            gateway_url: GATEWAY_URL.into(),
            root_name: String::new(),
            owner: OWNER,
            signers: vec![key.address()],
        };
        let resolver = Arc::new(
            OffchainResolverService::new(config, root.clone(), events.clone(), clock.clone())
                .expect("valid resolver config"),
        );
        let gateway = Arc::new(GatewayService::new(key, records.clone(), clock.clone(), TTL));

        Self {
            resolver,
            root,
            events,
            clock,
            records,
            gateway,
        }
    }

    /// A second gateway over the same records, signing with `key` and reading `clock`.
    pub fn rogue_gateway(&self, key: Secp256k1KeyPair, clock: Arc<ManualClock>) -> Arc<GatewayService> {
        Arc::new(GatewayService::new(key, self.records.clone(), clock, TTL))
    }

    /// Store a gateway answer for `(name, data)`.
    pub fn add_record(&self, name: &str, data: Bytes, result: Bytes) {
        self.records
            .insert(dns_encode(name).expect("valid name"), data, result);
    }

    /// Client talking to this deployment's gateway.
    pub fn client(&self) -> (CcipReadClient, Arc<InProcessTransport>) {
        Self::client_for(self.gateway.clone())
    }

    /// Client talking to `gateway`.
    pub fn client_for(gateway: Arc<GatewayService>) -> (CcipReadClient, Arc<InProcessTransport>) {
        let transport = Arc::new(InProcessTransport::new(gateway));
        let client = CcipReadClient::new(transport.clone(), ClientConfig::default())
            .expect("default client config is valid");
        (client, transport)
    }
}

impl Default for Deployment {
    fn default() -> Self {
        Self::new()
    }
}
