//! Event sinks.

use crate::domain::events::ResolverEvent;
use crate::ports::outbound::EventSink;
use parking_lot::RwLock;
use serde::Serialize;
use shared_types::Address;
use tracing::info;

/// An event together with its emitter and position in the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventRecord {
    /// Zero-based position in the log.
    pub sequence: u64,
    /// Resolver that emitted the event.
    pub emitter: Address,
    /// The event itself.
    pub event: ResolverEvent,
}

/// Append-only in-memory event log.
#[derive(Debug, Default)]
pub struct InMemoryEventLog {
    records: RwLock<Vec<EventRecord>>,
}

impl InMemoryEventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All records, oldest first.
    pub fn records(&self) -> Vec<EventRecord> {
        self.records.read().clone()
    }

    /// All events, oldest first.
    pub fn events(&self) -> Vec<ResolverEvent> {
        self.records.read().iter().map(|r| r.event.clone()).collect()
    }

    /// The most recent event.
    pub fn last(&self) -> Option<ResolverEvent> {
        self.records.read().last().map(|r| r.event.clone())
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// True if nothing has been emitted.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl EventSink for InMemoryEventLog {
    fn emit(&self, emitter: Address, event: ResolverEvent) {
        let mut records = self.records.write();
        let sequence = records.len() as u64;
        records.push(EventRecord {
            sequence,
            emitter,
            event,
        });
    }
}

/// Sink that only writes events to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&self, emitter: Address, event: ResolverEvent) {
        info!(
            %emitter,
            event = event.name(),
            payload = ?event,
            "[ccip-resolver] event emitted"
        );
    }
}
