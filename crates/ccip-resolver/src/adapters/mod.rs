//! # Adapters
//!
//! In-memory implementations of the outbound ports, used by the gateway's
//! demo wiring, the client's local call target and tests.

pub mod clock;
pub mod delegate;
pub mod directory;
pub mod events;

pub use clock::{ManualClock, SystemClock};
pub use delegate::InMemoryRootDelegate;
pub use directory::InMemoryDelegateDirectory;
pub use events::{EventRecord, InMemoryEventLog, TracingEventSink};
