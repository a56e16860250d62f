//! In-memory adapters for the outbound ports, used by tests and demos. The
//! real platform supplies its own implementations.

pub mod event_recorder;
pub mod identity;
pub mod memory_ledger;

pub use event_recorder::RecordingEventSink;
pub use identity::{StaticIdentity, UnresolvedIdentity};
pub use memory_ledger::InMemoryLedger;
