//! # Driven Ports (Outbound)
//!
//! Interfaces the registries depend on. Adapters for the real platform
//! implement these; the crate ships in-memory doubles under `adapters`.
//!
//! All reads and writes issued through `LedgerStore` within one top-level
//! invocation form a single atomic unit from the platform's perspective;
//! the core performs no locking, retries, or backoff of its own.

use crate::domain::errors::RegistryError;

// =============================================================================
// LEDGER STORE
// =============================================================================

/// The underlying ledger key/value store.
///
/// Mutation takes `&self`; adapters supply interior mutability. Store
/// failures surface as `RegistryError::Store` and are fatal for the current
/// invocation; retries are the platform's responsibility.
pub trait LedgerStore: Send + Sync {
    /// Create or replace the value at `key`.
    fn put(&self, key: &str, value: &[u8]) -> Result<(), RegistryError>;

    /// Read the value at `key`, or `None` if the key is absent.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, RegistryError>;

    /// Delete the value at `key`. Deleting an absent key is not an error at
    /// this layer; the registries read before deleting.
    fn delete(&self, key: &str) -> Result<(), RegistryError>;

    /// All `(key, value)` pairs whose key starts with `prefix`, in ascending
    /// key order. The order must be stable within one invocation. Returns a
    /// fully materialized list so no store cursor outlives the call.
    fn scan_prefix(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, RegistryError>;
}

// =============================================================================
// CLIENT IDENTITY
// =============================================================================

/// Resolution of the invoking client's identity.
///
/// Derived from the client credential by the platform; the core never parses
/// certificates itself.
pub trait ClientIdentity: Send + Sync {
    /// The caller's organization identifier.
    fn organization_id(&self) -> Result<String, RegistryError>;

    /// The caller's stable per-identity device identifier.
    fn device_id(&self) -> Result<String, RegistryError>;
}

// =============================================================================
// EVENT SINK
// =============================================================================

/// Notification channel invoked after successful mutations only.
///
/// Best-effort and fire-and-forget from the core's point of view; delivery
/// guarantees are outside this crate's contract.
pub trait EventSink: Send + Sync {
    /// Record an event under a structured topic with a serialized payload.
    fn set_event(&self, topic: &str, payload: &[u8]) -> Result<(), RegistryError>;
}
