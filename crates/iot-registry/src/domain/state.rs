//! # Ledger State Capability
//!
//! The seam between concrete entities and the generic keyed-state registry.
//! The registry never sees concrete types; it persists anything that can
//! name its key components, serialize itself, and validate itself.

use crate::domain::errors::RegistryError;

/// Capability implemented by every entity stored on the ledger.
pub trait LedgerState {
    /// Ordered components that compose the entity's ledger key, coarsest
    /// first (e.g. organization before device before service name).
    fn key_components(&self) -> Vec<String>;

    /// Wire representation of the entity (UTF-8 JSON).
    fn serialize(&self) -> Result<Vec<u8>, RegistryError>;

    /// Check the entity's own invariants. Runs before every write.
    fn validate(&self) -> Result<(), RegistryError>;
}

/// Serialize any serde entity to the JSON wire form shared by all registries.
pub(crate) fn to_wire<T: serde::Serialize>(state: &T) -> Result<Vec<u8>, RegistryError> {
    serde_json::to_vec(state).map_err(|e| RegistryError::Serialization(e.to_string()))
}

/// Decode an entity from its JSON wire form.
pub(crate) fn from_wire<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T, RegistryError> {
    serde_json::from_slice(data).map_err(|e| RegistryError::Deserialization(e.to_string()))
}
