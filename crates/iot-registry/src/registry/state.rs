//! # Keyed State Registry
//!
//! Generic CRUD over the ledger store for any entity implementing the
//! `LedgerState` capability. Each registry instance owns one namespace; the
//! entity type fixes the deserializer, so the concrete registries never
//! downcast.
//!
//! Contract (enforced here, relied on by every domain registry):
//! - `put_state` validates before writing and writes unconditionally
//!   (create-or-replace, no optimistic lock at this layer)
//! - `get_state` fails with `NotFound` carrying the composite key
//! - `get_states` returns an empty list, never an error, when nothing
//!   matches, and drains the scan before returning
//! - `remove_state` reads before deleting and fails with `NotFound` if the
//!   key is absent

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::errors::RegistryError;
use crate::domain::state::{from_wire, LedgerState};
use crate::keys::make_composite_key;
use crate::ports::outbound::LedgerStore;

/// Generic persistence for one entity type under one key namespace.
pub struct StateRegistry<'a, T> {
    store: &'a dyn LedgerStore,
    namespace: &'static str,
    _entity: PhantomData<fn() -> T>,
}

impl<'a, T> StateRegistry<'a, T>
where
    T: LedgerState + DeserializeOwned,
{
    /// Create a registry over `store` for keys under `namespace`.
    #[must_use]
    pub fn new(store: &'a dyn LedgerStore, namespace: &'static str) -> Self {
        Self {
            store,
            namespace,
            _entity: PhantomData,
        }
    }

    /// The key namespace this registry owns.
    #[must_use]
    pub fn namespace(&self) -> &'static str {
        self.namespace
    }

    /// Validate, serialize, and create-or-replace the entity's state.
    pub fn put_state(&self, state: &T) -> Result<(), RegistryError> {
        state.validate()?;

        let data = state.serialize()?;
        if data.is_empty() {
            return Err(RegistryError::Serialization(format!(
                "serialized state in '{}' is empty",
                self.namespace
            )));
        }

        let components = state.key_components();
        let key = make_composite_key(self.namespace, &as_strs(&components))?;
        debug!(namespace = self.namespace, key = %printable(&key), "put state");
        self.store.put(&key, &data)
    }

    /// Return the entity stored under the exact key components.
    pub fn get_state(&self, components: &[&str]) -> Result<T, RegistryError> {
        let key = make_composite_key(self.namespace, components)?;
        match self.store.get(&key)? {
            Some(data) => from_wire(&data),
            None => Err(RegistryError::NotFound { key }),
        }
    }

    /// Return all entities whose key starts with the given components, in
    /// store scan order. Empty result is not an error.
    pub fn get_states(&self, components: &[&str]) -> Result<Vec<T>, RegistryError> {
        let prefix = make_composite_key(self.namespace, components)?;

        let mut states = Vec::new();
        for (_, data) in self.store.scan_prefix(&prefix)? {
            states.push(from_wire(&data)?);
        }

        Ok(states)
    }

    /// Remove the entity's state. Fails with `NotFound` if it is absent.
    pub fn remove_state(&self, state: &T) -> Result<(), RegistryError> {
        let components = state.key_components();
        let key = make_composite_key(self.namespace, &as_strs(&components))?;

        if self.store.get(&key)?.is_none() {
            return Err(RegistryError::NotFound { key });
        }

        debug!(namespace = self.namespace, key = %printable(&key), "remove state");
        self.store.delete(&key)
    }
}

fn as_strs(components: &[String]) -> Vec<&str> {
    components.iter().map(String::as_str).collect()
}

/// Composite keys embed U+0000; swap it for `/` when logging.
fn printable(key: &str) -> String {
    key.replace('\u{0}', "/")
}

// =============================================================================
// TESTS
// =============================================================================
