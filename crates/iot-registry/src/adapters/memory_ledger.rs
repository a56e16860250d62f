//! In-memory implementation of the ledger store for tests and demos.
//!
//! Keys live in a `BTreeMap`, so prefix scans come back in ascending key
//! order, the same stable ordering contract the real store provides.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::RwLock;

use crate::domain::errors::RegistryError;
use crate::ports::outbound::LedgerStore;

/// Ordered in-memory key/value store implementing `LedgerStore`.
#[derive(Default)]
pub struct InMemoryLedger {
    states: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl InMemoryLedger {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored, across all namespaces.
    pub fn len(&self) -> usize {
        self.states.read().map(|s| s.len()).unwrap_or(0)
    }

    /// True when no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> RegistryError {
    RegistryError::Store("ledger lock poisoned".into())
}

impl LedgerStore for InMemoryLedger {
    fn put(&self, key: &str, value: &[u8]) -> Result<(), RegistryError> {
        let mut states = self.states.write().map_err(poisoned)?;
        states.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, RegistryError> {
        let states = self.states.read().map_err(poisoned)?;
        Ok(states.get(key).cloned())
    }

    fn delete(&self, key: &str) -> Result<(), RegistryError> {
        let mut states = self.states.write().map_err(poisoned)?;
        states.remove(key);
        Ok(())
    }

    fn scan_prefix(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, RegistryError> {
        let states = self.states.read().map_err(poisoned)?;
        let matches = states
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        Ok(matches)
    }
}

// =============================================================================
// TESTS
// =============================================================================
