//! Recording implementation of `EventSink` for tests and demos.

use std::sync::RwLock;

use crate::domain::errors::RegistryError;
use crate::ports::outbound::EventSink;

/// An event sink that records every `(topic, payload)` it receives.
#[derive(Default)]
pub struct RecordingEventSink {
    events: RwLock<Vec<(String, Vec<u8>)>>,
}

impl RecordingEventSink {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events, in emission order.
    pub fn events(&self) -> Vec<(String, Vec<u8>)> {
        self.events.read().map(|e| e.clone()).unwrap_or_default()
    }

    /// Topics only, in emission order.
    pub fn topics(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .map(|(topic, _)| topic)
            .collect()
    }
}

impl EventSink for RecordingEventSink {
    fn set_event(&self, topic: &str, payload: &[u8]) -> Result<(), RegistryError> {
        let mut events = self
            .events
            .write()
            .map_err(|_| RegistryError::Store("event sink lock poisoned".into()))?;
        events.push((topic.to_string(), payload.to_vec()));
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
