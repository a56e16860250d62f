//! # Transaction Context
//!
//! Per-invocation wiring. The platform hands the contract layer a store, an
//! identity resolver, and an event sink; the context builds the three
//! registries over them once, with no hidden globals or lazy memoization,
//! and the contract types borrow whichever collaborators an operation
//! needs.

use crate::domain::errors::RegistryError;
use crate::ports::outbound::{ClientIdentity, EventSink, LedgerStore};
use crate::registry::broker::ServiceBroker;
use crate::registry::device::DeviceRegistry;
use crate::registry::service::ServiceRegistry;

/// Everything one top-level contract invocation operates on.
pub struct TransactionContext<'a> {
    identity: &'a dyn ClientIdentity,
    events: &'a dyn EventSink,
    devices: DeviceRegistry<'a>,
    services: ServiceRegistry<'a>,
    broker: ServiceBroker<'a>,
}

impl<'a> TransactionContext<'a> {
    /// Build the registries for one invocation.
    #[must_use]
    pub fn new(
        store: &'a dyn LedgerStore,
        identity: &'a dyn ClientIdentity,
        events: &'a dyn EventSink,
    ) -> Self {
        Self {
            identity,
            events,
            devices: DeviceRegistry::new(store),
            services: ServiceRegistry::new(store),
            broker: ServiceBroker::new(store),
        }
    }

    /// The device registry for this invocation.
    #[must_use]
    pub fn devices(&self) -> &DeviceRegistry<'a> {
        &self.devices
    }

    /// The service registry for this invocation.
    #[must_use]
    pub fn services(&self) -> &ServiceRegistry<'a> {
        &self.services
    }

    /// The service broker for this invocation.
    #[must_use]
    pub fn broker(&self) -> &ServiceBroker<'a> {
        &self.broker
    }

    /// Resolve the caller's `(organization_id, device_id)`.
    pub fn caller(&self) -> Result<(String, String), RegistryError> {
        Ok((
            self.identity.organization_id()?,
            self.identity.device_id()?,
        ))
    }

    /// Emit a notification after a successful mutation.
    pub(crate) fn emit(&self, topic: &str, payload: &[u8]) -> Result<(), RegistryError> {
        self.events.set_event(topic, payload)
    }
}
