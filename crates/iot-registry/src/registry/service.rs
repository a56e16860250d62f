//! # Service Registry
//!
//! Keyed state registry specialized to services, keyed by
//! `(organization, device, name)`. Registration enforces the device foreign
//! key through the `DeviceLookup` capability; deregistration cascades into
//! the broker to remove the service's outstanding requests first.

use tracing::info;

use crate::domain::entities::Service;
use crate::domain::errors::RegistryError;
use crate::ports::inbound::{DeviceLookup, RequestCascade, ServiceCascade, ServiceLookup};
use crate::ports::outbound::LedgerStore;
use crate::registry::state::StateRegistry;

/// Key namespace for service states.
pub const SERVICE_NAMESPACE: &str = "services";

/// Core utilities for managing IoT services on the ledger.
pub struct ServiceRegistry<'a> {
    states: StateRegistry<'a, Service>,
}

impl<'a> ServiceRegistry<'a> {
    /// Create a service registry over the given store.
    #[must_use]
    pub fn new(store: &'a dyn LedgerStore) -> Self {
        Self {
            states: StateRegistry::new(store, SERVICE_NAMESPACE),
        }
    }

    /// Create or update a service in the ledger. The owning device must
    /// exist; its absence propagates as `RegistryError::NotFound`.
    pub fn register(
        &self,
        service: &Service,
        devices: &dyn DeviceLookup,
    ) -> Result<(), RegistryError> {
        devices.device(&service.organization_id, &service.device_id)?;

        self.states.put_state(service)?;
        info!(
            organization = %service.organization_id,
            device = %service.device_id,
            service = %service.name,
            version = service.version,
            "registered service"
        );
        Ok(())
    }

    /// Return a service by its organization id, device id, and name.
    pub fn get(
        &self,
        organization_id: &str,
        device_id: &str,
        name: &str,
    ) -> Result<Service, RegistryError> {
        self.states.get_state(&[organization_id, device_id, name])
    }

    /// Return all services of a device, in key order.
    pub fn get_all(
        &self,
        organization_id: &str,
        device_id: &str,
    ) -> Result<Vec<Service>, RegistryError> {
        self.states.get_states(&[organization_id, device_id])
    }

    /// Remove a service from the ledger, removing every request/response
    /// pair bound to it first. Fail-fast, same policy as device
    /// deregistration.
    pub fn deregister(
        &self,
        service: &Service,
        requests: &dyn RequestCascade,
    ) -> Result<(), RegistryError> {
        let pairs = requests.requests_of_service(
            &service.organization_id,
            &service.device_id,
            &service.name,
        )?;
        for pair in &pairs {
            requests.remove(&pair.request.id)?;
        }

        self.states.remove_state(service)?;
        info!(
            organization = %service.organization_id,
            device = %service.device_id,
            service = %service.name,
            requests_removed = pairs.len(),
            "deregistered service"
        );
        Ok(())
    }
}

impl ServiceLookup for ServiceRegistry<'_> {
    fn service(
        &self,
        organization_id: &str,
        device_id: &str,
        name: &str,
    ) -> Result<Service, RegistryError> {
        self.get(organization_id, device_id, name)
    }
}

impl ServiceCascade for ServiceRegistry<'_> {
    fn services_of_device(
        &self,
        organization_id: &str,
        device_id: &str,
    ) -> Result<Vec<Service>, RegistryError> {
        self.get_all(organization_id, device_id)
    }

    fn deregister(
        &self,
        service: &Service,
        requests: &dyn RequestCascade,
    ) -> Result<(), RegistryError> {
        ServiceRegistry::deregister(self, service, requests)
    }
}

// =============================================================================
// TESTS
// =============================================================================
