//! # Device Registry
//!
//! Keyed state registry specialized to devices, keyed by
//! `(organization, device)`. Owns cascading deregistration: a device's
//! services (and, through them, their outstanding requests) are removed
//! before the device itself.

use tracing::info;

use crate::domain::entities::Device;
use crate::domain::errors::RegistryError;
use crate::ports::inbound::{DeviceLookup, RequestCascade, ServiceCascade};
use crate::ports::outbound::LedgerStore;
use crate::registry::state::StateRegistry;

/// Key namespace for device states.
pub const DEVICE_NAMESPACE: &str = "devices";

/// Core utilities for managing devices on the ledger.
pub struct DeviceRegistry<'a> {
    states: StateRegistry<'a, Device>,
}

impl<'a> DeviceRegistry<'a> {
    /// Create a device registry over the given store.
    #[must_use]
    pub fn new(store: &'a dyn LedgerStore) -> Self {
        Self {
            states: StateRegistry::new(store, DEVICE_NAMESPACE),
        }
    }

    /// Create or update a device in the ledger. Upsert; no existence
    /// precondition.
    pub fn register(&self, device: &Device) -> Result<(), RegistryError> {
        self.states.put_state(device)?;
        info!(
            organization = %device.organization_id,
            device = %device.id,
            "registered device"
        );
        Ok(())
    }

    /// Return a device by its organization id and device id.
    pub fn get(&self, organization_id: &str, device_id: &str) -> Result<Device, RegistryError> {
        self.states.get_state(&[organization_id, device_id])
    }

    /// Return all devices of an organization, in key order.
    pub fn get_all(&self, organization_id: &str) -> Result<Vec<Device>, RegistryError> {
        self.states.get_states(&[organization_id])
    }

    /// Remove a device from the ledger, deregistering every service it owns
    /// first. Fail-fast: the first cascade failure stops the operation and
    /// the platform's whole-invocation atomicity discards the partial
    /// cascade.
    pub fn deregister(
        &self,
        device: &Device,
        services: &dyn ServiceCascade,
        requests: &dyn RequestCascade,
    ) -> Result<(), RegistryError> {
        let owned = services.services_of_device(&device.organization_id, &device.id)?;
        for service in &owned {
            services.deregister(service, requests)?;
        }

        self.states.remove_state(device)?;
        info!(
            organization = %device.organization_id,
            device = %device.id,
            services_removed = owned.len(),
            "deregistered device"
        );
        Ok(())
    }
}

impl DeviceLookup for DeviceRegistry<'_> {
    fn device(&self, organization_id: &str, device_id: &str) -> Result<Device, RegistryError> {
        self.get(organization_id, device_id)
    }
}

// =============================================================================
// TESTS
// =============================================================================
