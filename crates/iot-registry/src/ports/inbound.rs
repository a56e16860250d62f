//! # Capability Seams (Inbound)
//!
//! The registries reference one another in both directions: the service
//! registry checks device existence at registration, while deregistration
//! cascades downward from devices through services into the broker. These
//! capability traits break that cycle: each registry depends only on the
//! capability it needs, and the per-invocation `TransactionContext` wires
//! concrete registries together by passing them into the operations that
//! need a collaborator. No registry holds a reference to another.

use crate::domain::{Device, RegistryError, Service, ServiceRequestResponse};

/// Lookup of devices by identity. Implemented by the device registry; used
/// by the service registry to enforce the device foreign key.
pub trait DeviceLookup {
    /// Return the device with the given organization and device id, or
    /// `RegistryError::NotFound`.
    fn device(&self, organization_id: &str, device_id: &str) -> Result<Device, RegistryError>;
}

/// Lookup of services by identity. Implemented by the service registry; used
/// by the broker to refuse requests against unknown services.
pub trait ServiceLookup {
    /// Return the service with the given identity, or
    /// `RegistryError::NotFound`.
    fn service(
        &self,
        organization_id: &str,
        device_id: &str,
        name: &str,
    ) -> Result<Service, RegistryError>;
}

/// Cascade removal of broker state. Implemented by the service broker; used
/// by the service registry (and transitively the device registry) when an
/// owner is deregistered.
pub trait RequestCascade {
    /// All request/response pairs bound to the given service, in index-scan
    /// order.
    fn requests_of_service(
        &self,
        organization_id: &str,
        device_id: &str,
        name: &str,
    ) -> Result<Vec<ServiceRequestResponse>, RegistryError>;

    /// Remove the response (if any), the request, and its index entry. A
    /// missing request is a hard `RegistryError::NotFound`.
    fn remove(&self, request_id: &str) -> Result<(), RegistryError>;
}

/// Cascade removal of services. Implemented by the service registry; used by
/// the device registry when a device is deregistered.
pub trait ServiceCascade {
    /// All services owned by the given device.
    fn services_of_device(
        &self,
        organization_id: &str,
        device_id: &str,
    ) -> Result<Vec<Service>, RegistryError>;

    /// Deregister one service, removing its outstanding requests first.
    fn deregister(
        &self,
        service: &Service,
        requests: &dyn RequestCascade,
    ) -> Result<(), RegistryError>;
}
