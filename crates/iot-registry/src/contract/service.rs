//! # Service Registry Contract
//!
//! Caller-facing surface for service operations. A device may only manage
//! services it owns; ownership is checked against the caller's identity
//! before any state change.

use crate::contract::context::TransactionContext;
use crate::domain::entities::Service;
use crate::domain::errors::RegistryError;
use crate::domain::state::LedgerState;
use crate::events::{service_topic, ServiceAction};

/// Smart-contract operations for managing IoT services on the ledger.
#[derive(Clone, Copy, Debug, Default)]
pub struct ServiceRegistryContract;

impl ServiceRegistryContract {
    /// Create or update a service from its JSON definition. The caller must
    /// be the device the service belongs to; the device must already be
    /// registered.
    pub fn register(
        &self,
        ctx: &TransactionContext<'_>,
        definition: &str,
    ) -> Result<(), RegistryError> {
        let service = Service::from_json(definition.as_bytes())?;
        self.require_caller_owns(ctx, &service, "register")?;

        ctx.services().register(&service, ctx.devices())?;

        ctx.emit(
            &service_topic(
                &service.organization_id,
                &service.device_id,
                &service.name,
                ServiceAction::Register,
            ),
            &service.serialize()?,
        )
    }

    /// Return a service by its organization id, device id, and name.
    pub fn get(
        &self,
        ctx: &TransactionContext<'_>,
        organization_id: &str,
        device_id: &str,
        name: &str,
    ) -> Result<Service, RegistryError> {
        ctx.services().get(organization_id, device_id, name)
    }

    /// Return all services of a device.
    pub fn get_all(
        &self,
        ctx: &TransactionContext<'_>,
        organization_id: &str,
        device_id: &str,
    ) -> Result<Vec<Service>, RegistryError> {
        ctx.services().get_all(organization_id, device_id)
    }

    /// Remove a service and its outstanding requests from the ledger. The
    /// caller must be the device the service belongs to.
    pub fn deregister(
        &self,
        ctx: &TransactionContext<'_>,
        definition: &str,
    ) -> Result<(), RegistryError> {
        let service = Service::from_json(definition.as_bytes())?;
        self.require_caller_owns(ctx, &service, "deregister")?;

        ctx.services().deregister(&service, ctx.broker())?;

        ctx.emit(
            &service_topic(
                &service.organization_id,
                &service.device_id,
                &service.name,
                ServiceAction::Deregister,
            ),
            &service.serialize()?,
        )
    }

    fn require_caller_owns(
        &self,
        ctx: &TransactionContext<'_>,
        service: &Service,
        action: &str,
    ) -> Result<(), RegistryError> {
        let (organization_id, device_id) = ctx.caller()?;
        if service.organization_id != organization_id || service.device_id != device_id {
            return Err(RegistryError::Unauthorized(format!(
                "cannot {action} a service of a device other than the caller's device"
            )));
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryLedger, RecordingEventSink, StaticIdentity};
    use crate::contract::device::DeviceRegistryContract;
    use crate::domain::entities::Device;
    use chrono::{DateTime, TimeZone, Utc};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 12, 12, 17, 34, 0).unwrap()
    }

    fn device_definition(org: &str, id: &str) -> String {
        let device = Device {
            id: id.into(),
            organization_id: org.into(),
            name: format!("Device {id}"),
            description: String::new(),
            last_update_time: Some(t0()),
        };
        String::from_utf8(device.serialize().unwrap()).unwrap()
    }

    fn service_definition(org: &str, dev: &str, name: &str) -> String {
        let service = Service {
            name: name.into(),
            device_id: dev.into(),
            organization_id: org.into(),
            version: 1,
            description: String::new(),
            last_update_time: Some(t0()),
        };
        String::from_utf8(service.serialize().unwrap()).unwrap()
    }

    #[test]
    fn test_register_requires_registered_device() {
        let store = InMemoryLedger::new();
        let identity = StaticIdentity::new("org1", "device1");
        let events = RecordingEventSink::new();
        let ctx = TransactionContext::new(&store, &identity, &events);
        let contract = ServiceRegistryContract;

        let err = contract
            .register(&ctx, &service_definition("org1", "device1", "service1"))
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(events.events().is_empty());

        DeviceRegistryContract
            .register(&ctx, &device_definition("org1", "device1"))
            .unwrap();
        contract
            .register(&ctx, &service_definition("org1", "device1", "service1"))
            .unwrap();

        assert_eq!(
            contract.get(&ctx, "org1", "device1", "service1").unwrap().name,
            "service1"
        );
        assert_eq!(
            events.topics().last().unwrap(),
            "service://org1/device1/service1/register"
        );
    }

    #[test]
    fn test_register_for_foreign_device_is_unauthorized() {
        let store = InMemoryLedger::new();
        let identity = StaticIdentity::new("org1", "device1");
        let events = RecordingEventSink::new();
        let ctx = TransactionContext::new(&store, &identity, &events);

        let err = ServiceRegistryContract
            .register(&ctx, &service_definition("org1", "device2", "service1"))
            .unwrap_err();
        assert!(matches!(err, RegistryError::Unauthorized(_)));
    }

    #[test]
    fn test_deregister_emits_event() {
        let store = InMemoryLedger::new();
        let identity = StaticIdentity::new("org1", "device1");
        let events = RecordingEventSink::new();
        let ctx = TransactionContext::new(&store, &identity, &events);
        let contract = ServiceRegistryContract;

        DeviceRegistryContract
            .register(&ctx, &device_definition("org1", "device1"))
            .unwrap();
        contract
            .register(&ctx, &service_definition("org1", "device1", "service1"))
            .unwrap();
        contract
            .deregister(&ctx, &service_definition("org1", "device1", "service1"))
            .unwrap();

        assert_eq!(
            events.topics().last().unwrap(),
            "service://org1/device1/service1/deregister"
        );
        assert!(contract
            .get_all(&ctx, "org1", "device1")
            .unwrap()
            .is_empty());
    }
}
