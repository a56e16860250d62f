//! # Device Registry Contract
//!
//! Caller-facing surface for device operations. Parses JSON definitions,
//! enforces that only the calling device can register or deregister itself,
//! delegates to the device registry, and notifies listeners after success.

use crate::contract::context::TransactionContext;
use crate::domain::entities::Device;
use crate::domain::errors::RegistryError;
use crate::domain::state::LedgerState;
use crate::events::{device_topic, DeviceAction};

/// Smart-contract operations for managing devices on the ledger.
#[derive(Clone, Copy, Debug, Default)]
pub struct DeviceRegistryContract;

impl DeviceRegistryContract {
    /// Create or update a device from its JSON definition. The caller must
    /// be the device being registered.
    pub fn register(
        &self,
        ctx: &TransactionContext<'_>,
        definition: &str,
    ) -> Result<(), RegistryError> {
        let device = Device::from_json(definition.as_bytes())?;
        self.require_caller_owns(ctx, &device, "register")?;

        ctx.devices().register(&device)?;

        ctx.emit(
            &device_topic(&device.organization_id, &device.id, DeviceAction::Register),
            &device.serialize()?,
        )
    }

    /// Return a device by its organization id and device id.
    pub fn get(
        &self,
        ctx: &TransactionContext<'_>,
        organization_id: &str,
        device_id: &str,
    ) -> Result<Device, RegistryError> {
        ctx.devices().get(organization_id, device_id)
    }

    /// Return all devices of an organization.
    pub fn get_all(
        &self,
        ctx: &TransactionContext<'_>,
        organization_id: &str,
    ) -> Result<Vec<Device>, RegistryError> {
        ctx.devices().get_all(organization_id)
    }

    /// Remove a device and everything it owns from the ledger. The caller
    /// must be the device being deregistered.
    pub fn deregister(
        &self,
        ctx: &TransactionContext<'_>,
        definition: &str,
    ) -> Result<(), RegistryError> {
        let device = Device::from_json(definition.as_bytes())?;
        self.require_caller_owns(ctx, &device, "deregister")?;

        ctx.devices()
            .deregister(&device, ctx.services(), ctx.broker())?;

        ctx.emit(
            &device_topic(
                &device.organization_id,
                &device.id,
                DeviceAction::Deregister,
            ),
            &device.serialize()?,
        )
    }

    fn require_caller_owns(
        &self,
        ctx: &TransactionContext<'_>,
        device: &Device,
        action: &str,
    ) -> Result<(), RegistryError> {
        let (organization_id, device_id) = ctx.caller()?;
        if device.organization_id != organization_id || device.id != device_id {
            return Err(RegistryError::Unauthorized(format!(
                "cannot {action} a device other than the caller's device"
            )));
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
