//! Fixed-credential implementation of `ClientIdentity` for tests and demos.

use crate::domain::errors::RegistryError;
use crate::ports::outbound::ClientIdentity;

/// A client identity with fixed organization and device identifiers.
#[derive(Clone, Debug)]
pub struct StaticIdentity {
    organization_id: String,
    device_id: String,
}

impl StaticIdentity {
    /// Create an identity for the given organization and device.
    #[must_use]
    pub fn new(organization_id: impl Into<String>, device_id: impl Into<String>) -> Self {
        Self {
            organization_id: organization_id.into(),
            device_id: device_id.into(),
        }
    }
}

impl ClientIdentity for StaticIdentity {
    fn organization_id(&self) -> Result<String, RegistryError> {
        Ok(self.organization_id.clone())
    }

    fn device_id(&self) -> Result<String, RegistryError> {
        Ok(self.device_id.clone())
    }
}

/// An identity whose resolution always fails, for exercising the
/// malformed-credential path.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnresolvedIdentity;

impl ClientIdentity for UnresolvedIdentity {
    fn organization_id(&self) -> Result<String, RegistryError> {
        Err(RegistryError::Identity("cannot determine identity".into()))
    }

    fn device_id(&self) -> Result<String, RegistryError> {
        Err(RegistryError::Identity("cannot determine identity".into()))
    }
}

// =============================================================================
// TESTS
// =============================================================================
