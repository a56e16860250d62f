//! # Domain Entities
//!
//! Ledger-resident value records for the IoT marketplace: devices, services,
//! service requests/responses, and the broker's derived request index.
//!
//! All entities are immutable once validated and are replaced wholesale on
//! update. Wire format is UTF-8 JSON with camelCase fields and RFC3339
//! timestamps. "Time not set" is modeled as `None` so a missing field parses
//! but is rejected by `validate` before it can reach the ledger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::RegistryError;
use crate::domain::state::{from_wire, to_wire, LedgerState};

// =============================================================================
// DEVICE
// =============================================================================

/// An IoT device owned by an organization.
///
/// Identity on the ledger is `(organization_id, id)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    /// Identity of the device.
    pub id: String,
    /// Identity of the organization to which the device belongs.
    pub organization_id: String,
    /// Friendly name of the device.
    pub name: String,
    /// A brief summary of the device's functions.
    #[serde(default)]
    pub description: String,
    /// The latest time that the device state has been updated.
    #[serde(default)]
    pub last_update_time: Option<DateTime<Utc>>,
}

impl Device {
    /// Decode a device from its JSON definition.
    pub fn from_json(data: &[u8]) -> Result<Self, RegistryError> {
        from_wire(data)
    }
}

impl LedgerState for Device {
    fn key_components(&self) -> Vec<String> {
        vec![self.organization_id.clone(), self.id.clone()]
    }

    fn serialize(&self) -> Result<Vec<u8>, RegistryError> {
        to_wire(self)
    }

    fn validate(&self) -> Result<(), RegistryError> {
        if self.id.is_empty() {
            return Err(RegistryError::Validation(
                "missing device ID in device definition".into(),
            ));
        }
        if self.organization_id.is_empty() {
            return Err(RegistryError::Validation(
                "missing organization ID in device definition".into(),
            ));
        }
        if self.name.is_empty() {
            return Err(RegistryError::Validation(
                "missing device name in device definition".into(),
            ));
        }
        if self.last_update_time.is_none() {
            return Err(RegistryError::Validation(
                "missing device last update time in device definition".into(),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// SERVICE
// =============================================================================

/// An IoT service offered by a device.
///
/// Identity on the ledger is `(organization_id, device_id, name)`. A service
/// belongs to exactly one device; the foreign key is enforced at registration
/// time by the service registry, not by the store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// Name of the IoT service.
    pub name: String,
    /// Identity of the device to which the service belongs.
    pub device_id: String,
    /// Identity of the organization to which the service belongs.
    pub organization_id: String,
    /// Version number of the service. Strictly positive.
    #[serde(default)]
    pub version: i32,
    /// A brief summary of the service's functions.
    #[serde(default)]
    pub description: String,
    /// The latest time that the service state has been updated.
    #[serde(default)]
    pub last_update_time: Option<DateTime<Utc>>,
}

impl Service {
    /// Decode a service from its JSON definition.
    pub fn from_json(data: &[u8]) -> Result<Self, RegistryError> {
        from_wire(data)
    }
}

impl LedgerState for Service {
    fn key_components(&self) -> Vec<String> {
        vec![
            self.organization_id.clone(),
            self.device_id.clone(),
            self.name.clone(),
        ]
    }

    fn serialize(&self) -> Result<Vec<u8>, RegistryError> {
        to_wire(self)
    }

    fn validate(&self) -> Result<(), RegistryError> {
        if self.name.is_empty() {
            return Err(RegistryError::Validation(
                "missing service name in service definition".into(),
            ));
        }
        if self.device_id.is_empty() {
            return Err(RegistryError::Validation(
                "missing device ID in service definition".into(),
            ));
        }
        if self.organization_id.is_empty() {
            return Err(RegistryError::Validation(
                "missing organization ID in service definition".into(),
            ));
        }
        if self.version == 0 {
            return Err(RegistryError::Validation(
                "missing service version in service definition".into(),
            ));
        }
        if self.version < 0 {
            return Err(RegistryError::Validation(
                "service version must be a positive integer".into(),
            ));
        }
        if self.last_update_time.is_none() {
            return Err(RegistryError::Validation(
                "missing service last update time in service definition".into(),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// SERVICE REQUEST
// =============================================================================

/// A request submitted against an IoT service.
///
/// Identity on the ledger is the request UUID alone; the broker maintains a
/// separate index so requests can also be enumerated by service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequest {
    /// Identity of the request, a UUID in its canonical string form.
    pub id: String,
    /// Time of the request.
    #[serde(default)]
    pub time: Option<DateTime<Utc>>,
    /// The requested service, referenced by value.
    pub service: Service,
    /// Requested method.
    pub method: String,
    /// Ordered request arguments.
    #[serde(default)]
    pub arguments: Vec<String>,
}

impl ServiceRequest {
    /// Decode a service request from its JSON definition.
    pub fn from_json(data: &[u8]) -> Result<Self, RegistryError> {
        from_wire(data)
    }
}

impl LedgerState for ServiceRequest {
    fn key_components(&self) -> Vec<String> {
        vec![self.id.clone()]
    }

    fn serialize(&self) -> Result<Vec<u8>, RegistryError> {
        to_wire(self)
    }

    fn validate(&self) -> Result<(), RegistryError> {
        if Uuid::parse_str(&self.id).is_err() {
            return Err(RegistryError::Validation(
                "invalid request ID in request definition".into(),
            ));
        }
        if self.service.organization_id.is_empty()
            || self.service.device_id.is_empty()
            || self.service.name.is_empty()
        {
            return Err(RegistryError::Validation(
                "missing requested service in request definition".into(),
            ));
        }
        if self.method.is_empty() {
            return Err(RegistryError::Validation(
                "missing request method in request definition".into(),
            ));
        }
        if self.time.is_none() {
            return Err(RegistryError::Validation(
                "missing request time in request definition".into(),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// SERVICE RESPONSE
// =============================================================================

/// The response to a service request. At most one may exist per request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceResponse {
    /// Identity of the request being responded to.
    pub request_id: String,
    /// Time of the response.
    #[serde(default)]
    pub time: Option<DateTime<Utc>>,
    /// Status code of the response.
    #[serde(default)]
    pub status_code: i32,
    /// Return value of the response.
    #[serde(default)]
    pub return_value: String,
}

impl ServiceResponse {
    /// Decode a service response from its JSON definition.
    pub fn from_json(data: &[u8]) -> Result<Self, RegistryError> {
        from_wire(data)
    }
}

impl LedgerState for ServiceResponse {
    fn key_components(&self) -> Vec<String> {
        vec![self.request_id.clone()]
    }

    fn serialize(&self) -> Result<Vec<u8>, RegistryError> {
        to_wire(self)
    }

    fn validate(&self) -> Result<(), RegistryError> {
        if Uuid::parse_str(&self.request_id).is_err() {
            return Err(RegistryError::Validation(
                "invalid request ID in response definition".into(),
            ));
        }
        if self.time.is_none() {
            return Err(RegistryError::Validation(
                "missing response time in response definition".into(),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// REQUEST/RESPONSE PAIR
// =============================================================================

/// A service request paired with its response, if any.
///
/// A missing response is a valid state (the request has not been answered),
/// distinct from the request itself being absent, which is a hard error.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequestResponse {
    /// The service request.
    pub request: ServiceRequest,
    /// The response, absent until the target device responds.
    pub response: Option<ServiceResponse>,
}

// =============================================================================
// REQUEST INDEX
// =============================================================================

/// Derived marker entity that makes `(organization, device, service)` →
/// request ids enumerable via prefix scan.
///
/// Created and removed strictly alongside its request; never independently
/// mutated. The payload carries no information the key does not.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ServiceRequestIndex {
    pub organization_id: String,
    pub device_id: String,
    pub service_name: String,
    pub request_id: String,
}

impl ServiceRequestIndex {
    /// Build the index entry for a request from the request's own service
    /// fields, so creation and removal always derive the same key.
    pub(crate) fn for_request(request: &ServiceRequest) -> Self {
        Self {
            organization_id: request.service.organization_id.clone(),
            device_id: request.service.device_id.clone(),
            service_name: request.service.name.clone(),
            request_id: request.id.clone(),
        }
    }
}

impl LedgerState for ServiceRequestIndex {
    fn key_components(&self) -> Vec<String> {
        vec![
            self.organization_id.clone(),
            self.device_id.clone(),
            self.service_name.clone(),
            self.request_id.clone(),
        ]
    }

    fn serialize(&self) -> Result<Vec<u8>, RegistryError> {
        to_wire(self)
    }

    fn validate(&self) -> Result<(), RegistryError> {
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
