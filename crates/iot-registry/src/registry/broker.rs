//! # Service Broker
//!
//! Manages service-request and service-response states plus the derived
//! request index that makes requests enumerable by
//! `(organization, device, service)` without scanning the whole request
//! keyspace.
//!
//! Per-request state machine:
//!
//! ```text
//! absent -> requested -> responded -> absent
//!               \____________________/
//!                  (removal is valid from either live state)
//! ```
//!
//! No transition skips `requested`; `responded` cannot be reached twice; a
//! request and its index entry are created and destroyed together.

use tracing::{debug, info};

use crate::domain::entities::{
    ServiceRequest, ServiceRequestIndex, ServiceRequestResponse, ServiceResponse,
};
use crate::domain::errors::RegistryError;
use crate::domain::state::LedgerState;
use crate::ports::inbound::{RequestCascade, ServiceLookup};
use crate::ports::outbound::LedgerStore;
use crate::registry::state::StateRegistry;

/// Key namespace for request states.
pub const REQUEST_NAMESPACE: &str = "requests";
/// Key namespace for response states.
pub const RESPONSE_NAMESPACE: &str = "responses";
/// Key namespace for the derived request index.
pub const REQUEST_INDEX_NAMESPACE: &str = "request_indices";

/// Core utilities for managing IoT service requests and responses on the
/// ledger.
pub struct ServiceBroker<'a> {
    requests: StateRegistry<'a, ServiceRequest>,
    responses: StateRegistry<'a, ServiceResponse>,
    index: StateRegistry<'a, ServiceRequestIndex>,
}

impl<'a> ServiceBroker<'a> {
    /// Create a service broker over the given store.
    #[must_use]
    pub fn new(store: &'a dyn LedgerStore) -> Self {
        Self {
            requests: StateRegistry::new(store, REQUEST_NAMESPACE),
            responses: StateRegistry::new(store, RESPONSE_NAMESPACE),
            index: StateRegistry::new(store, REQUEST_INDEX_NAMESPACE),
        }
    }

    /// Make a request to an IoT service.
    ///
    /// The referenced service must exist (`NotFound` otherwise). A reused
    /// request id fails with `AlreadyExists` and never silently overwrites,
    /// which lets callers retry an aborted submission safely.
    pub fn request(
        &self,
        request: &ServiceRequest,
        services: &dyn ServiceLookup,
    ) -> Result<(), RegistryError> {
        services.service(
            &request.service.organization_id,
            &request.service.device_id,
            &request.service.name,
        )?;

        match self.get_request(&request.id) {
            Ok(_) => {
                return Err(RegistryError::AlreadyExists(format!(
                    "request {}",
                    request.id
                )))
            }
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(e),
        }

        // Validate up front, then write the index entry before the request:
        // a torn pair must never leave a live request that index scans
        // cannot see. The platform discards the torn index entry when the
        // invocation aborts.
        request.validate()?;
        self.index
            .put_state(&ServiceRequestIndex::for_request(request))?;
        self.requests.put_state(request)?;

        info!(
            organization = %request.service.organization_id,
            device = %request.service.device_id,
            service = %request.service.name,
            request = %request.id,
            method = %request.method,
            "created service request"
        );
        Ok(())
    }

    /// Respond to an IoT service request.
    ///
    /// The request must exist (`NotFound` otherwise) and must not have been
    /// responded to yet (`AlreadyExists` otherwise).
    pub fn respond(&self, response: &ServiceResponse) -> Result<(), RegistryError> {
        self.get_request(&response.request_id)?;

        match self.get_response(&response.request_id) {
            Ok(_) => {
                return Err(RegistryError::AlreadyExists(format!(
                    "response to request {}",
                    response.request_id
                )))
            }
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(e),
        }

        self.responses.put_state(response)?;
        info!(
            request = %response.request_id,
            status_code = response.status_code,
            "created service response"
        );
        Ok(())
    }

    /// Return a request by its id.
    pub fn get_request(&self, request_id: &str) -> Result<ServiceRequest, RegistryError> {
        self.requests.get_state(&[request_id])
    }

    /// Return a response by its request id.
    pub fn get_response(&self, request_id: &str) -> Result<ServiceResponse, RegistryError> {
        self.responses.get_state(&[request_id])
    }

    /// Return a request paired with its response. A missing response yields
    /// `None`; a missing request is a hard `NotFound`.
    pub fn get(&self, request_id: &str) -> Result<ServiceRequestResponse, RegistryError> {
        let request = self.get_request(request_id)?;
        let response = self.optional_response(request_id)?;

        Ok(ServiceRequestResponse { request, response })
    }

    /// Return all request/response pairs bound to a service, resolved in
    /// index-scan order.
    pub fn get_all(
        &self,
        organization_id: &str,
        device_id: &str,
        service_name: &str,
    ) -> Result<Vec<ServiceRequestResponse>, RegistryError> {
        let entries = self
            .index
            .get_states(&[organization_id, device_id, service_name])?;

        let mut pairs = Vec::with_capacity(entries.len());
        for entry in entries {
            pairs.push(self.get(&entry.request_id)?);
        }

        Ok(pairs)
    }

    /// Remove a request, its response (if any), and its index entry as one
    /// conceptual unit, in the order response, request, index. A missing
    /// response is expected; a missing request is a hard `NotFound` so
    /// callers removing dead ids hear about it.
    pub fn remove(&self, request_id: &str) -> Result<(), RegistryError> {
        if let Some(response) = self.optional_response(request_id)? {
            self.responses.remove_state(&response)?;
        }

        let request = self.get_request(request_id)?;
        self.requests.remove_state(&request)?;

        // the index key is derived from the stored request's own service
        // fields, the same derivation used at creation
        self.index
            .remove_state(&ServiceRequestIndex::for_request(&request))?;

        debug!(request = %request_id, "removed service request");
        Ok(())
    }

    fn optional_response(
        &self,
        request_id: &str,
    ) -> Result<Option<ServiceResponse>, RegistryError> {
        match self.get_response(request_id) {
            Ok(response) => Ok(Some(response)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }
}

impl RequestCascade for ServiceBroker<'_> {
    fn requests_of_service(
        &self,
        organization_id: &str,
        device_id: &str,
        name: &str,
    ) -> Result<Vec<ServiceRequestResponse>, RegistryError> {
        self.get_all(organization_id, device_id, name)
    }

    fn remove(&self, request_id: &str) -> Result<(), RegistryError> {
        ServiceBroker::remove(self, request_id)
    }
}

// =============================================================================
// TESTS
// =============================================================================
