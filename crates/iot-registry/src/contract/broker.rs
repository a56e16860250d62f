//! # Service Broker Contract
//!
//! Caller-facing surface for service requests and responses. Anyone may
//! submit a request; only the device a request targets may respond to it or
//! remove it. The ownership check runs against the stored request before the
//! broker is invoked, so callers can distinguish "request not found" from
//! "not authorized".

use crate::contract::context::TransactionContext;
use crate::domain::entities::{ServiceRequest, ServiceRequestResponse, ServiceResponse};
use crate::domain::errors::RegistryError;
use crate::domain::state::LedgerState;
use crate::events::{request_topic, RequestAction};

/// Smart-contract operations for managing IoT service requests and
/// responses.
#[derive(Clone, Copy, Debug, Default)]
pub struct ServiceBrokerContract;

impl ServiceBrokerContract {
    /// Submit a request to an IoT service from its JSON definition.
    pub fn request(
        &self,
        ctx: &TransactionContext<'_>,
        definition: &str,
    ) -> Result<(), RegistryError> {
        let request = ServiceRequest::from_json(definition.as_bytes())?;

        ctx.broker().request(&request, ctx.services())?;

        ctx.emit(
            &request_topic(
                &request.service.organization_id,
                &request.service.device_id,
                &request.service.name,
                &request.id,
                RequestAction::Request,
            ),
            &request.serialize()?,
        )
    }

    /// Respond to a request from the response's JSON definition. The caller
    /// must be the device the request targets.
    pub fn respond(
        &self,
        ctx: &TransactionContext<'_>,
        definition: &str,
    ) -> Result<(), RegistryError> {
        let response = ServiceResponse::from_json(definition.as_bytes())?;

        let pair = ctx.broker().get(&response.request_id)?;
        self.require_caller_is_target(ctx, &pair.request, "respond to")?;

        ctx.broker().respond(&response)?;

        ctx.emit(
            &request_topic(
                &pair.request.service.organization_id,
                &pair.request.service.device_id,
                &pair.request.service.name,
                &pair.request.id,
                RequestAction::Respond,
            ),
            &response.serialize()?,
        )
    }

    /// Return a request and its response (if any) by the request id.
    pub fn get(
        &self,
        ctx: &TransactionContext<'_>,
        request_id: &str,
    ) -> Result<ServiceRequestResponse, RegistryError> {
        ctx.broker().get(request_id)
    }

    /// Return all request/response pairs for a service.
    pub fn get_all(
        &self,
        ctx: &TransactionContext<'_>,
        organization_id: &str,
        device_id: &str,
        service_name: &str,
    ) -> Result<Vec<ServiceRequestResponse>, RegistryError> {
        ctx.broker().get_all(organization_id, device_id, service_name)
    }

    /// Remove a request/response pair by the request id. The caller must be
    /// the device the request targets.
    pub fn remove(
        &self,
        ctx: &TransactionContext<'_>,
        request_id: &str,
    ) -> Result<(), RegistryError> {
        let pair = ctx.broker().get(request_id)?;
        self.require_caller_is_target(ctx, &pair.request, "remove")?;

        ctx.broker().remove(request_id)?;

        ctx.emit(
            &request_topic(
                &pair.request.service.organization_id,
                &pair.request.service.device_id,
                &pair.request.service.name,
                &pair.request.id,
                RequestAction::Remove,
            ),
            request_id.as_bytes(),
        )
    }

    fn require_caller_is_target(
        &self,
        ctx: &TransactionContext<'_>,
        request: &ServiceRequest,
        action: &str,
    ) -> Result<(), RegistryError> {
        let (organization_id, device_id) = ctx.caller()?;
        if request.service.organization_id != organization_id
            || request.service.device_id != device_id
        {
            return Err(RegistryError::Unauthorized(format!(
                "cannot {action} a request from a device other than the requested device"
            )));
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
