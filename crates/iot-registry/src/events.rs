//! # Event Topics
//!
//! Structured topics for the notifications emitted after successful
//! mutations. The contract layer formats topics only through these builders
//! so every listener sees one consistent scheme:
//!
//! ```text
//! device://{organization}/{device}/{action}
//! service://{organization}/{device}/{name}/{action}
//! request://{organization}/{device}/{name}/{request}/{action}
//! ```
//!
//! Delivery is best-effort and outside this crate's contract.

use std::fmt;

/// Device registry mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceAction {
    /// A device was created or updated.
    Register,
    /// A device (and its services) was removed.
    Deregister,
}

impl fmt::Display for DeviceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Register => f.write_str("register"),
            Self::Deregister => f.write_str("deregister"),
        }
    }
}

/// Service registry mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ServiceAction {
    /// A service was created or updated.
    Register,
    /// A service (and its requests) was removed.
    Deregister,
}

impl fmt::Display for ServiceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Register => f.write_str("register"),
            Self::Deregister => f.write_str("deregister"),
        }
    }
}

/// Service broker mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestAction {
    /// A request was created.
    Request,
    /// A response was recorded.
    Respond,
    /// A request/response pair was removed.
    Remove,
}

impl fmt::Display for RequestAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request => f.write_str("request"),
            Self::Respond => f.write_str("respond"),
            Self::Remove => f.write_str("remove"),
        }
    }
}

/// Topic for a device registry event.
#[must_use]
pub fn device_topic(organization_id: &str, device_id: &str, action: DeviceAction) -> String {
    format!("device://{organization_id}/{device_id}/{action}")
}

/// Topic for a service registry event.
#[must_use]
pub fn service_topic(
    organization_id: &str,
    device_id: &str,
    service_name: &str,
    action: ServiceAction,
) -> String {
    format!("service://{organization_id}/{device_id}/{service_name}/{action}")
}

/// Topic for a service broker event.
#[must_use]
pub fn request_topic(
    organization_id: &str,
    device_id: &str,
    service_name: &str,
    request_id: &str,
    action: RequestAction,
) -> String {
    format!("request://{organization_id}/{device_id}/{service_name}/{request_id}/{action}")
}

// =============================================================================
// TESTS
// =============================================================================
