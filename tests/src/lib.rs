//! # IoT Service Ledger Test Suite
//!
//! Unified test crate for cross-registry scenarios that span the contract
//! surface, the three registries, and the in-memory adapters.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── lifecycle.rs      # cascading deregistration scenarios
//!     └── broker_flows.rs   # request/respond/remove flows
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p registry-tests
//! ```

pub mod integration;

use chrono::{DateTime, TimeZone, Utc};
use iot_registry::prelude::*;

/// Install the fmt subscriber so `RUST_LOG` controls log capture during a
/// test run. Later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Fixed timestamp shared by fixtures.
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2021, 12, 12, 17, 34, 0).unwrap()
}

/// Device fixture.
pub fn device(org: &str, id: &str) -> Device {
    Device {
        id: id.into(),
        organization_id: org.into(),
        name: format!("Device {id}"),
        description: "integration fixture".into(),
        last_update_time: Some(t0()),
    }
}

/// Service fixture.
pub fn service(org: &str, dev: &str, name: &str) -> Service {
    Service {
        name: name.into(),
        device_id: dev.into(),
        organization_id: org.into(),
        version: 1,
        description: "integration fixture".into(),
        last_update_time: Some(t0()),
    }
}

/// Request fixture against a service.
pub fn request(id: &str, svc: &Service) -> ServiceRequest {
    ServiceRequest {
        id: id.into(),
        time: Some(t0()),
        service: svc.clone(),
        method: "GET".into(),
        arguments: vec!["1".into(), "2".into(), "3".into()],
    }
}

/// Response fixture for a request id.
pub fn response(request_id: &str) -> ServiceResponse {
    ServiceResponse {
        request_id: request_id.into(),
        time: Some(t0()),
        status_code: 0,
        return_value: "ok".into(),
    }
}

/// Serialize any ledger entity to the JSON definition the contract surface
/// accepts.
pub fn definition<T: LedgerState>(entity: &T) -> String {
    String::from_utf8(entity.serialize().unwrap()).unwrap()
}
