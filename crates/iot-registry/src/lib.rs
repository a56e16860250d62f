//! # iot-registry
//!
//! Ledger-resident registries for an IoT device/service marketplace.
//!
//! ## Components
//!
//! | Component | Location | Purpose |
//! |-----------|----------|---------|
//! | Keyed State Registry | `registry/state.rs` | Generic CRUD over composite keys and prefix scans |
//! | Device Registry | `registry/device.rs` | Devices keyed by `(organization, device)`; cascading deregistration |
//! | Service Registry | `registry/service.rs` | Services keyed by `(organization, device, name)`; device foreign key |
//! | Service Broker | `registry/broker.rs` | Request/response correlation plus the derived request index |
//! | Contract Surface | `contract/` | JSON parsing, caller authorization, event emission |
//!
//! ## Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Validation before every write | `registry/state.rs` - `put_state` |
//! | Existence before every delete | `registry/state.rs` - `remove_state` |
//! | Service requires a live device | `registry/service.rs` - `register` |
//! | Request requires a live service | `registry/broker.rs` - `request` |
//! | Duplicate request id is a conflict | `registry/broker.rs` - `request` |
//! | At most one response per request | `registry/broker.rs` - `respond` |
//! | Request and index live and die together | `registry/broker.rs` - `request`/`remove` |
//! | Only the target device responds/removes | `contract/broker.rs` |
//!
//! ## Execution Model
//!
//! Every operation runs inside a single ledger invocation that the platform
//! commits atomically. The core is synchronous and single-threaded for the
//! duration of one invocation: no locking, retries, or background tasks.
//! All state lives behind the `LedgerStore` port; the platform serializes
//! concurrent invocations.
//!
//! ## Usage Example
//!
//! ```
//! use iot_registry::prelude::*;
//!
//! let store = InMemoryLedger::new();
//! let identity = StaticIdentity::new("org1", "device1");
//! let events = RecordingEventSink::new();
//! let ctx = TransactionContext::new(&store, &identity, &events);
//!
//! let definition = r#"{
//!     "id": "device1",
//!     "organizationId": "org1",
//!     "name": "Thermostat",
//!     "lastUpdateTime": "2021-12-12T17:34:00Z"
//! }"#;
//! DeviceRegistryContract.register(&ctx, definition).unwrap();
//!
//! let device = DeviceRegistryContract.get(&ctx, "org1", "device1").unwrap();
//! assert_eq!(device.name, "Thermostat");
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod contract;
pub mod domain;
pub mod events;
pub mod keys;
pub mod ports;
pub mod registry;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain entities
    pub use crate::domain::entities::{
        Device, Service, ServiceRequest, ServiceRequestResponse, ServiceResponse,
    };

    // State capability and errors
    pub use crate::domain::errors::RegistryError;
    pub use crate::domain::state::LedgerState;

    // Composite keys
    pub use crate::keys::{make_composite_key, KEY_DELIMITER};

    // Ports
    pub use crate::ports::inbound::{DeviceLookup, RequestCascade, ServiceCascade, ServiceLookup};
    pub use crate::ports::outbound::{ClientIdentity, EventSink, LedgerStore};

    // Registries
    pub use crate::registry::{DeviceRegistry, ServiceBroker, ServiceRegistry, StateRegistry};

    // Contract surface
    pub use crate::contract::{
        DeviceRegistryContract, ServiceBrokerContract, ServiceRegistryContract,
        TransactionContext,
    };

    // Events
    pub use crate::events::{
        device_topic, request_topic, service_topic, DeviceAction, RequestAction, ServiceAction,
    };

    // Adapters
    pub use crate::adapters::{
        InMemoryLedger, RecordingEventSink, StaticIdentity, UnresolvedIdentity,
    };
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// TESTS
// =============================================================================
