//! The state-management layer: the generic keyed-state registry and the
//! three domain registries built on it.

pub mod broker;
pub mod device;
pub mod service;
pub mod state;

pub use broker::ServiceBroker;
pub use device::DeviceRegistry;
pub use service::ServiceRegistry;
pub use state::StateRegistry;
