//! Contract-dispatch surface: per-invocation context plus the three
//! caller-facing contracts. Authorization and event emission live here, not
//! in the registries.

pub mod broker;
pub mod context;
pub mod device;
pub mod service;

pub use broker::ServiceBrokerContract;
pub use context::TransactionContext;
pub use device::DeviceRegistryContract;
pub use service::ServiceRegistryContract;
