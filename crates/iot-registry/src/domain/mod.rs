//! Domain model: ledger entities, the state capability, and the error
//! taxonomy.

pub mod entities;
pub mod errors;
pub mod state;

pub use entities::{Device, Service, ServiceRequest, ServiceRequestResponse, ServiceResponse};
pub use errors::RegistryError;
pub use state::LedgerState;
