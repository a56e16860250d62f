//! Ports: driven interfaces consumed from the platform (`outbound`) and the
//! capability seams between registries (`inbound`).

pub mod inbound;
pub mod outbound;

pub use inbound::{DeviceLookup, RequestCascade, ServiceCascade, ServiceLookup};
pub use outbound::{ClientIdentity, EventSink, LedgerStore};
