//! Cross-registry integration scenarios.

pub mod broker_flows;
pub mod lifecycle;
