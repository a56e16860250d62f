//! # Error Types
//!
//! The single error taxonomy shared by every registry and the contract
//! surface. Callers branch on the kind (`NotFound` vs `AlreadyExists` vs
//! `Unauthorized`), so variants are part of the public contract.

use thiserror::Error;

/// Errors returned by registry and broker operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The entity failed its own validation before any write.
    #[error("{0}")]
    Validation(String),

    /// The requested ledger key is absent. Carries the composite key for
    /// diagnostics.
    #[error("{key} not found")]
    NotFound {
        /// The composite key that was looked up.
        key: String,
    },

    /// A duplicate request id or a second response for the same request.
    #[error("{0} already exists")]
    AlreadyExists(String),

    /// The caller's identity does not match the resource's owning device.
    #[error("{0}")]
    Unauthorized(String),

    /// The entity could not be serialized to its wire form.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// Ledger bytes could not be decoded into the expected entity.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// A namespace or key component broke the composite-key encoding rules.
    #[error("invalid composite key: {0}")]
    InvalidKey(String),

    /// The invoking credential could not be resolved to an identity.
    #[error("identity resolution failed: {0}")]
    Identity(String),

    /// Passthrough failure from the underlying key/value store. Fatal for
    /// the current invocation; retries belong to the platform.
    #[error("store error: {0}")]
    Store(String),
}

impl RegistryError {
    /// Returns true for the one error kind the broker is allowed to treat as
    /// an expected "absent optional" (a missing response on a live request).
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

// =============================================================================
// TESTS
// =============================================================================
