// src/error.rs
//! Unified error type for the simulation core.
//!
//! Every error here is a synchronous precondition violation raised to the
//! caller (bad seed data, unknown subject, unknown scenario, malformed
//! device frame). The core performs no I/O of its own, so no transport or
//! timeout error classes exist.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type SimResult<T> = Result<T, SimError>;

/// Errors raised by the simulation core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// Seed or runtime configuration rejected during validation.
    #[error("invalid configuration for '{field}': {reason}")]
    Configuration {
        /// Offending field or parameter name.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A subject id that is not present in the patient-state store.
    #[error("unknown subject '{subject_id}'")]
    SubjectNotFound {
        /// The id that failed to resolve.
        subject_id: String,
    },

    /// A scenario name outside the preset set.
    #[error("unknown scenario '{name}'")]
    UnknownScenario {
        /// The rejected scenario name.
        name: String,
    },

    /// A device line that does not match the expected frame format.
    #[error("unparseable device frame '{line}'")]
    InvalidFrame {
        /// The raw line that failed to parse.
        line: String,
    },
}

impl SimError {
    pub(crate) fn configuration(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Configuration {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
