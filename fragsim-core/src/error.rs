//! Error types for the simulation engine.
//!
//! Errors carry the context needed to report them without access to the
//! engine state that produced them.

use thiserror::Error;

/// The main error type for simulation operations.
#[derive(Error, Debug)]
pub enum SimError {
    /// A configuration value is out of range or malformed.
    ///
    /// Raised by [`crate::config::SimConfig::validate`] before any
    /// engine state is constructed.
    #[error("E001: Invalid configuration '{field}': {cause}")]
    ConfigValue {
        /// The configuration field with the invalid value.
        field: &'static str,
        /// Description of why the value is invalid.
        cause: String,
    },

    /// No free chunk is large enough for the requested allocation.
    ///
    /// Terminal for the run, not a crash: the runner halts in an
    /// orderly fashion and reports final statistics.
    #[error("E002: Out of memory: no free chunk of at least {requested} cells")]
    OutOfMemory {
        /// The allocation size that could not be satisfied.
        requested: usize,
    },

    /// An allocation of zero cells was requested.
    #[error("E003: Invalid allocation request of size 0")]
    InvalidRequest,

    /// A free was requested while no allocation is live.
    ///
    /// This is a workload driver contract violation and is treated as a
    /// fatal internal error.
    #[error("E004: Free requested with an empty allocation registry")]
    EmptyRegistry,
}

impl SimError {
    /// Get the error code (e.g., "E002").
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigValue { .. } => "E001",
            Self::OutOfMemory { .. } => "E002",
            Self::InvalidRequest => "E003",
            Self::EmptyRegistry => "E004",
        }
    }

    /// Whether this error halts the run in an orderly fashion rather
    /// than aborting the process.
    #[must_use]
    pub fn is_terminal_halt(&self) -> bool {
        matches!(self, Self::OutOfMemory { .. })
    }
}

/// Result type alias using [`SimError`].
pub type Result<T> = std::result::Result<T, SimError>;
