//! Simulation configuration.
//!
//! A `SimConfig` is built once at startup, validated, and then passed
//! by value into the runner; nothing reads configuration from global
//! state after that point.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Seed selection for the workload RNG.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeedMode {
    /// Seed from the current time; every run differs.
    #[default]
    Time,
    /// Fixed seed 1234 for a reproducible sequence.
    FixedA,
    /// Fixed seed 5678 for a second, distinct reproducible sequence.
    FixedB,
}

impl SeedMode {
    /// The fixed seed value, if this mode is reproducible.
    #[must_use]
    pub fn fixed_seed(&self) -> Option<u64> {
        match self {
            Self::Time => None,
            Self::FixedA => Some(1234),
            Self::FixedB => Some(5678),
        }
    }
}

/// Immutable run configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Number of ticks to execute; `None` runs until halted by
    /// exhaustion or cancellation.
    pub epochs: Option<u64>,
    /// Largest allocation request a single tick may draw.
    pub max_request: usize,
    /// Arena capacity in cells.
    pub heap_size: usize,
    /// Probability that a tick frees instead of allocating.
    pub free_prob: f64,
    /// Seed selection for the workload RNG.
    pub seed: SeedMode,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            epochs: Some(100),
            max_request: 10,
            heap_size: 100,
            free_prob: 0.3,
            seed: SeedMode::default(),
        }
    }
}

impl SimConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the epoch limit; `None` means unlimited.
    #[must_use]
    pub fn with_epochs(mut self, epochs: Option<u64>) -> Self {
        self.epochs = epochs;
        self
    }

    /// Set the maximum request size.
    #[must_use]
    pub fn with_max_request(mut self, max_request: usize) -> Self {
        self.max_request = max_request;
        self
    }

    /// Set the arena capacity.
    #[must_use]
    pub fn with_heap_size(mut self, heap_size: usize) -> Self {
        self.heap_size = heap_size;
        self
    }

    /// Set the free probability.
    #[must_use]
    pub fn with_free_prob(mut self, free_prob: f64) -> Self {
        self.free_prob = free_prob;
        self
    }

    /// Set the seed mode.
    #[must_use]
    pub fn with_seed(mut self, seed: SeedMode) -> Self {
        self.seed = seed;
        self
    }

    /// Validate all values before any engine state is constructed.
    ///
    /// # Errors
    /// Returns [`SimError::ConfigValue`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if self.heap_size == 0 {
            return Err(SimError::ConfigValue {
                field: "heap_size",
                cause: "must be positive".to_string(),
            });
        }
        if self.max_request == 0 {
            return Err(SimError::ConfigValue {
                field: "max_request",
                cause: "must be at least 1; no request size is legal otherwise".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.free_prob) {
            return Err(SimError::ConfigValue {
                field: "free_prob",
                cause: format!("must be within [0.0, 1.0], got {}", self.free_prob),
            });
        }
        Ok(())
    }
}
