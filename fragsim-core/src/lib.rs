//! Fragsim Core Library
//!
//! This crate simulates a heap under a synthetic allocation/free
//! workload, modeling a first-fit free-list allocator over a fixed-size
//! cell arena and deriving fragmentation statistics over time.
//!
//! # Key Components
//!
//! - **Arena**: the simulated fixed-size heap of tagged cells
//! - **FreeChunkTable**: insertion-ordered tracking of free regions,
//!   deliberately unsorted and unmerged
//! - **AllocatorEngine**: first-fit allocation, chunk splitting on
//!   allocate, front insertion on free
//! - **SimulationRunner**: the tick loop, halted by exhaustion, epoch
//!   limit, or cancellation
//!
//! # Example
//!
//! ```
//! use fragsim_core::config::{SeedMode, SimConfig};
//! use fragsim_core::runner::{CancelToken, NullPresenter, SimulationRunner};
//!
//! let config = SimConfig::new()
//!     .with_heap_size(100)
//!     .with_max_request(10)
//!     .with_free_prob(0.3)
//!     .with_epochs(Some(50))
//!     .with_seed(SeedMode::FixedA);
//! config.validate()?;
//!
//! let runner = SimulationRunner::from_config(&config, CancelToken::new());
//! let outcome = runner.run(&mut NullPresenter)?;
//! println!("halted after {} ticks: {:?}", outcome.ticks, outcome.halt);
//! # Ok::<(), fragsim_core::error::SimError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod arena;
pub mod config;
pub mod engine;
pub mod error;
pub mod free_table;
pub mod registry;
pub mod rng;
pub mod runner;
pub mod stats;
pub mod types;
pub mod workload;

// Re-export key types at crate root for convenience
pub use arena::Arena;
pub use config::{SeedMode, SimConfig};
pub use engine::{AllocatorEngine, Placement, TickSnapshot};
pub use error::{Result, SimError};
pub use free_table::{FreeChunk, FreeChunkTable};
pub use registry::AllocationRegistry;
pub use runner::{CancelToken, HaltReason, NullPresenter, Presenter, RunOutcome, SimulationRunner};
pub use stats::ExecutionReport;
pub use types::{AllocTag, Cell};
pub use workload::{Action, RandomDriver, WorkloadDriver};
