//! The run loop: drives the engine one action per tick until halted.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;

use crate::config::SimConfig;
use crate::engine::{AllocatorEngine, TickSnapshot};
use crate::error::{Result, SimError};
use crate::rng::{SimRng, WorkloadRng};
use crate::stats::ExecutionReport;
use crate::types::AllocTag;
use crate::workload::{Action, RandomDriver, WorkloadDriver};

/// Cooperative cancellation flag, checked once per tick boundary.
///
/// Cloning shares the underlying flag, so a signal handler can cancel a
/// run owned by another thread.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token in the not-cancelled state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HaltReason {
    /// An allocation found no fitting free chunk.
    Exhausted,
    /// The configured epoch limit was reached.
    EpochLimit,
    /// Cancellation was requested between ticks.
    Cancelled,
}

/// Final outcome of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    /// Why the run stopped.
    pub halt: HaltReason,
    /// Number of ticks fully executed.
    pub ticks: usize,
    /// Final statistics snapshot.
    pub report: ExecutionReport,
}

/// Observer of per-tick engine state.
pub trait Presenter {
    /// Called after each completed tick with a read-only snapshot.
    fn on_tick(&mut self, snapshot: &TickSnapshot<'_>);
}

/// Presenter that discards every snapshot.
#[derive(Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn on_tick(&mut self, _snapshot: &TickSnapshot<'_>) {}
}

/// Single-stepped simulation loop over an [`AllocatorEngine`].
pub struct SimulationRunner {
    engine: AllocatorEngine,
    driver: Box<dyn WorkloadDriver + Send>,
    rng: Box<dyn WorkloadRng>,
    epochs: Option<u64>,
    cancel: CancelToken,
}

impl SimulationRunner {
    /// Build a runner from a validated configuration.
    ///
    /// The driver and RNG are the defaults implied by the
    /// configuration; use [`Self::with_driver`] or [`Self::with_rng`]
    /// to substitute either.
    #[must_use]
    pub fn from_config(config: &SimConfig, cancel: CancelToken) -> Self {
        Self {
            engine: AllocatorEngine::new(config.heap_size),
            driver: Box::new(RandomDriver::new(config.free_prob, config.max_request)),
            rng: Box::new(SimRng::from_mode(config.seed)),
            epochs: config.epochs,
            cancel,
        }
    }

    /// Replace the workload driver.
    #[must_use]
    pub fn with_driver(mut self, driver: Box<dyn WorkloadDriver + Send>) -> Self {
        self.driver = driver;
        self
    }

    /// Replace the random source.
    #[must_use]
    pub fn with_rng(mut self, rng: Box<dyn WorkloadRng>) -> Self {
        self.rng = rng;
        self
    }

    /// Run the simulation to completion.
    ///
    /// Each tick checks cancellation and the epoch limit, then applies
    /// exactly one action and presents the resulting snapshot. Memory
    /// exhaustion halts the run in an orderly fashion; it is an outcome,
    /// not an error.
    ///
    /// # Errors
    /// Only driver contract violations surface here
    /// ([`SimError::EmptyRegistry`]); all other conditions map to a
    /// [`HaltReason`].
    pub fn run(mut self, presenter: &mut dyn Presenter) -> Result<RunOutcome> {
        let mut tick: usize = 1;

        let halt = loop {
            if self.cancel.is_cancelled() {
                tracing::info!(tick, "cancellation requested, halting");
                break HaltReason::Cancelled;
            }
            if let Some(limit) = self.epochs {
                if tick as u64 > limit {
                    break HaltReason::EpochLimit;
                }
            }

            let action = self
                .driver
                .next_action(self.rng.as_ref(), self.engine.live_allocations());

            match action {
                Action::Allocate { size } => {
                    let tag = AllocTag::from_tick(tick);
                    match self.engine.allocate(tag, size) {
                        Ok(_) => {}
                        Err(SimError::OutOfMemory { requested }) => {
                            tracing::info!(requested, tick, "heap exhausted, halting");
                            break HaltReason::Exhausted;
                        }
                        Err(err) => return Err(err),
                    }
                }
                Action::Free => {
                    let victim = self.engine.pick_victim(self.rng.as_ref())?;
                    let freed = self.engine.free(victim);
                    if freed == 0 {
                        tracing::warn!(tick, %victim, "free released nothing");
                    }
                }
            }

            presenter.on_tick(&self.engine.snapshot(tick, action));
            tick += 1;
        };

        Ok(RunOutcome {
            halt,
            ticks: tick - 1,
            report: self.engine.finish(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SeedMode;

    fn config() -> SimConfig {
        SimConfig::new()
            .with_heap_size(50)
            .with_max_request(8)
            .with_free_prob(0.3)
            .with_epochs(Some(40))
            .with_seed(SeedMode::FixedA)
    }

    #[test]
    fn epoch_limit_halts_run() {
        let runner = SimulationRunner::from_config(
            &config().with_free_prob(0.9).with_heap_size(500),
            CancelToken::new(),
        );
        let outcome = runner.run(&mut NullPresenter).unwrap();

        assert_eq!(outcome.halt, HaltReason::EpochLimit);
        assert_eq!(outcome.ticks, 40);
    }

    #[test]
    fn exhaustion_halts_run() {
        // Never free: a small heap must run out.
        let cfg = config()
            .with_free_prob(0.0)
            .with_heap_size(20)
            .with_epochs(None);
        let runner = SimulationRunner::from_config(&cfg, CancelToken::new());
        let outcome = runner.run(&mut NullPresenter).unwrap();

        assert_eq!(outcome.halt, HaltReason::Exhausted);
        assert!(outcome.report.sum_allocations <= 20);
    }

    #[test]
    fn pre_cancelled_token_halts_before_first_tick() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let runner = SimulationRunner::from_config(&config(), cancel);
        let outcome = runner.run(&mut NullPresenter).unwrap();

        assert_eq!(outcome.halt, HaltReason::Cancelled);
        assert_eq!(outcome.ticks, 0);
        assert_eq!(outcome.report.num_allocations, 0);
    }

    #[test]
    fn fixed_seed_runs_are_reproducible() {
        let a = SimulationRunner::from_config(&config(), CancelToken::new())
            .run(&mut NullPresenter)
            .unwrap();
        let b = SimulationRunner::from_config(&config(), CancelToken::new())
            .run(&mut NullPresenter)
            .unwrap();

        assert_eq!(a.halt, b.halt);
        assert_eq!(a.ticks, b.ticks);
        assert_eq!(a.report, b.report);
    }

    #[test]
    fn presenter_sees_every_tick() {
        struct Counting(usize);
        impl Presenter for Counting {
            fn on_tick(&mut self, snapshot: &TickSnapshot<'_>) {
                self.0 += 1;
                assert_eq!(snapshot.tick, self.0);
            }
        }

        let mut presenter = Counting(0);
        let outcome = SimulationRunner::from_config(
            &config().with_epochs(Some(10)).with_heap_size(500),
            CancelToken::new(),
        )
        .run(&mut presenter)
        .unwrap();

        assert_eq!(presenter.0, outcome.ticks);
    }
}
