//! The synthetic workload: per-tick allocate/free decisions.

use crate::rng::WorkloadRng;

/// One step of the workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Allocate `size` cells.
    Allocate {
        /// Requested allocation size in cells.
        size: usize,
    },
    /// Free one randomly selected live allocation.
    Free,
}

impl Action {
    /// Single-character marker used in presenter output.
    #[must_use]
    pub fn marker(&self) -> char {
        match self {
            Self::Allocate { .. } => ' ',
            Self::Free => 'F',
        }
    }
}

/// Decides what the engine does on each tick.
pub trait WorkloadDriver {
    /// Choose the next action.
    ///
    /// `live_allocations` is the current registry population; a correct
    /// driver never returns [`Action::Free`] when it is zero.
    fn next_action(&mut self, rng: &dyn WorkloadRng, live_allocations: usize) -> Action;
}

/// Probabilistic driver: frees with probability `free_prob`, otherwise
/// allocates a size drawn uniformly from `[1, max_request]`.
///
/// With nothing live it always allocates, which also makes the first
/// action of every run an allocation.
#[derive(Debug, Clone)]
pub struct RandomDriver {
    free_prob: f64,
    max_request: usize,
}

impl RandomDriver {
    /// Create a driver with the given free probability and request
    /// bound.
    #[must_use]
    pub fn new(free_prob: f64, max_request: usize) -> Self {
        Self {
            free_prob,
            max_request,
        }
    }
}

impl WorkloadDriver for RandomDriver {
    fn next_action(&mut self, rng: &dyn WorkloadRng, live_allocations: usize) -> Action {
        if live_allocations > 0 && rng.decide(self.free_prob) {
            Action::Free
        } else {
            Action::Allocate {
                size: rng.pick_index(self.max_request) + 1,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimRng;

    #[test]
    fn empty_registry_forces_allocation() {
        let rng = SimRng::seeded(42);
        let mut driver = RandomDriver::new(1.0, 5);

        for _ in 0..20 {
            assert!(matches!(
                driver.next_action(&rng, 0),
                Action::Allocate { .. }
            ));
        }
    }

    #[test]
    fn free_prob_one_always_frees_when_live() {
        let rng = SimRng::seeded(42);
        let mut driver = RandomDriver::new(1.0, 5);

        for _ in 0..20 {
            assert_eq!(driver.next_action(&rng, 3), Action::Free);
        }
    }

    #[test]
    fn sizes_stay_within_request_bound() {
        let rng = SimRng::seeded(42);
        let mut driver = RandomDriver::new(0.0, 7);

        for _ in 0..100 {
            match driver.next_action(&rng, 1) {
                Action::Allocate { size } => assert!((1..=7).contains(&size)),
                Action::Free => panic!("free with free_prob 0.0"),
            }
        }
    }
}
