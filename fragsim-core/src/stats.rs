//! Running counters and post-run fragmentation metrics.

use serde::Serialize;

use crate::free_table::FreeChunkTable;

/// Monotonic counters updated as the engine allocates and frees.
///
/// Owned by the engine; there is no global stats state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsAccumulator {
    /// Total cells handed out by successful allocations.
    pub sum_allocations: usize,
    /// Number of successful allocations.
    pub num_allocations: usize,
    /// Total cells returned by frees.
    pub sum_frees: usize,
    /// Number of free operations, stale targets included.
    pub num_frees: usize,
}

impl StatsAccumulator {
    /// Record a successful allocation of `size` cells.
    pub fn record_allocation(&mut self, size: usize) {
        self.num_allocations += 1;
        self.sum_allocations += size;
    }

    /// Record a free that returned `size` cells (possibly zero).
    pub fn record_free(&mut self, size: usize) {
        self.num_frees += 1;
        self.sum_frees += size;
    }
}

/// Final statistics snapshot, derived once after the run halts.
///
/// The derived fields are `None` when undefined: `free_tail_start`
/// requires a non-empty free table, and the percentage additionally
/// requires the tail to start past address zero.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ExecutionReport {
    /// Total cells handed out by successful allocations.
    pub sum_allocations: usize,
    /// Number of successful allocations.
    pub num_allocations: usize,
    /// Total cells returned by frees.
    pub sum_frees: usize,
    /// Number of free operations.
    pub num_frees: usize,
    /// Highest address at which a free region begins.
    pub free_tail_start: Option<usize>,
    /// Free cells within the active area (the arena prefix below the
    /// tail).
    pub active_area_free_slots: Option<usize>,
    /// Fraction of the active area that is free.
    pub percent_free_in_active_area: Option<f64>,
}

impl ExecutionReport {
    /// Derive the final report from the counters and the free table's
    /// end-of-run state.
    ///
    /// The active-area sum excludes entries whose size equals
    /// `heap_size - free_tail_start`. The exclusion is by size
    /// equality, not identity, so an unrelated chunk sharing the tail
    /// chunk's size is excluded too; this mirrors the reference
    /// derivation and is kept as-is.
    #[must_use]
    pub fn derive(counters: StatsAccumulator, table: &FreeChunkTable, heap_size: usize) -> Self {
        let free_tail_start = table.highest_start();

        let active_area_free_slots = free_tail_start.map(|tail| {
            let exclude = heap_size - tail;
            table
                .chunks()
                .iter()
                .filter(|c| c.size != exclude)
                .map(|c| c.size)
                .sum::<usize>()
        });

        let percent_free_in_active_area = match (free_tail_start, active_area_free_slots) {
            (Some(tail), Some(active)) if tail > 0 => Some(active as f64 / tail as f64),
            _ => None,
        };

        Self {
            sum_allocations: counters.sum_allocations,
            num_allocations: counters.num_allocations,
            sum_frees: counters.sum_frees,
            num_frees: counters.num_frees,
            free_tail_start,
            active_area_free_slots,
            percent_free_in_active_area,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::free_table::FreeChunk;

    #[test]
    fn counters_accumulate() {
        let mut stats = StatsAccumulator::default();
        stats.record_allocation(5);
        stats.record_allocation(3);
        stats.record_free(5);
        stats.record_free(0);

        assert_eq!(stats.sum_allocations, 8);
        assert_eq!(stats.num_allocations, 2);
        assert_eq!(stats.sum_frees, 5);
        assert_eq!(stats.num_frees, 2);
    }

    #[test]
    fn derive_excludes_tail_chunk_by_size() {
        // Heap of 10 with chunks [{0,4}, {7,3}]: the tail starts at 7,
        // the tail-sized exclusion is 10 - 7 = 3, so only {0,4} counts.
        let mut table = FreeChunkTable::new(10);
        table.split_at(0, 10);
        table.push_front(FreeChunk { start: 7, size: 3 });
        table.push_front(FreeChunk { start: 0, size: 4 });

        let report = ExecutionReport::derive(StatsAccumulator::default(), &table, 10);
        assert_eq!(report.free_tail_start, Some(7));
        assert_eq!(report.active_area_free_slots, Some(4));
        let pct = report.percent_free_in_active_area.unwrap();
        assert!((pct - 4.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn derive_with_empty_table_is_undefined() {
        let mut table = FreeChunkTable::new(10);
        table.split_at(0, 10);

        let report = ExecutionReport::derive(StatsAccumulator::default(), &table, 10);
        assert_eq!(report.free_tail_start, None);
        assert_eq!(report.active_area_free_slots, None);
        assert_eq!(report.percent_free_in_active_area, None);
    }

    #[test]
    fn derive_with_tail_at_zero_has_no_percentage() {
        let table = FreeChunkTable::new(10);
        let report = ExecutionReport::derive(StatsAccumulator::default(), &table, 10);
        assert_eq!(report.free_tail_start, Some(0));
        // The sole chunk is the tail, so nothing counts as active-area
        // free space, and the ratio over a zero-length prefix is
        // undefined.
        assert_eq!(report.active_area_free_slots, Some(0));
        assert_eq!(report.percent_free_in_active_area, None);
    }

    #[test]
    fn size_equality_exclusion_can_drop_unrelated_chunk() {
        // Two chunks share the tail chunk's size; both are excluded.
        let mut table = FreeChunkTable::new(10);
        table.split_at(0, 10);
        table.push_front(FreeChunk { start: 7, size: 3 });
        table.push_front(FreeChunk { start: 0, size: 3 });

        let report = ExecutionReport::derive(StatsAccumulator::default(), &table, 10);
        assert_eq!(report.active_area_free_slots, Some(0));
    }
}
