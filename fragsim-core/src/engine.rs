//! The allocator engine: first-fit allocation and freeing over the
//! arena, free-chunk table, and allocation registry.
//!
//! The engine exclusively owns all three structures for the run's
//! lifetime; collaborators observe them only through [`TickSnapshot`].

use crate::arena::Arena;
use crate::error::{Result, SimError};
use crate::free_table::{FreeChunk, FreeChunkTable};
use crate::registry::AllocationRegistry;
use crate::rng::WorkloadRng;
use crate::stats::{ExecutionReport, StatsAccumulator};
use crate::types::{AllocTag, Cell};
use crate::workload::Action;

/// Where an allocation landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// First cell of the allocation.
    pub start: usize,
    /// Allocation length in cells.
    pub size: usize,
}

/// Read-only per-tick view handed to presenters.
#[derive(Debug, Clone, Copy)]
pub struct TickSnapshot<'a> {
    /// Tick index, starting at 1.
    pub tick: usize,
    /// The action applied on this tick.
    pub action: Action,
    /// Arena contents after the action.
    pub cells: &'a [Cell],
    /// Free-chunk table in storage order.
    pub chunks: &'a [FreeChunk],
    /// Live allocation tags in insertion order.
    pub live_tags: &'a [AllocTag],
}

/// First-fit free-list allocator over a simulated arena.
#[derive(Debug)]
pub struct AllocatorEngine {
    arena: Arena,
    free_table: FreeChunkTable,
    registry: AllocationRegistry,
    stats: StatsAccumulator,
}

impl AllocatorEngine {
    /// Create an engine over a fresh arena of `heap_size` cells, with
    /// the free table holding one chunk spanning the whole arena.
    #[must_use]
    pub fn new(heap_size: usize) -> Self {
        Self {
            arena: Arena::new(heap_size),
            free_table: FreeChunkTable::new(heap_size),
            registry: AllocationRegistry::new(),
            stats: StatsAccumulator::default(),
        }
    }

    /// Allocate `size` cells under `tag`.
    ///
    /// Scans the free table in storage order and takes the leading
    /// `size` cells of the first chunk that fits. The remainder is
    /// appended at the table end; the matched entry is removed.
    ///
    /// # Errors
    /// [`SimError::InvalidRequest`] for a zero-size request;
    /// [`SimError::OutOfMemory`] when no chunk fits. Neither mutates
    /// any engine state.
    pub fn allocate(&mut self, tag: AllocTag, size: usize) -> Result<Placement> {
        if size == 0 {
            return Err(SimError::InvalidRequest);
        }

        let index = self
            .free_table
            .first_fit(size)
            .ok_or(SimError::OutOfMemory { requested: size })?;

        let start = self.free_table.split_at(index, size);
        self.arena.occupy(start, size, tag);
        self.registry.record(tag);
        self.stats.record_allocation(size);

        tracing::debug!(%tag, start, size, "allocated");
        Ok(Placement { start, size })
    }

    /// Free the allocation tagged `tag`, returning the freed cell
    /// count.
    ///
    /// A tag with no matching arena run is a stale target: the call
    /// returns 0 and mutates nothing beyond the free counter. Otherwise
    /// the run is cleared and a chunk covering it is inserted at the
    /// front of the free table, without merging into any neighbor.
    pub fn free(&mut self, tag: AllocTag) -> usize {
        match self.arena.release_run(tag) {
            Some((start, len)) => {
                self.free_table.push_front(FreeChunk { start, size: len });
                self.stats.record_free(len);
                tracing::debug!(%tag, start, len, "freed");
                len
            }
            None => {
                self.stats.record_free(0);
                tracing::warn!(%tag, "stale free target, nothing released");
                0
            }
        }
    }

    /// Select and remove a live tag for the next free.
    ///
    /// # Errors
    /// [`SimError::EmptyRegistry`] when nothing is live; the workload
    /// driver contract forbids requesting a free in that state.
    pub fn pick_victim(&mut self, rng: &dyn WorkloadRng) -> Result<AllocTag> {
        self.registry.pick(rng).ok_or(SimError::EmptyRegistry)
    }

    /// Number of live allocations.
    #[must_use]
    pub fn live_allocations(&self) -> usize {
        self.registry.len()
    }

    /// Read-only view of the arena.
    #[must_use]
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Read-only view of the free table.
    #[must_use]
    pub fn free_table(&self) -> &FreeChunkTable {
        &self.free_table
    }

    /// Build the read-only view for a completed tick.
    #[must_use]
    pub fn snapshot(&self, tick: usize, action: Action) -> TickSnapshot<'_> {
        TickSnapshot {
            tick,
            action,
            cells: self.arena.cells(),
            chunks: self.free_table.chunks(),
            live_tags: self.registry.tags(),
        }
    }

    /// Derive the final report from the engine's end-of-run state.
    #[must_use]
    pub fn finish(&self) -> ExecutionReport {
        ExecutionReport::derive(self.stats, &self.free_table, self.arena.len())
    }
}
