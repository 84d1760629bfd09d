//! The simulated heap: a fixed-length sequence of tagged cells.

use crate::types::{AllocTag, Cell};

/// Fixed-capacity simulated heap.
///
/// Each cell is either free or tagged with the identifier of the
/// allocation occupying it. The arena never grows or shrinks after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arena {
    cells: Vec<Cell>,
}

impl Arena {
    /// Create an arena of `heap_size` free cells.
    #[must_use]
    pub fn new(heap_size: usize) -> Self {
        Self {
            cells: vec![Cell::Free; heap_size],
        }
    }

    /// Total capacity in cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the arena has zero capacity.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Read-only view of the cells.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of currently free cells.
    #[must_use]
    pub fn free_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.is_free()).count()
    }

    /// Tag every cell in `[start, start + len)` with `tag`.
    ///
    /// # Panics
    /// Panics if the range extends past the arena end. Callers derive
    /// the range from a free chunk, which is bounds-checked on insert.
    pub fn occupy(&mut self, start: usize, len: usize, tag: AllocTag) {
        for cell in &mut self.cells[start..start + len] {
            *cell = Cell::Occupied(tag);
        }
    }

    /// Clear the first maximal contiguous run tagged `tag` and return
    /// its bounds.
    ///
    /// The scan stops once a matched run ends, so a tag that somehow
    /// occupies several disjoint runs releases only the lowest one.
    /// Returns `None` when no cell carries the tag (stale target); the
    /// arena is left untouched in that case.
    pub fn release_run(&mut self, tag: AllocTag) -> Option<(usize, usize)> {
        let mut run_start = None;
        let mut run_len = 0;

        for i in 0..self.cells.len() {
            match self.cells[i] {
                Cell::Occupied(t) if t == tag => {
                    if run_start.is_none() {
                        run_start = Some(i);
                    }
                    self.cells[i] = Cell::Free;
                    run_len += 1;
                }
                _ if run_start.is_some() => break,
                _ => {}
            }
        }

        run_start.map(|start| (start, run_len))
    }
}
