//! The free-chunk table: explicit tracking of free arena regions.
//!
//! Entries are kept in insertion order, never sorted by address, and
//! address-adjacent chunks are never merged. Fragmentation behavior
//! depends on exactly this discipline, so none of it is an oversight.

/// One free region of the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreeChunk {
    /// First cell of the region.
    pub start: usize,
    /// Length of the region in cells; always positive.
    pub size: usize,
}

/// Ordered sequence of currently known free chunks.
///
/// The order is storage order: allocation remainders are appended at
/// the end, freed runs are inserted at the front. First-fit scans this
/// order, not address order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeChunkTable {
    chunks: Vec<FreeChunk>,
}

impl FreeChunkTable {
    /// Create a table with a single chunk spanning the whole arena.
    #[must_use]
    pub fn new(heap_size: usize) -> Self {
        Self {
            chunks: vec![FreeChunk {
                start: 0,
                size: heap_size,
            }],
        }
    }

    /// Number of tracked chunks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether no free chunk is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Read-only view of the chunks in storage order.
    #[must_use]
    pub fn chunks(&self) -> &[FreeChunk] {
        &self.chunks
    }

    /// Sum of all tracked chunk sizes.
    #[must_use]
    pub fn total_free(&self) -> usize {
        self.chunks.iter().map(|c| c.size).sum()
    }

    /// Highest address at which a free region begins.
    ///
    /// `None` when the table is empty; callers must not assume a tail
    /// exists.
    #[must_use]
    pub fn highest_start(&self) -> Option<usize> {
        self.chunks.iter().map(|c| c.start).max()
    }

    /// Index of the first chunk large enough for `size`, in storage
    /// order.
    #[must_use]
    pub fn first_fit(&self, size: usize) -> Option<usize> {
        self.chunks.iter().position(|c| c.size >= size)
    }

    /// Split the chunk at `index` for an allocation of `size` cells and
    /// return the allocation's start address.
    ///
    /// The remainder, if any, is appended at the end of the table; the
    /// matched entry is removed and later entries shift left. The
    /// remainder is never written back in place.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds or the chunk is smaller than
    /// `size`; both are excluded by a preceding [`Self::first_fit`].
    pub fn split_at(&mut self, index: usize, size: usize) -> usize {
        let chunk = self.chunks[index];
        assert!(chunk.size >= size, "split larger than chunk");

        let remainder = chunk.size - size;
        if remainder > 0 {
            self.chunks.push(FreeChunk {
                start: chunk.start + size,
                size: remainder,
            });
        }
        self.chunks.remove(index);

        chunk.start
    }

    /// Insert a chunk at the front of the table, shifting all existing
    /// entries right.
    ///
    /// Adjacency with existing chunks is deliberately not checked; two
    /// entries may describe abutting ranges.
    pub fn push_front(&mut self, chunk: FreeChunk) {
        debug_assert!(chunk.size > 0, "zero-size free chunk");
        self.chunks.insert(0, chunk);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_table_spans_arena() {
        let table = FreeChunkTable::new(64);
        assert_eq!(table.chunks(), &[FreeChunk { start: 0, size: 64 }]);
        assert_eq!(table.total_free(), 64);
    }

    #[test]
    fn first_fit_scans_storage_order() {
        let mut table = FreeChunkTable::new(10);
        table.split_at(0, 10);
        table.push_front(FreeChunk { start: 8, size: 2 });
        table.push_front(FreeChunk { start: 0, size: 5 });

        // Storage order is [{0,5}, {8,2}]; a request of 2 matches the
        // first entry even though the second fits exactly.
        assert_eq!(table.first_fit(2), Some(0));
        assert_eq!(table.first_fit(5), Some(0));
        assert_eq!(table.first_fit(6), None);
    }

    #[test]
    fn split_appends_remainder_at_end() {
        let mut table = FreeChunkTable::new(10);
        table.push_front(FreeChunk { start: 90, size: 4 });

        // Table is [{90,4}, {0,10}]; split the second entry.
        let start = table.split_at(1, 3);
        assert_eq!(start, 0);
        assert_eq!(
            table.chunks(),
            &[
                FreeChunk { start: 90, size: 4 },
                FreeChunk { start: 3, size: 7 },
            ]
        );
    }

    #[test]
    fn exact_fit_leaves_no_remainder() {
        let mut table = FreeChunkTable::new(10);
        let start = table.split_at(0, 10);
        assert_eq!(start, 0);
        assert!(table.is_empty());
        assert_eq!(table.highest_start(), None);
    }

    #[test]
    fn push_front_does_not_merge_adjacent() {
        let mut table = FreeChunkTable::new(10);
        table.split_at(0, 4);
        // Freed run [0,4) abuts the remainder chunk {4,6}; both stay
        // separate entries.
        table.push_front(FreeChunk { start: 0, size: 4 });
        assert_eq!(
            table.chunks(),
            &[
                FreeChunk { start: 0, size: 4 },
                FreeChunk { start: 4, size: 6 },
            ]
        );
    }

    #[test]
    fn highest_start_is_max_over_entries() {
        let mut table = FreeChunkTable::new(10);
        table.split_at(0, 4);
        table.push_front(FreeChunk { start: 0, size: 2 });
        assert_eq!(table.highest_start(), Some(4));
    }
}
