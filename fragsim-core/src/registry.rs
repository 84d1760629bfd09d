//! Registry of live allocations, supporting random victim selection.

use crate::rng::WorkloadRng;
use crate::types::AllocTag;

/// Dense insertion-order sequence of currently live allocation tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllocationRegistry {
    tags: Vec<AllocTag>,
}

impl AllocationRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live allocations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Whether no allocation is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Read-only view of the live tags in insertion order.
    #[must_use]
    pub fn tags(&self) -> &[AllocTag] {
        &self.tags
    }

    /// Record a newly live allocation.
    pub fn record(&mut self, tag: AllocTag) {
        self.tags.push(tag);
    }

    /// Select and remove one live tag to free.
    ///
    /// The selection range is `len - 1`: while more than one allocation
    /// is live, the most recently recorded one is never picked. This
    /// matches the observed reference behavior and is kept as-is.
    /// Returns `None` on an empty registry.
    pub fn pick(&mut self, rng: &dyn WorkloadRng) -> Option<AllocTag> {
        if self.tags.is_empty() {
            return None;
        }

        let range = self.tags.len() - 1;
        let index = if range == 0 { 0 } else { rng.pick_index(range) };
        Some(self.tags.remove(index))
    }
}
