//! Core value types shared across the simulation engine.

use std::fmt;

/// Identifier marking which allocation owns an arena cell.
///
/// Tags are derived cyclically from the tick index, so at most ten
/// distinct tags exist at any time. A tag renders as its decimal digit
/// in presenter output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AllocTag(u8);

impl AllocTag {
    /// Number of distinct tags before the cycle wraps.
    pub const CYCLE: usize = 10;

    /// Create a tag from a raw digit value.
    ///
    /// Values are taken modulo [`Self::CYCLE`].
    #[must_use]
    pub fn new(value: u8) -> Self {
        Self(value % Self::CYCLE as u8)
    }

    /// Derive the tag for a given tick index.
    #[must_use]
    pub fn from_tick(tick: usize) -> Self {
        Self((tick % Self::CYCLE) as u8)
    }

    /// Get the raw digit value (0-9).
    #[must_use]
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for AllocTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// State of a single arena cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    /// The cell belongs to no allocation.
    Free,
    /// The cell belongs to the allocation with the given tag.
    Occupied(AllocTag),
}

impl Cell {
    /// Whether the cell is free.
    #[must_use]
    pub fn is_free(&self) -> bool {
        matches!(self, Self::Free)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Free => write!(f, "_"),
            Self::Occupied(tag) => write!(f, "{tag}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_cycle_every_ten_ticks() {
        assert_eq!(AllocTag::from_tick(1), AllocTag::new(1));
        assert_eq!(AllocTag::from_tick(10), AllocTag::new(0));
        assert_eq!(AllocTag::from_tick(23), AllocTag::new(3));
    }

    #[test]
    fn cell_display() {
        assert_eq!(Cell::Free.to_string(), "_");
        assert_eq!(Cell::Occupied(AllocTag::new(7)).to_string(), "7");
    }
}
