#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Killer cages: a target sum over a group of cells whose digits must all
//! differ.

use crate::killer::error::PuzzleError;
use crate::killer::indexer::{Cell, GridSize};
use rustc_hash::FxHashSet;

/// A target sum over cells whose digits must all differ.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cage {
    target: usize,
    cells: Vec<Cell>,
}

impl Cage {
    /// A cage over `cells`, in the order given. Nothing is checked until the
    /// cage is handed to a puzzle together with a grid size.
    pub fn new<C, I>(target: usize, cells: I) -> Self
    where
        C: Into<Cell>,
        I: IntoIterator<Item = C>,
    {
        Self {
            target,
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }

    /// The required sum.
    #[must_use]
    pub const fn target(&self) -> usize {
        self.target
    }

    /// The cells, in the order given.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the cage has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of digit tuples the encoder enumerates for this cage, `n^k`,
    /// saturating at `u64::MAX`.
    #[must_use]
    pub fn assignments(&self, size: GridSize) -> u64 {
        let n = size.get() as u64;
        u32::try_from(self.len())
            .ok()
            .and_then(|k| n.checked_pow(k))
            .unwrap_or(u64::MAX)
    }

    /// Smallest and largest sums reachable with distinct digits from
    /// `1..=n`, or `None` if the cage has more cells than there are digits.
    #[must_use]
    pub fn sum_range(&self, size: GridSize) -> Option<(usize, usize)> {
        let n = size.get();
        let k = self.len();
        if k > n {
            return None;
        }
        let min = k * (k + 1) / 2;
        let max = k * n - min + k;
        Some((min, max))
    }

    /// Structural checks, in order: non-empty, positive target, every cell on
    /// the grid, no repeated cell, enumeration within `limit`.
    pub(crate) fn validate(
        &self,
        index: usize,
        size: GridSize,
        limit: u64,
    ) -> Result<(), PuzzleError> {
        if self.is_empty() {
            return Err(PuzzleError::EmptyCage { cage: index });
        }
        if self.target == 0 {
            return Err(PuzzleError::ZeroTarget { cage: index });
        }

        let mut seen = FxHashSet::default();
        for &cell in &self.cells {
            if !size.contains(cell) {
                return Err(PuzzleError::CellOutOfBounds {
                    cage: index,
                    row: cell.row,
                    col: cell.col,
                    size: size.get(),
                });
            }
            if !seen.insert(cell) {
                return Err(PuzzleError::DuplicateCell {
                    cage: index,
                    row: cell.row,
                    col: cell.col,
                });
            }
        }

        let assignments = self.assignments(size);
        if assignments > limit {
            return Err(PuzzleError::CageTooLarge {
                cage: index,
                len: self.len(),
                assignments,
                limit,
            });
        }

        match self.sum_range(size) {
            Some((min, max)) if (min..=max).contains(&self.target) => {}
            Some((min, max)) => log::warn!(
                "cage {index} targets {} but its cells can only sum to {min}..={max}",
                self.target
            ),
            None => log::warn!(
                "cage {index} has {} cells but only {} distinct digits exist",
                self.len(),
                size.get()
            ),
        }
        Ok(())
    }
}
