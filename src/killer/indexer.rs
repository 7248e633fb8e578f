#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The bijection between grid placements and propositional variables.
//!
//! The proposition "cell `(row, col)` holds `digit`" is numbered
//!
//! ```text
//! id = row * n^2 + col * n + digit
//! ```
//!
//! a mixed-radix number with the digit (1-based) as its least significant
//! place. Ids therefore run over exactly `1..=n^3` and `0` stays free for the
//! DIMACS clause terminator. Decoding undoes the 1-based shift first:
//! `id - 1 = row * n^2 + col * n + (digit - 1)`.

use crate::killer::error::PuzzleError;
use crate::sat::literal::{Literal, Variable};

/// Side length of the grid, validated so that every id fits a signed 32-bit
/// DIMACS literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridSize(usize);

impl GridSize {
    /// Validates a side length.
    ///
    /// # Errors
    ///
    /// [`PuzzleError::ZeroGridSize`] for `0` and [`PuzzleError::GridTooLarge`]
    /// when `size^3` exceeds `i32::MAX`.
    pub fn new(size: usize) -> Result<Self, PuzzleError> {
        if size == 0 {
            return Err(PuzzleError::ZeroGridSize);
        }
        let fits = size
            .checked_pow(3)
            .is_some_and(|cube| i32::try_from(cube).is_ok());
        if !fits {
            return Err(PuzzleError::GridTooLarge { size });
        }
        Ok(Self(size))
    }

    /// The side length `n`.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }

    /// Side length of a box, when the grid size is a perfect square.
    #[must_use]
    pub const fn box_size(self) -> Option<usize> {
        let root = self.0.isqrt();
        if root * root == self.0 { Some(root) } else { None }
    }

    /// Total number of propositional variables, `n^3`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn num_vars(self) -> Variable {
        (self.0 * self.0 * self.0) as Variable
    }

    /// The digits `1..=n`.
    pub fn digits(self) -> impl Iterator<Item = usize> + Clone {
        1..=self.0
    }

    /// Every cell in row-major order.
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        let n = self.0;
        (0..n).flat_map(move |row| (0..n).map(move |col| Cell::new(row, col)))
    }

    /// Whether `cell` lies inside the grid.
    #[must_use]
    pub const fn contains(self, cell: Cell) -> bool {
        cell.row < self.0 && cell.col < self.0
    }
}

impl TryFrom<usize> for GridSize {
    type Error = PuzzleError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<GridSize> for usize {
    fn from(size: GridSize) -> Self {
        size.0
    }
}

/// A grid position, 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    /// Row index.
    pub row: usize,
    /// Column index.
    pub col: usize,
}

impl Cell {
    /// Creates a cell at `(row, col)`.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

/// The proposition "`cell` holds `digit`".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Placement {
    /// Row index, 0-based.
    pub row: usize,
    /// Column index, 0-based.
    pub col: usize,
    /// Digit, 1-based.
    pub digit: usize,
}

impl Placement {
    /// Creates the placement of `digit` at `(row, col)`.
    #[must_use]
    pub const fn new(row: usize, col: usize, digit: usize) -> Self {
        Self { row, col, digit }
    }

    /// Creates the placement of `digit` in `cell`.
    #[must_use]
    pub const fn at(cell: Cell, digit: usize) -> Self {
        Self::new(cell.row, cell.col, digit)
    }

    /// The cell this placement fills.
    #[must_use]
    pub const fn cell(self) -> Cell {
        Cell::new(self.row, self.col)
    }

    /// The variable id of this placement.
    ///
    /// Requires `row, col < n` and `1 <= digit <= n`; anything else is a
    /// caller bug and is only checked in debug builds.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn encode(self, size: GridSize) -> Variable {
        let n = size.get();
        debug_assert!(self.row < n && self.col < n, "cell outside the grid: {self:?}");
        debug_assert!((1..=n).contains(&self.digit), "digit outside 1..={n}: {self:?}");

        (self.row * n * n + self.col * n + self.digit) as Variable
    }

    /// Inverse of [`Placement::encode`]. `None` for `0` and for ids above
    /// `n^3`.
    #[must_use]
    pub fn decode(var: Variable, size: GridSize) -> Option<Self> {
        if var == 0 || var > size.num_vars() {
            return None;
        }
        let n = size.get();
        let index = var as usize - 1;

        Some(Self {
            row: index / (n * n),
            col: (index / n) % n,
            digit: index % n + 1,
        })
    }

    /// The positive literal asserting this placement.
    #[must_use]
    pub fn literal(self, size: GridSize) -> Literal {
        Literal::positive(self.encode(size))
    }
}
