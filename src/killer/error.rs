#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Error types for encoding puzzles and decoding models.

use crate::sat::literal::Variable;

/// A puzzle definition the encoder refuses to translate.
///
/// All of these are detected before any clause is generated. `cage` is the
/// index of the offending cage in the order the cages were supplied.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PuzzleError {
    /// The grid has no cells.
    #[display("grid size must be positive")]
    ZeroGridSize,
    /// `n^3` does not fit in a DIMACS variable identifier.
    #[display("grid size {size} needs more than 2^31 - 1 variables")]
    GridTooLarge {
        /// The requested side length.
        size: usize,
    },
    /// Box constraints were requested but `n` is not a perfect square.
    #[display("grid size {size} has no integer square root, so it cannot be split into boxes")]
    NonSquareGrid {
        /// The requested side length.
        size: usize,
    },
    /// A cage lists no cells.
    #[display("cage {cage} has no cells")]
    EmptyCage {
        /// Index of the cage.
        cage: usize,
    },
    /// A cage's target is zero, which no digits in `1..=n` can reach.
    #[display("cage {cage} has a target sum of 0")]
    ZeroTarget {
        /// Index of the cage.
        cage: usize,
    },
    /// A cage cell lies outside the grid.
    #[display("cage {cage} references cell ({row}, {col}) outside the {size}x{size} grid")]
    CellOutOfBounds {
        /// Index of the cage.
        cage: usize,
        /// Row of the offending cell.
        row: usize,
        /// Column of the offending cell.
        col: usize,
        /// Side length of the grid.
        size: usize,
    },
    /// A cage lists the same cell twice.
    #[display("cage {cage} lists cell ({row}, {col}) more than once")]
    DuplicateCell {
        /// Index of the cage.
        cage: usize,
        /// Row of the repeated cell.
        row: usize,
        /// Column of the repeated cell.
        col: usize,
    },
    /// Enumerating the cage's `n^k` assignments exceeds the configured limit.
    #[display(
        "cage {cage} has {len} cells, giving {assignments} digit assignments to enumerate (limit {limit})"
    )]
    CageTooLarge {
        /// Index of the cage.
        cage: usize,
        /// Number of cells in the cage.
        len: usize,
        /// `n^len`, saturating.
        assignments: u64,
        /// The configured bound.
        limit: u64,
    },
}

/// A model that does not describe a well-formed grid.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum DecodeError {
    /// A true variable lies beyond `n^3`.
    #[display("model sets variable {variable}, but the grid only has {max}")]
    VariableOutOfRange {
        /// The offending variable.
        variable: Variable,
        /// The largest variable of the grid.
        max: Variable,
    },
    /// Two digits are true in one cell.
    #[display("cell ({row}, {col}) is assigned both {first} and {second}")]
    ConflictingDigits {
        /// Row of the cell.
        row: usize,
        /// Column of the cell.
        col: usize,
        /// The digit seen first.
        first: usize,
        /// The digit that collided with it.
        second: usize,
    },
    /// No digit is true in a cell.
    #[display("cell ({row}, {col}) is assigned no digit")]
    MissingDigit {
        /// Row of the cell.
        row: usize,
        /// Column of the cell.
        col: usize,
    },
    /// The grid is complete but fails the puzzle it was decoded for.
    #[display("decoded grid breaks a sudoku or cage rule")]
    RuleViolation,
}

/// Failure anywhere in the encode, solve, decode pipeline.
#[derive(Debug, derive_more::Display, derive_more::From)]
pub enum SolveError {
    /// The puzzle was rejected before encoding.
    #[display("invalid puzzle: {_0}")]
    Puzzle(#[from] PuzzleError),
    /// The oracle itself failed.
    #[display("oracle failed: {_0}")]
    Oracle(Box<dyn std::error::Error + Send + Sync>),
    /// The oracle's model could not be decoded.
    #[display("malformed model: {_0}")]
    Decode(#[from] DecodeError),
}

impl std::error::Error for SolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Puzzle(err) => Some(err),
            Self::Oracle(err) => Some(err.as_ref()),
            Self::Decode(err) => Some(err),
        }
    }
}
