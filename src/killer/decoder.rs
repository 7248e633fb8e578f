#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Turning a solver's model back into a grid.

use crate::killer::error::DecodeError;
use crate::killer::grid::Grid;
use crate::killer::indexer::{GridSize, Placement};
use crate::sat::solver::{SolveOutcome, Solutions};

/// The result of decoding an oracle's answer. An unsatisfiable puzzle is its
/// own outcome, never an all-zero grid.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum Decoded {
    /// The model's grid.
    Solved(Grid),
    /// The oracle proved the puzzle has no solution.
    Unsatisfiable,
}

impl Decoded {
    /// The grid, if one was decoded.
    #[must_use]
    pub const fn grid(&self) -> Option<&Grid> {
        match self {
            Self::Solved(grid) => Some(grid),
            Self::Unsatisfiable => None,
        }
    }
}

/// Builds the grid described by `solutions`.
///
/// Each true variable is mapped back to its placement. A well-formed model
/// sets exactly one digit per cell, so two different digits in one cell, an
/// empty cell, or a variable beyond `n^3` mean the model is corrupt.
///
/// # Errors
///
/// See [`DecodeError`].
pub fn decode_solution(solutions: &Solutions, size: GridSize) -> Result<Grid, DecodeError> {
    let mut grid = Grid::empty(size);
    log::debug!("decoding {} true variables for n = {}", solutions.len(), size.get());

    for var in solutions.iter() {
        let placement =
            Placement::decode(var, size).ok_or(DecodeError::VariableOutOfRange {
                variable: var,
                max: size.num_vars(),
            })?;
        let cell = placement.cell();

        match grid.get(cell) {
            Some(0) => grid.set(cell, placement.digit),
            Some(first) => {
                return Err(DecodeError::ConflictingDigits {
                    row: cell.row,
                    col: cell.col,
                    first,
                    second: placement.digit,
                });
            }
            None => unreachable!("decoded placement lies outside the grid"),
        }
    }

    if let Some(cell) = size.cells().find(|&cell| grid.get(cell) == Some(0)) {
        return Err(DecodeError::MissingDigit {
            row: cell.row,
            col: cell.col,
        });
    }
    Ok(grid)
}

/// Decodes an oracle outcome, passing "unsatisfiable" through unchanged.
///
/// # Errors
///
/// See [`decode_solution`].
pub fn decode_outcome(outcome: &SolveOutcome, size: GridSize) -> Result<Decoded, DecodeError> {
    match outcome {
        SolveOutcome::Satisfiable(solutions) => decode_solution(solutions, size).map(Decoded::Solved),
        SolveOutcome::Unsatisfiable => Ok(Decoded::Unsatisfiable),
    }
}
