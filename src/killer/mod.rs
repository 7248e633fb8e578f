#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Killer Sudoku to SAT and back.
//!
//! ```text
//! KillerSudoku --to_cnf--> Cnf --Oracle--> SolveOutcome --decode--> Decoded
//! ```

/// Cage definitions and their structural validation.
pub mod cage;
/// Encoder settings.
pub mod config;
/// Model to grid decoding.
pub mod decoder;
/// Clause generation for every constraint family.
pub mod encoder;
/// Puzzle, decoding and pipeline errors.
pub mod error;
/// The decoded digit grid.
pub mod grid;
/// Placement to variable numbering.
pub mod indexer;

pub use cage::Cage;
pub use config::EncoderConfig;
pub use decoder::{Decoded, decode_outcome, decode_solution};
pub use encoder::KillerSudoku;
pub use error::{DecodeError, PuzzleError, SolveError};
pub use grid::Grid;
pub use indexer::{Cell, GridSize, Placement};

use crate::sat::solver::Oracle;

/// Validates, encodes, solves and decodes in one call.
///
/// # Errors
///
/// [`SolveError::Puzzle`] for an invalid definition, otherwise as
/// [`KillerSudoku::solve_with`].
pub fn solve_puzzle<O: Oracle>(
    size: usize,
    cages: Vec<Cage>,
    oracle: &mut O,
) -> Result<Decoded, SolveError> {
    KillerSudoku::new(size, cages)?.solve_with(oracle)
}
