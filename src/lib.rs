#![deny(missing_docs)]
//! This crate reduces Killer Sudoku puzzles to Boolean satisfiability and
//! turns satisfying assignments back into grids.
//!
//! Solving itself is left to an external [`sat::solver::Oracle`]; the crate
//! produces a CNF instance (serialisable as DIMACS) and consumes the set of
//! true variables an oracle reports.

/// The `killer` module implements the Killer Sudoku encoder and decoder.
pub mod killer;

/// The `sat` module holds the CNF data model, the DIMACS codec and the oracle
/// boundary.
pub mod sat;
