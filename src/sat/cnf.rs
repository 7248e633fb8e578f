#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Conjunctive normal form formulas.
//!
//! A [`Cnf`] is the complete problem instance handed to a SAT oracle: a
//! declared variable count and the conjunction of its clauses. It is built once
//! and not mutated afterwards, so it can be shared freely between readers.

use crate::sat::clause::Clause;
use crate::sat::literal::Variable;
use core::fmt;

/// A conjunction of clauses over a declared number of variables.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cnf {
    num_vars: Variable,
    clauses: Vec<Clause>,
}

impl Cnf {
    /// Creates a formula over variables `1..=num_vars`.
    ///
    /// # Panics
    ///
    /// If any clause references a variable above `num_vars`.
    #[must_use]
    pub fn new(num_vars: Variable, clauses: Vec<Clause>) -> Self {
        assert!(
            clauses.iter().all(|c| c.max_variable() <= num_vars),
            "clause references a variable above the declared count {num_vars}"
        );
        Self { num_vars, clauses }
    }

    /// Number of declared variables. Variables that appear in no clause still
    /// count.
    #[must_use]
    pub const fn num_vars(&self) -> Variable {
        self.num_vars
    }

    /// Number of clauses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Whether the formula has no clauses.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// The clauses, in order.
    #[must_use]
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Iterates over the clauses.
    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }
}

impl<'a> IntoIterator for &'a Cnf {
    type Item = &'a Clause;
    type IntoIter = core::slice::Iter<'a, Clause>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.iter()
    }
}

/// Renders the formula in DIMACS CNF form.
impl fmt::Display for Cnf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "p cnf {} {}", self.num_vars, self.clauses.len())?;
        for clause in &self.clauses {
            for lit in clause {
                write!(f, "{lit} ")?;
            }
            writeln!(f, "0")?;
        }
        Ok(())
    }
}
