#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The boundary between this crate and whatever decides satisfiability.
//!
//! Solving is delegated to an [`Oracle`]: anything that takes a [`Cnf`] and
//! answers with either a model or an explicit "unsatisfiable". A subprocess
//! wrapper, an in-process library or a network client can all sit behind it.

use crate::sat::cnf::Cnf;
use crate::sat::literal::{Literal, Variable};
use rustc_hash::FxHashSet;

/// The set of variables a model assigns `true`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Solutions(FxHashSet<Variable>);

impl Solutions {
    /// An empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects the positive literals out of a stream of signed DIMACS
    /// integers. Negative values and the `0` terminator are ignored.
    pub fn from_literals<I: IntoIterator<Item = i32>>(values: I) -> Self {
        values
            .into_iter()
            .filter_map(Literal::from_i32)
            .filter(|lit| lit.polarity())
            .map(Literal::variable)
            .collect()
    }

    /// Whether `var` is true in this model.
    #[must_use]
    pub fn check(&self, var: Variable) -> bool {
        self.0.contains(&var)
    }

    /// Marks `var` true.
    pub fn insert(&mut self, var: Variable) {
        self.0.insert(var);
    }

    /// Number of true variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no variable is true.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True variables in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = Variable> + '_ {
        let mut vars: Vec<Variable> = self.0.iter().copied().collect();
        vars.sort_unstable();
        vars.into_iter()
    }
}

impl FromIterator<Variable> for Solutions {
    fn from_iter<T: IntoIterator<Item = Variable>>(iter: T) -> Self {
        Self(iter.into_iter().filter(|&v| v != 0).collect())
    }
}

impl Extend<Variable> for Solutions {
    fn extend<T: IntoIterator<Item = Variable>>(&mut self, iter: T) {
        self.0.extend(iter.into_iter().filter(|&v| v != 0));
    }
}

/// What an oracle concluded about a formula.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum SolveOutcome {
    /// A model was found.
    Satisfiable(Solutions),
    /// No model exists.
    Unsatisfiable,
}

impl SolveOutcome {
    /// The model, if there is one.
    #[must_use]
    pub const fn solutions(&self) -> Option<&Solutions> {
        match self {
            Self::Satisfiable(solutions) => Some(solutions),
            Self::Unsatisfiable => None,
        }
    }
}

/// A decision procedure for CNF satisfiability.
///
/// Transport failures (a missing binary, a crash, a timeout) are reported
/// through `Self::Error` and are never conflated with
/// [`SolveOutcome::Unsatisfiable`].
pub trait Oracle {
    /// Why no verdict was reached.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Decides `cnf`.
    ///
    /// # Errors
    ///
    /// When the oracle could not reach a verdict.
    fn solve(&mut self, cnf: &Cnf) -> Result<SolveOutcome, Self::Error>;
}
