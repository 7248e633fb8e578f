#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Disjunctive clauses.
//!
//! A clause is the OR of its literals. The encoder never produces an empty
//! clause, since that would encode an unconditional contradiction, and the
//! constructor enforces this.

use crate::sat::literal::{Literal, Variable};
use core::ops::Index;
use smallvec::SmallVec;

/// Inline capacity of a clause. Binary "at most one" clauses and cage clauses
/// of realistic size fit without a heap allocation.
pub const INLINE_LITERALS: usize = 8;

/// A non-empty disjunction of literals.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Clause {
    literals: SmallVec<[Literal; INLINE_LITERALS]>,
}

impl Clause {
    /// Builds a clause from its literals, in order.
    ///
    /// # Panics
    ///
    /// If `literals` is empty.
    pub fn new<I: IntoIterator<Item = Literal>>(literals: I) -> Self {
        let literals: SmallVec<[Literal; INLINE_LITERALS]> = literals.into_iter().collect();
        assert!(!literals.is_empty(), "clauses must contain at least one literal");
        Self { literals }
    }

    /// The binary clause `¬a ∨ ¬b`, forbidding both variables from being true.
    #[must_use]
    pub fn at_most_one_of(a: Variable, b: Variable) -> Self {
        Self::new([Literal::negative(a), Literal::negative(b)])
    }

    /// Number of literals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// The literals, in order.
    pub fn iter(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    /// Whether the clause has a single literal.
    #[must_use]
    pub fn is_unit(&self) -> bool {
        self.len() == 1
    }

    /// `true` when every literal is negated.
    #[must_use]
    pub fn is_all_negative(&self) -> bool {
        self.literals.iter().all(|lit| lit.is_negated())
    }

    /// Largest variable referenced by this clause.
    #[must_use]
    pub fn max_variable(&self) -> Variable {
        self.literals
            .iter()
            .map(|lit| lit.variable())
            .max()
            .unwrap_or_default()
    }

    /// The literals as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Literal] {
        &self.literals
    }
}

impl Index<usize> for Clause {
    type Output = Literal;

    fn index(&self, index: usize) -> &Self::Output {
        &self.literals[index]
    }
}

impl AsRef<[Literal]> for Clause {
    fn as_ref(&self) -> &[Literal] {
        &self.literals
    }
}

impl<'a> IntoIterator for &'a Clause {
    type Item = &'a Literal;
    type IntoIter = core::slice::Iter<'a, Literal>;

    fn into_iter(self) -> Self::IntoIter {
        self.literals.iter()
    }
}

impl From<&Clause> for Vec<i32> {
    fn from(clause: &Clause) -> Self {
        clause.literals.iter().map(|lit| lit.to_i32()).collect()
    }
}
