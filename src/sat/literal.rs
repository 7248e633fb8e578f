#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Signed propositional literals.
//!
//! A literal is a variable identifier paired with a polarity. Variables are
//! 1-based, since the DIMACS format reserves `0` as the clause terminator, so
//! the signed integer representation is always non-zero: `v` for the positive
//! literal and `-v` for its negation.

use core::fmt;
use core::ops::{Neg, Not};

/// A 1-based propositional variable identifier.
pub type Variable = u32;

/// A variable together with its polarity, stored in signed DIMACS form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal(i32);

impl Literal {
    /// Creates a literal for `var` with the given polarity (`true` for the
    /// positive literal).
    ///
    /// # Panics
    ///
    /// If `var` is `0` or does not fit a signed 32-bit integer. Callers derive
    /// variables from a validated grid size, so this is a precondition
    /// violation rather than a runtime condition.
    #[must_use]
    pub fn new(var: Variable, polarity: bool) -> Self {
        assert_ne!(var, 0, "variable 0 is reserved as the clause terminator");
        let var = i32::try_from(var).expect("literal variable overflowed i32");

        if polarity { Self(var) } else { Self(-var) }
    }

    /// The positive literal of `var`.
    #[must_use]
    pub fn positive(var: Variable) -> Self {
        Self::new(var, true)
    }

    /// The negative literal of `var`.
    #[must_use]
    pub fn negative(var: Variable) -> Self {
        Self::new(var, false)
    }

    /// Interprets a signed DIMACS integer. Returns `None` for `0`.
    #[must_use]
    pub const fn from_i32(value: i32) -> Option<Self> {
        if value == 0 || value == i32::MIN {
            None
        } else {
            Some(Self(value))
        }
    }

    /// The underlying variable.
    #[must_use]
    pub const fn variable(self) -> Variable {
        self.0.unsigned_abs()
    }

    /// `true` for a positive literal.
    #[must_use]
    pub const fn polarity(self) -> bool {
        self.0 > 0
    }

    /// `true` for a negative literal.
    #[must_use]
    pub const fn is_negated(self) -> bool {
        !self.polarity()
    }

    /// The same variable with the opposite polarity.
    #[must_use]
    pub const fn negated(self) -> Self {
        Self(-self.0)
    }

    /// The signed DIMACS form.
    #[must_use]
    pub const fn to_i32(self) -> i32 {
        self.0
    }
}

impl Neg for Literal {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negated()
    }
}

impl Not for Literal {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negated()
    }
}

impl From<Literal> for i32 {
    fn from(literal: Literal) -> Self {
        literal.0
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_neg() {
        assert_eq!(Literal::new(1, false).negated(), Literal::new(1, true));
        assert_eq!(-Literal::new(1, true), Literal::new(1, false));
        assert_eq!(!Literal::new(7, false), Literal::positive(7));
    }

    #[test]
    fn test_literal_signed_form() {
        let lit = Literal::negative(42);
        assert_eq!(lit.to_i32(), -42);
        assert_eq!(lit.variable(), 42);
        assert!(lit.is_negated());
        assert_eq!(lit.to_string(), "-42");
    }

    #[test]
    fn test_from_i32_rejects_terminator() {
        assert_eq!(Literal::from_i32(0), None);
        assert_eq!(Literal::from_i32(-3), Some(Literal::negative(3)));
    }

    #[test]
    #[should_panic(expected = "variable 0 is reserved")]
    fn test_zero_variable_panics() {
        let _ = Literal::new(0, true);
    }
}
