#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Knobs for the constraint encoder.

/// Default bound on `n^k` per cage. A 9×9 cage of 8 cells (43 million
/// tuples) fits, a 16×16 cage of 7 cells does not.
pub const DEFAULT_MAX_CAGE_ASSIGNMENTS: u64 = 50_000_000;

/// Options for [`KillerSudoku`](crate::killer::KillerSudoku).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderConfig {
    /// Emit the box family. With boxes on, the grid size must be a perfect
    /// square; with boxes off the puzzle is a Latin square with cages.
    pub box_constraints: bool,
    /// Generate cage clauses on the rayon thread pool. The clause order is the
    /// same either way.
    pub parallel: bool,
    /// Cages whose `n^k` digit tuples exceed this are rejected up front.
    pub max_cage_assignments: u64,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            box_constraints: true,
            parallel: true,
            max_cage_assignments: DEFAULT_MAX_CAGE_ASSIGNMENTS,
        }
    }
}

impl EncoderConfig {
    /// Sets [`EncoderConfig::box_constraints`].
    #[must_use]
    pub const fn with_box_constraints(mut self, enabled: bool) -> Self {
        self.box_constraints = enabled;
        self
    }

    /// Sets [`EncoderConfig::parallel`].
    #[must_use]
    pub const fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets [`EncoderConfig::max_cage_assignments`].
    #[must_use]
    pub const fn with_max_cage_assignments(mut self, limit: u64) -> Self {
        self.max_cage_assignments = limit;
        self
    }
}
