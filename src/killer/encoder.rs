#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Translation of a Killer Sudoku into CNF.
//!
//! Every constraint family is a pure function from the grid size (and, for
//! cages, the cage) to its own list of clauses. [`KillerSudoku::to_cnf`]
//! concatenates them in a fixed order, so the output is deterministic whether
//! or not the families are generated in parallel:
//!
//! 1. each cell holds at least one digit;
//! 2. each cell holds at most one digit;
//! 3. each row holds every digit exactly once;
//! 4. each column holds every digit exactly once;
//! 5. each box holds every digit exactly once (perfect-square sizes only);
//! 6. each cage's digits are distinct and add up to its target.
//!
//! Families 1 to 5 together produce `4 * n^2 * (1 + C(n, 2))` clauses, 11988
//! for a 9×9 grid. The cage family forbids every invalid digit tuple
//! individually and so costs `O(n^k)` per cage of `k` cells; that is the
//! dominant cost and the reason for the cage size limit in
//! [`EncoderConfig`].

use crate::killer::cage::Cage;
use crate::killer::config::EncoderConfig;
use crate::killer::decoder::{Decoded, decode_outcome};
use crate::killer::error::{DecodeError, PuzzleError, SolveError};
use crate::killer::grid::Grid;
use crate::killer::indexer::{Cell, GridSize, Placement};
use crate::sat::clause::Clause;
use crate::sat::cnf::Cnf;
use crate::sat::literal::{Literal, Variable};
use crate::sat::solver::Oracle;
use itertools::Itertools;
use rayon::prelude::*;

/// "At least one of `vars`" followed by "no two of `vars`".
fn exactly_one(vars: &[Variable], clauses: &mut Vec<Clause>) {
    clauses.push(Clause::new(vars.iter().copied().map(Literal::positive)));
    clauses.extend(
        vars.iter()
            .tuple_combinations()
            .map(|(&a, &b)| Clause::at_most_one_of(a, b)),
    );
}

/// One clause per cell listing all of its digits.
#[must_use]
pub fn generate_cell_clauses(size: GridSize) -> Vec<Clause> {
    size.cells()
        .map(|cell| Clause::new(size.digits().map(|d| Placement::at(cell, d).literal(size))))
        .collect()
}

/// For every cell and every pair of digits, `¬(cell, d1) ∨ ¬(cell, d2)`.
#[must_use]
pub fn generate_cell_unique_clauses(size: GridSize) -> Vec<Clause> {
    size.cells()
        .flat_map(|cell| {
            size.digits()
                .tuple_combinations()
                .map(move |(d1, d2)| {
                    Clause::at_most_one_of(
                        Placement::at(cell, d1).encode(size),
                        Placement::at(cell, d2).encode(size),
                    )
                })
        })
        .collect()
}

/// Exactly-one over `cells` for every digit.
fn generate_group_clauses(size: GridSize, cells: &[Cell], clauses: &mut Vec<Clause>) {
    for digit in size.digits() {
        let vars = cells
            .iter()
            .map(|&cell| Placement::at(cell, digit).encode(size))
            .collect_vec();
        exactly_one(&vars, clauses);
    }
}

/// Each digit exactly once per row.
#[must_use]
pub fn generate_row_clauses(size: GridSize) -> Vec<Clause> {
    let n = size.get();
    let mut clauses = Vec::new();
    for row in 0..n {
        let cells = (0..n).map(|col| Cell::new(row, col)).collect_vec();
        generate_group_clauses(size, &cells, &mut clauses);
    }
    clauses
}

/// Each digit exactly once per column.
#[must_use]
pub fn generate_col_clauses(size: GridSize) -> Vec<Clause> {
    let n = size.get();
    let mut clauses = Vec::new();
    for col in 0..n {
        let cells = (0..n).map(|row| Cell::new(row, col)).collect_vec();
        generate_group_clauses(size, &cells, &mut clauses);
    }
    clauses
}

/// Boxes are visited row-major; cells within a box likewise.
#[must_use]
pub fn generate_box_clauses(size: GridSize, box_size: usize) -> Vec<Clause> {
    let n = size.get();
    let mut clauses = Vec::new();
    for (br, bc) in (0..n).step_by(box_size).cartesian_product((0..n).step_by(box_size)) {
        let cells = (br..br + box_size)
            .cartesian_product(bc..bc + box_size)
            .map(Cell::from)
            .collect_vec();
        generate_group_clauses(size, &cells, &mut clauses);
    }
    clauses
}

/// Forbids, one clause each, every digit tuple for `cage` whose sum misses the
/// target or which repeats a digit.
///
/// Tuples are enumerated as an odometer over the cage's cells in the order
/// they were given, so a cage of `k` cells visits `n^k` tuples.
#[must_use]
pub fn generate_cage_clauses(cage: &Cage, size: GridSize) -> Vec<Clause> {
    let cells = cage.cells();
    let clauses = cells
        .iter()
        .map(|_| size.digits())
        .multi_cartesian_product()
        .filter(|digits| {
            digits.iter().sum::<usize>() != cage.target() || !digits.iter().all_unique()
        })
        .map(|digits| {
            Clause::new(cells.iter().zip(digits).map(|(&cell, digit)| {
                Literal::negative(Placement::at(cell, digit).encode(size))
            }))
        })
        .collect_vec();

    log::trace!(
        "cage {:?} (target {}): {} of {} tuples forbidden",
        cells,
        cage.target(),
        clauses.len(),
        cage.assignments(size)
    );
    clauses
}

/// Clause counts per constraint family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FamilyCounts {
    /// Cell "at least one digit" clauses.
    pub cell: usize,
    /// Cell "at most one digit" clauses.
    pub cell_unique: usize,
    /// Row clauses.
    pub row: usize,
    /// Column clauses.
    pub col: usize,
    /// Box clauses.
    pub block: usize,
    /// Cage clauses.
    pub cage: usize,
}

impl FamilyCounts {
    /// Everything except the cages.
    #[must_use]
    pub const fn base(&self) -> usize {
        self.cell + self.cell_unique + self.row + self.col + self.block
    }

    /// All families together.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.base() + self.cage
    }
}

/// Every family's clauses, kept apart until they are concatenated into a
/// [`Cnf`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Families {
    /// From [`generate_cell_clauses`].
    pub cell: Vec<Clause>,
    /// From [`generate_cell_unique_clauses`].
    pub cell_unique: Vec<Clause>,
    /// From [`generate_row_clauses`].
    pub row: Vec<Clause>,
    /// From [`generate_col_clauses`].
    pub col: Vec<Clause>,
    /// From [`generate_box_clauses`], empty when boxes are off.
    pub block: Vec<Clause>,
    /// From [`generate_cage_clauses`], cage by cage.
    pub cage: Vec<Clause>,
}

impl Families {
    /// Clause counts per family.
    #[must_use]
    pub fn counts(&self) -> FamilyCounts {
        FamilyCounts {
            cell: self.cell.len(),
            cell_unique: self.cell_unique.len(),
            row: self.row.len(),
            col: self.col.len(),
            block: self.block.len(),
            cage: self.cage.len(),
        }
    }

    /// Concatenates the families, cells first and cages last.
    #[must_use]
    pub fn into_cnf(self, size: GridSize) -> Cnf {
        let clauses = self
            .cell
            .into_iter()
            .chain(self.cell_unique)
            .chain(self.row)
            .chain(self.col)
            .chain(self.block)
            .chain(self.cage)
            .collect();
        Cnf::new(size.num_vars(), clauses)
    }
}

/// A validated Killer Sudoku definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KillerSudoku {
    size: GridSize,
    cages: Vec<Cage>,
    config: EncoderConfig,
}

impl KillerSudoku {
    /// Validates a puzzle with the default [`EncoderConfig`].
    ///
    /// # Errors
    ///
    /// See [`KillerSudoku::with_config`].
    pub fn new(size: usize, cages: Vec<Cage>) -> Result<Self, PuzzleError> {
        Self::with_config(size, cages, EncoderConfig::default())
    }

    /// Validates a puzzle definition. Every structural problem is reported
    /// here, before any clause is generated.
    ///
    /// # Errors
    ///
    /// The first [`PuzzleError`] found: grid size, then box shape, then each
    /// cage in order.
    pub fn with_config(
        size: usize,
        cages: Vec<Cage>,
        config: EncoderConfig,
    ) -> Result<Self, PuzzleError> {
        let size = GridSize::new(size)?;
        if config.box_constraints && size.box_size().is_none() {
            return Err(PuzzleError::NonSquareGrid { size: size.get() });
        }
        for (index, cage) in cages.iter().enumerate() {
            cage.validate(index, size, config.max_cage_assignments)?;
        }
        Ok(Self {
            size,
            cages,
            config,
        })
    }

    /// The grid size.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        self.size
    }

    /// The cages, in the order given.
    #[must_use]
    pub fn cages(&self) -> &[Cage] {
        &self.cages
    }

    /// The encoder options.
    #[must_use]
    pub const fn config(&self) -> &EncoderConfig {
        &self.config
    }

    fn box_size(&self) -> Option<usize> {
        self.size.box_size().filter(|_| self.config.box_constraints)
    }

    fn base_families(&self) -> Families {
        let size = self.size;
        Families {
            cell: generate_cell_clauses(size),
            cell_unique: generate_cell_unique_clauses(size),
            row: generate_row_clauses(size),
            col: generate_col_clauses(size),
            block: self
                .box_size()
                .map(|b| generate_box_clauses(size, b))
                .unwrap_or_default(),
            cage: Vec::new(),
        }
    }

    fn cage_family(&self) -> Vec<Clause> {
        let size = self.size;
        let per_cage: Vec<Vec<Clause>> = if self.config.parallel {
            self.cages
                .par_iter()
                .map(|cage| generate_cage_clauses(cage, size))
                .collect()
        } else {
            self.cages
                .iter()
                .map(|cage| generate_cage_clauses(cage, size))
                .collect()
        };
        per_cage.into_iter().flatten().collect()
    }

    /// Generates every family separately.
    #[must_use]
    pub fn families(&self) -> Families {
        let (mut families, cage) = if self.config.parallel {
            rayon::join(|| self.base_families(), || self.cage_family())
        } else {
            (self.base_families(), self.cage_family())
        };
        families.cage = cage;

        let counts = families.counts();
        log::debug!(
            "clauses per family: cell {}, cell-unique {}, row {}, col {}, box {}, cage {}",
            counts.cell,
            counts.cell_unique,
            counts.row,
            counts.col,
            counts.block,
            counts.cage
        );
        families
    }

    /// The complete CNF instance over `n^3` variables.
    #[must_use]
    pub fn to_cnf(&self) -> Cnf {
        let cnf = self.families().into_cnf(self.size);
        log::info!(
            "encoded {}x{} killer sudoku with {} cages: {} variables, {} clauses",
            self.size.get(),
            self.size.get(),
            self.cages.len(),
            cnf.num_vars(),
            cnf.len()
        );
        cnf
    }

    /// Whether `grid` is a complete solution of this puzzle.
    #[must_use]
    pub fn verify(&self, grid: &Grid) -> bool {
        grid.size() == self.size.get()
            && grid.is_valid_sudoku(self.box_size())
            && self.cages.iter().all(|cage| grid.satisfies_cage(cage))
    }

    /// Encodes, asks `oracle`, and decodes the answer. A decoded grid is
    /// checked against the puzzle before it is returned.
    ///
    /// # Errors
    ///
    /// [`SolveError::Oracle`] if the oracle fails and [`SolveError::Decode`]
    /// if its model is malformed or does not solve the puzzle.
    pub fn solve_with<O: Oracle>(&self, oracle: &mut O) -> Result<Decoded, SolveError> {
        let cnf = self.to_cnf();
        let outcome = oracle
            .solve(&cnf)
            .map_err(|err| SolveError::Oracle(Box::new(err)))?;
        let decoded = decode_outcome(&outcome, self.size)?;

        if let Decoded::Solved(grid) = &decoded {
            if !self.verify(grid) {
                return Err(DecodeError::RuleViolation.into());
            }
        }
        Ok(decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::solver::{SolveOutcome, Solutions};
    use rustc_hash::FxHashMap;

    const SOLVED_FOUR: [[usize; 4]; 4] = [[1, 2, 3, 4], [3, 4, 1, 2], [2, 1, 4, 3], [4, 3, 2, 1]];

    fn size(n: usize) -> GridSize {
        GridSize::new(n).unwrap()
    }

    fn choose_two(n: usize) -> usize {
        n * (n - 1) / 2
    }

    /// Horizontal 2-cell cages over `SOLVED_FOUR`: sums 3, 7, 7, 3, 3, 7, 7, 3.
    fn four_cages() -> Vec<Cage> {
        let grid = Grid::from(SOLVED_FOUR);
        (0..4)
            .cartesian_product([0, 2])
            .map(|(row, col)| {
                let cells = [Cell::new(row, col), Cell::new(row, col + 1)];
                let target = cells.iter().map(|&c| grid.get(c).unwrap()).sum();
                Cage::new(target, cells)
            })
            .collect()
    }

    fn satisfies(cnf: &Cnf, solutions: &Solutions) -> bool {
        cnf.iter().all(|clause| {
            clause
                .iter()
                .any(|lit| solutions.check(lit.variable()) == lit.polarity())
        })
    }

    /// Runs unit propagation to a fixed point; `true` if it falsifies a clause.
    fn refuted_by_unit_propagation(cnf: &Cnf) -> bool {
        let mut assignment: FxHashMap<Variable, bool> = FxHashMap::default();
        loop {
            let mut changed = false;
            for clause in cnf {
                let mut satisfied = false;
                let mut open = Vec::new();
                for lit in clause {
                    match assignment.get(&lit.variable()) {
                        Some(&value) if value == lit.polarity() => satisfied = true,
                        Some(_) => {}
                        None => open.push(*lit),
                    }
                }
                if satisfied {
                    continue;
                }
                match open.as_slice() {
                    [] => return true,
                    [unit] => {
                        assignment.insert(unit.variable(), unit.polarity());
                        changed = true;
                    }
                    _ => {}
                }
            }
            if !changed {
                return false;
            }
        }
    }

    struct FixedOracle(SolveOutcome);

    impl Oracle for FixedOracle {
        type Error = std::io::Error;

        fn solve(&mut self, _cnf: &Cnf) -> Result<SolveOutcome, Self::Error> {
            Ok(self.0.clone())
        }
    }

    struct PropagatingOracle;

    impl Oracle for PropagatingOracle {
        type Error = std::io::Error;

        fn solve(&mut self, cnf: &Cnf) -> Result<SolveOutcome, Self::Error> {
            if refuted_by_unit_propagation(cnf) {
                Ok(SolveOutcome::Unsatisfiable)
            } else {
                Err(std::io::Error::other("propagation alone cannot decide"))
            }
        }
    }

    #[test]
    fn test_base_clause_counts() {
        for n in [4, 9] {
            let puzzle = KillerSudoku::new(n, Vec::new()).unwrap();
            let counts = puzzle.families().counts();
            let group = n * n + n * n * choose_two(n);

            assert_eq!(counts.cell, n * n);
            assert_eq!(counts.cell_unique, n * n * choose_two(n));
            assert_eq!(counts.row, group);
            assert_eq!(counts.col, group);
            assert_eq!(counts.block, group);
            assert_eq!(counts.cage, 0);
            assert_eq!(counts.total(), 4 * n * n * (1 + choose_two(n)));
        }
        assert_eq!(KillerSudoku::new(9, Vec::new()).unwrap().to_cnf().len(), 11988);
        assert_eq!(KillerSudoku::new(4, Vec::new()).unwrap().to_cnf().len(), 448);
    }

    #[test]
    fn test_clause_shapes() {
        let n = size(4);
        assert!(generate_cell_clauses(n).iter().all(|c| c.len() == 4 && !c.is_all_negative()));
        assert!(
            generate_cell_unique_clauses(n)
                .iter()
                .all(|c| c.len() == 2 && c.is_all_negative())
        );
        assert!(generate_box_clauses(n, 2).iter().all(|c| !c.is_empty()));
    }

    #[test]
    fn test_cell_unique_clauses_stay_within_a_cell() {
        let n = size(4);
        for clause in generate_cell_unique_clauses(n) {
            let a = Placement::decode(clause[0].variable(), n).unwrap();
            let b = Placement::decode(clause[1].variable(), n).unwrap();
            assert_eq!(a.cell(), b.cell());
            assert_ne!(a.digit, b.digit);
        }
    }

    #[test]
    fn test_box_clauses_cover_a_box() {
        let n = size(4);
        let clauses = generate_box_clauses(n, 2);
        // First group: top-left box, digit 1.
        let cells: Vec<Cell> = clauses[0]
            .iter()
            .map(|lit| Placement::decode(lit.variable(), n).unwrap())
            .inspect(|p| assert_eq!(p.digit, 1))
            .map(Placement::cell)
            .collect();
        assert_eq!(cells, [(0, 0), (0, 1), (1, 0), (1, 1)].map(Cell::from));
    }

    #[test]
    fn test_two_cell_cage_clause_counts() {
        let n = size(4);
        for target in 1..=9 {
            let distinct_pairs = (1..=4)
                .cartesian_product(1..=4)
                .filter(|&(a, b)| a != b && a + b == target)
                .count();
            let cage = Cage::new(target, [(0, 0), (0, 1)]);
            let clauses = generate_cage_clauses(&cage, n);
            assert_eq!(clauses.len(), 16 - distinct_pairs, "target {target}");
            assert!(clauses.iter().all(|c| c.len() == 2 && c.is_all_negative()));
        }
        assert_eq!(generate_cage_clauses(&Cage::new(5, [(0, 0), (0, 1)]), n).len(), 12);
    }

    #[test]
    fn test_cage_clauses_forbid_exactly_invalid_tuples() {
        let n = size(4);
        let cage = Cage::new(6, [(1, 0), (1, 1), (2, 2)]);
        let clauses = generate_cage_clauses(&cage, n);
        let forbidden: Vec<Vec<usize>> = clauses
            .iter()
            .map(|c| {
                c.iter()
                    .map(|lit| Placement::decode(lit.variable(), n).unwrap().digit)
                    .collect()
            })
            .collect();
        // 1+2+3 in any order is the only valid multiset, so 3! tuples survive.
        assert_eq!(forbidden.len(), 64 - 6);
        assert!(!forbidden.contains(&vec![3, 1, 2]));
        assert!(forbidden.contains(&vec![2, 2, 2]));
        assert!(forbidden.contains(&vec![1, 1, 4]));
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let sequential = KillerSudoku::with_config(
            4,
            four_cages(),
            EncoderConfig::default().with_parallel(false),
        )
        .unwrap();
        let parallel = KillerSudoku::new(4, four_cages()).unwrap();
        assert_eq!(sequential.to_cnf(), parallel.to_cnf());
    }

    #[test]
    fn test_round_trip_known_solution() {
        let puzzle = KillerSudoku::new(4, four_cages()).unwrap();
        let targets: Vec<usize> = puzzle.cages().iter().map(Cage::target).collect();
        assert_eq!(targets, vec![3, 7, 7, 3, 3, 7, 7, 3]);

        let cnf = puzzle.to_cnf();
        assert_eq!(cnf.num_vars(), 64);
        let expected = Grid::from(SOLVED_FOUR);
        let model = expected.to_solutions(puzzle.size());
        assert!(satisfies(&cnf, &model), "known solution must satisfy every clause");

        let mut oracle = FixedOracle(SolveOutcome::Satisfiable(model));
        let decoded = puzzle.solve_with(&mut oracle).unwrap();
        assert_eq!(decoded, Decoded::Solved(expected));
    }

    #[test]
    fn test_wrong_grid_violates_some_clause() {
        let puzzle = KillerSudoku::new(4, four_cages()).unwrap();
        // Valid sudoku, but the first cage (target 3) now sums to 7.
        let other = Grid::from([[3, 4, 1, 2], [1, 2, 3, 4], [4, 3, 2, 1], [2, 1, 4, 3]]);
        assert!(other.is_valid_sudoku(Some(2)));
        assert!(!satisfies(&puzzle.to_cnf(), &other.to_solutions(puzzle.size())));

        let mut oracle = FixedOracle(SolveOutcome::Satisfiable(other.to_solutions(puzzle.size())));
        assert!(matches!(
            puzzle.solve_with(&mut oracle),
            Err(SolveError::Decode(DecodeError::RuleViolation))
        ));
    }

    #[test]
    fn test_contradictory_cages_are_unsatisfiable() {
        let cages = vec![Cage::new(1, [(0, 0)]), Cage::new(2, [(0, 0)])];
        let puzzle = KillerSudoku::new(4, cages).unwrap();
        assert!(refuted_by_unit_propagation(&puzzle.to_cnf()));

        let decoded = puzzle.solve_with(&mut PropagatingOracle).unwrap();
        assert!(decoded.is_unsatisfiable());
        assert_eq!(decoded.grid(), None);
    }

    #[test]
    fn test_consistent_puzzle_is_not_refuted() {
        let puzzle = KillerSudoku::new(4, four_cages()).unwrap();
        assert!(!refuted_by_unit_propagation(&puzzle.to_cnf()));
        assert!(matches!(
            puzzle.solve_with(&mut PropagatingOracle),
            Err(SolveError::Oracle(_))
        ));
    }

    #[test]
    fn test_validation_errors() {
        assert_eq!(
            KillerSudoku::new(6, Vec::new()),
            Err(PuzzleError::NonSquareGrid { size: 6 })
        );
        let latin =
            KillerSudoku::with_config(6, Vec::new(), EncoderConfig::default().with_box_constraints(false))
                .unwrap();
        let counts = latin.families().counts();
        assert_eq!(counts.block, 0);
        assert_eq!(counts.total(), 3 * 36 * (1 + choose_two(6)));

        assert_eq!(KillerSudoku::new(0, Vec::new()), Err(PuzzleError::ZeroGridSize));
        assert_eq!(
            KillerSudoku::new(4, vec![Cage::new(3, [(0, 0), (0, 1)]), Cage::new(3, [(0, 4)])]),
            Err(PuzzleError::CellOutOfBounds {
                cage: 1,
                row: 0,
                col: 4,
                size: 4
            })
        );
        let config = EncoderConfig::default().with_max_cage_assignments(9 * 9 * 9);
        assert!(matches!(
            KillerSudoku::with_config(9, vec![Cage::new(10, [(0, 0), (0, 1), (0, 2), (0, 3)])], config),
            Err(PuzzleError::CageTooLarge { cage: 0, len: 4, assignments: 6561, limit: 729 })
        ));
    }
}
