#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The digit grid produced by decoding a model.

use crate::killer::cage::Cage;
use crate::killer::indexer::{Cell, GridSize, Placement};
use crate::sat::solver::Solutions;
use itertools::Itertools;
use std::fmt::Display;

/// An `n × n` grid of digits in `1..=n`, `0` marking an empty cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid(Vec<Vec<usize>>);

impl Grid {
    /// Wraps `rows`, or `None` if they do not form a square.
    #[must_use]
    pub fn new(rows: Vec<Vec<usize>>) -> Option<Self> {
        let n = rows.len();
        rows.iter().all(|row| row.len() == n).then_some(Self(rows))
    }

    /// An `n × n` grid of empty cells.
    #[must_use]
    pub fn empty(size: GridSize) -> Self {
        let n = size.get();
        Self(vec![vec![0; n]; n])
    }

    /// The side length.
    #[must_use]
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// The digit in `cell`, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, cell: Cell) -> Option<usize> {
        self.0.get(cell.row)?.get(cell.col).copied()
    }

    pub(crate) fn set(&mut self, cell: Cell, digit: usize) {
        self.0[cell.row][cell.col] = digit;
    }

    /// The rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[usize]> {
        self.0.iter().map(Vec::as_slice)
    }

    /// Every filled cell as a placement, row-major.
    pub fn placements(&self) -> impl Iterator<Item = Placement> + '_ {
        self.0.iter().enumerate().flat_map(|(row, digits)| {
            digits
                .iter()
                .enumerate()
                .filter(|&(_, &digit)| digit != 0)
                .map(move |(col, &digit)| Placement::new(row, col, digit))
        })
    }

    /// The model that sets exactly this grid's placements true.
    #[must_use]
    pub fn to_solutions(&self, size: GridSize) -> Solutions {
        self.placements().map(|p| p.encode(size)).collect()
    }

    /// Whether every row, column and (if `box_size` is given) box holds each
    /// digit `1..=n` exactly once.
    #[must_use]
    pub fn is_valid_sudoku(&self, box_size: Option<usize>) -> bool {
        let n = self.size();
        let at = |(r, c): (usize, usize)| self.0[r][c];

        let rows_ok = (0..n).all(|r| is_permutation((0..n).map(|c| at((r, c))), n));
        let cols_ok = (0..n).all(|c| is_permutation((0..n).map(|r| at((r, c))), n));
        let boxes_ok = box_size.is_none_or(|b| {
            (0..n)
                .step_by(b)
                .cartesian_product((0..n).step_by(b))
                .all(|(br, bc)| {
                    is_permutation((br..br + b).cartesian_product(bc..bc + b).map(at), n)
                })
        });

        rows_ok && cols_ok && boxes_ok
    }

    /// Whether the digits in `cage` are distinct and add up to its target.
    #[must_use]
    pub fn satisfies_cage(&self, cage: &Cage) -> bool {
        let Some(digits) = cage
            .cells()
            .iter()
            .map(|&cell| self.get(cell).filter(|&d| d != 0))
            .collect::<Option<Vec<_>>>()
        else {
            return false;
        };
        digits.iter().all_unique() && digits.iter().sum::<usize>() == cage.target()
    }
}

fn is_permutation(digits: impl Iterator<Item = usize>, n: usize) -> bool {
    digits.sorted_unstable().eq(1..=n)
}

impl From<Grid> for Vec<Vec<usize>> {
    fn from(grid: Grid) -> Self {
        grid.0
    }
}

impl<const N: usize> From<[[usize; N]; N]> for Grid {
    fn from(rows: [[usize; N]; N]) -> Self {
        Self(rows.iter().map(|row| row.to_vec()).collect())
    }
}

/// One line per row, digits separated by single spaces.
impl Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.0 {
            writeln!(f, "{}", row.iter().join(" "))?;
        }
        Ok(())
    }
}
