#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Reading and writing the DIMACS CNF interchange format, and reading the
//! model a solver prints back.
//!
//! A DIMACS CNF instance looks like:
//!
//! ```text
//! c optional comment
//! p cnf <num_variables> <num_clauses>
//! 1 -2 3 0
//! -1 0
//! ```
//!
//! Each clause is a line of signed integers terminated by `0`. Solver output
//! follows the competition convention: an `s` status line and one or more `v`
//! lines carrying the model, e.g.
//!
//! ```text
//! s SATISFIABLE
//! v 1 -2 3 -4
//! v 5 0
//! ```
//!
//! The result-file dialect written by MiniSat-style solvers (`SAT` / `UNSAT`
//! on the first line, then bare literal lines) is accepted too.

use crate::sat::clause::Clause;
use crate::sat::cnf::Cnf;
use crate::sat::literal::{Literal, Variable};
use crate::sat::solver::{SolveOutcome, Solutions};
use std::io::{self, BufRead, Write};

/// Failures while reading DIMACS instances or solver output.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum DimacsError {
    /// The reader failed.
    #[display("failed to read input: {_0}")]
    Io(io::Error),
    /// A token is not a signed integer.
    #[display("invalid literal {token:?} on line {line}")]
    InvalidLiteral {
        /// 1-based line number.
        line: usize,
        /// The offending token.
        token: String,
    },
    /// Clause data appeared before `p cnf`.
    #[display("clause data before the `p cnf` header")]
    MissingHeader,
    /// The problem line is malformed or repeated.
    #[display("malformed or repeated problem line on line {line}")]
    InvalidHeader {
        /// 1-based line number.
        line: usize,
    },
    /// The clause count differs from the header.
    #[display("header declares {declared} clauses but {found} were read")]
    ClauseCountMismatch {
        /// Count from the header.
        declared: usize,
        /// Clauses actually read.
        found: usize,
    },
    /// A literal names a variable above the declared count.
    #[display("variable {variable} on line {line} exceeds the declared {max}")]
    VariableOutOfRange {
        /// 1-based line number.
        line: usize,
        /// The offending variable.
        variable: Variable,
        /// Variable count from the header.
        max: Variable,
    },
    /// A bare `0` with no literals before it.
    #[display("empty clause on line {line}")]
    EmptyClause {
        /// 1-based line number.
        line: usize,
    },
    /// Input ended inside a clause.
    #[display("clause starting on line {line} is not terminated by 0")]
    UnterminatedClause {
        /// Line where the clause began.
        line: usize,
    },
    /// Solver output has no model and no verdict.
    #[display("solver output contains neither a model nor an unsatisfiable verdict")]
    NoVerdict,
    /// `s SATISFIABLE` without any `v` lines.
    #[display("solver reported satisfiable but printed no model")]
    MissingModel,
    /// The solver answered `UNKNOWN` or similar.
    #[display("solver could not decide the instance")]
    Indeterminate,
}

/// Writes `cnf` in DIMACS form: the `p cnf` header, then exactly one
/// `0`-terminated line per clause.
///
/// # Errors
///
/// Propagates any error from `writer`.
pub fn write_dimacs<W: Write>(cnf: &Cnf, writer: W) -> io::Result<()> {
    let mut writer = io::BufWriter::new(writer);
    write!(writer, "{cnf}")?;
    writer.flush()
}

/// Renders `cnf` as a DIMACS string.
#[must_use]
pub fn to_dimacs(cnf: &Cnf) -> String {
    cnf.to_string()
}

fn parse_literal(token: &str, line: usize) -> Result<i32, DimacsError> {
    token
        .parse::<i32>()
        .ok()
        .filter(|&value| value != i32::MIN)
        .ok_or_else(|| DimacsError::InvalidLiteral {
            line,
            token: token.to_owned(),
        })
}

fn parse_header<'a>(
    mut tokens: impl Iterator<Item = &'a str>,
    line: usize,
) -> Result<(Variable, usize), DimacsError> {
    let invalid = || DimacsError::InvalidHeader { line };
    if tokens.next() != Some("p") || tokens.next() != Some("cnf") {
        return Err(invalid());
    }
    let num_vars = tokens
        .next()
        .and_then(|t| t.parse::<Variable>().ok())
        .ok_or_else(invalid)?;
    let num_clauses = tokens
        .next()
        .and_then(|t| t.parse::<usize>().ok())
        .ok_or_else(invalid)?;
    if tokens.next().is_some() {
        return Err(invalid());
    }
    Ok((num_vars, num_clauses))
}

/// Parses a DIMACS CNF instance.
///
/// Comment lines are skipped and a `%` line ends the data. Unlike a lenient
/// reader, the header is mandatory and checked against the clauses actually
/// read: a clause may span several lines but must end with `0`.
///
/// # Errors
///
/// See [`DimacsError`].
pub fn parse_dimacs<R: BufRead>(reader: R) -> Result<Cnf, DimacsError> {
    let mut header: Option<(Variable, usize)> = None;
    let mut clauses = Vec::new();
    let mut pending: Vec<Literal> = Vec::new();
    let mut pending_line = 0;

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(DimacsError::Io)?;
        let line_no = index + 1;
        let mut tokens = line.split_whitespace().peekable();

        match tokens.peek() {
            Some(&"%") => break,
            None | Some(&"c") => continue,
            Some(&"p") => {
                if header.is_some() {
                    return Err(DimacsError::InvalidHeader { line: line_no });
                }
                header = Some(parse_header(tokens, line_no)?);
                continue;
            }
            Some(_) => {}
        }

        let (num_vars, _) = header.ok_or(DimacsError::MissingHeader)?;
        for token in tokens {
            let value = parse_literal(token, line_no)?;
            let Some(lit) = Literal::from_i32(value) else {
                if pending.is_empty() {
                    return Err(DimacsError::EmptyClause { line: line_no });
                }
                clauses.push(Clause::new(pending.drain(..)));
                continue;
            };
            if lit.variable() > num_vars {
                return Err(DimacsError::VariableOutOfRange {
                    line: line_no,
                    variable: lit.variable(),
                    max: num_vars,
                });
            }
            if pending.is_empty() {
                pending_line = line_no;
            }
            pending.push(lit);
        }
    }

    if !pending.is_empty() {
        return Err(DimacsError::UnterminatedClause { line: pending_line });
    }
    let (num_vars, declared) = header.ok_or(DimacsError::MissingHeader)?;
    if declared != clauses.len() {
        return Err(DimacsError::ClauseCountMismatch {
            declared,
            found: clauses.len(),
        });
    }
    Ok(Cnf::new(num_vars, clauses))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Satisfiable,
    Unsatisfiable,
    Unknown,
}

/// Parses solver output into a [`SolveOutcome`].
///
/// Every `v` line contributes its integers to the model. The verdict rules:
/// any model line means satisfiable; otherwise an `s UNSATISFIABLE` (or bare
/// `UNSAT`) line means unsatisfiable. Output with no verdict at all is an
/// error rather than an empty model, so a crashed solver is never mistaken for
/// an unsatisfiable instance.
///
/// # Errors
///
/// See [`DimacsError`].
pub fn parse_model<R: BufRead>(reader: R) -> Result<SolveOutcome, DimacsError> {
    let mut values = Vec::new();
    let mut saw_model = false;
    let mut status = None;
    let mut bare_literals = false;

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(DimacsError::Io)?;
        let line_no = index + 1;
        let mut tokens = line.split_whitespace();

        match tokens.next() {
            Some("v") => {
                saw_model = true;
                for token in tokens {
                    values.push(parse_literal(token, line_no)?);
                }
            }
            Some("s") => {
                status = Some(match tokens.next() {
                    Some("SATISFIABLE") => Status::Satisfiable,
                    Some("UNSATISFIABLE") => Status::Unsatisfiable,
                    _ => Status::Unknown,
                });
            }
            Some("SAT") => {
                status = Some(Status::Satisfiable);
                bare_literals = true;
            }
            Some("UNSAT") => status = Some(Status::Unsatisfiable),
            Some("INDET" | "INDETERMINATE") => status = Some(Status::Unknown),
            Some(first) if bare_literals => {
                saw_model = true;
                values.push(parse_literal(first, line_no)?);
                for token in tokens {
                    values.push(parse_literal(token, line_no)?);
                }
            }
            _ => {}
        }
    }

    if saw_model {
        log::debug!("parsed model with {} literals", values.len());
        return Ok(SolveOutcome::Satisfiable(Solutions::from_literals(values)));
    }
    match status {
        Some(Status::Unsatisfiable) => Ok(SolveOutcome::Unsatisfiable),
        Some(Status::Satisfiable) => Err(DimacsError::MissingModel),
        Some(Status::Unknown) => Err(DimacsError::Indeterminate),
        None => Err(DimacsError::NoVerdict),
    }
}
