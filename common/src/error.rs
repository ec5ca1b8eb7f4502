use thiserror::Error;

use crate::grid::Point;

/// Problems with the shape or the tokens of an input grid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("Grid has no cells")]
    Empty,
    #[error("Row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Unrecognised cell '{token}' at ({row},{col})")]
    BadToken {
        row: usize,
        col: usize,
        token: String,
    },
}

/// A single cell token outside `T`, `G`, `_` and decimal clue values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unrecognised cell '{0}'")]
pub struct BadCell(pub String);

/// A clue that can no longer be met by the cells around it.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Cell {point} requires {clue} traps, but has {traps} traps and {unknowns} unknowns")]
pub struct ClueViolation {
    pub point: Point,
    pub clue: u8,
    pub traps: usize,
    pub unknowns: usize,
}

/// Raised by the compiler when a clue's adjusted trap count falls outside
/// `[0, unknowns]`. No partial clause set accompanies it.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Unsatisfiable encoding: {0}")]
pub struct Unsatisfiable(pub ClueViolation);

#[derive(Error, Debug)]
pub enum SolveError {
    #[error("Grid is invalid: {0}")]
    InvalidGrid(ClueViolation),
    #[error(transparent)]
    Unsatisfiable(#[from] Unsatisfiable),
    #[error("{count} variables exceed the enumeration limit of {limit}")]
    TooManyVariables { count: usize, limit: usize },
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}
