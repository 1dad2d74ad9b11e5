use crate::{Cell, Col, Row};

/// Error for [`Board`](crate::Board) construction
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// Height or width is zero
    #[error("board must have at least one row and one column, found {height}x{width}")]
    Empty { height: usize, width: usize },
    /// More mines requested than the board has cells
    #[error("a {height}x{width} board holds at most {} mines, requested {mines}", .height * .width)]
    TooManyMines {
        height: usize,
        width: usize,
        mines: usize,
    },
    /// A mine placed outside the board
    #[error("mine at {0:?} lies outside the board")]
    OutOfBounds(Cell),
}

/// Error for parsing a [`Configuration`](crate::Configuration)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("configuration contains no squares")]
    Empty,
    /// Square label is none of `_`, `*`, `s`, `?` or a number
    #[error("invalid square label `{label}` at row {row}, column {col}")]
    InvalidSquare { row: Row, col: Col, label: String },
    /// A number of mines above 8
    #[error("invalid number of mines `{label}` at row {row}, column {col}")]
    InvalidLabel { row: Row, col: Col, label: usize },
    /// A row whose length differs from the first one
    #[error("row {row} has {found} squares, expected {expected}")]
    RaggedRow {
        row: Row,
        expected: usize,
        found: usize,
    },
    #[error("more than one probe, found {0:?} and {1:?}")]
    MultipleProbes(Cell, Cell),
}

/// Error for the satisfiability check of a [`Configuration`](crate::Configuration)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    /// Probe coordinates outside the configuration
    #[error("probe {0:?} lies outside the configuration")]
    OutOfBounds(Cell),
    /// No assignment of mines satisfies all clues
    #[error("configuration is inconsistent, no placement of mines satisfies every clue")]
    Inconsistent,
    #[error("SAT solver failed: {0}")]
    Solver(String),
}
