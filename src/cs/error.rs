use thiserror::Error;

/// Errors raised while building an exact cover problem.
///
/// A search that finds no exact cover is not an error; it is reported as a
/// negative result by the solver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("row {row} names column {column}, but there are only {cols} columns")]
    ColumnOutOfRange { row: usize, column: usize, cols: usize },

    #[error("row {row} names column {column} more than once")]
    DuplicateColumn { row: usize, column: usize },
}

/// Result type for exact cover construction.
pub type Result<T> = std::result::Result<T, Error>;
