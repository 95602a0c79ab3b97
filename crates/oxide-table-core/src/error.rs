//! Error types for statement building and execution.

use thiserror::Error;

/// Errors raised while building or executing a statement.
///
/// Every variant except [`Error::Execution`] is raised before any SQL
/// reaches the engine.
#[derive(Debug, Error)]
pub enum Error {
    /// The table is not present in the schema cache.
    #[error("there is no table named `{0}`")]
    UnknownTable(String),

    /// A referenced column does not exist in the table.
    #[error("there is no column named `{column}` in table `{table}`")]
    InvalidColumn {
        /// Table the column was looked up in.
        table: String,
        /// The offending column name.
        column: String,
    },

    /// A row or value list does not match the expected column count.
    #[error("row {row}: expected {expected} values, {got} given instead")]
    ArityMismatch {
        /// Index of the first offending row (0 for assignments).
        row: usize,
        /// Number of values the statement needs.
        expected: usize,
        /// Number of values supplied.
        got: usize,
    },

    /// The engine rejected the statement.
    #[error("execution failed: {0}")]
    Execution(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Wraps an engine error.
    pub fn execution<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Execution(Box::new(err))
    }
}

/// Result type alias for statement operations.
pub type Result<T> = std::result::Result<T, Error>;
