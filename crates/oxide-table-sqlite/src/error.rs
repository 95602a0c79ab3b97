//! Error types for the database facade.

use thiserror::Error;

/// Errors raised by [`Database`](crate::Database).
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// No administrative passphrase has been set.
    #[error("passphrase is not set, call `set_passphrase` first")]
    NotConfigured,

    /// The supplied passphrase does not match the configured one.
    #[error("the given passphrase does not match")]
    Unauthorized,

    /// The passphrase can only be set once per database handle.
    #[error("passphrase has already been set")]
    AlreadyConfigured,

    /// Statement building or execution error.
    #[error(transparent)]
    Query(#[from] oxide_table_core::Error),

    /// Database error from sqlx.
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// Result type alias for database operations.
pub type Result<T> = std::result::Result<T, DatabaseError>;
