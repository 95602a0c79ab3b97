//! Execution handle trait.
//!
//! The core never talks to an engine directly. Driver crates implement
//! [`Executor`] over their connection type.

use crate::error::{Error, Result};
use crate::value::SqlValue;

/// The capability the builders need from the underlying engine.
#[allow(async_fn_in_trait)]
pub trait Executor {
    /// Error type reported by the engine.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Runs one write statement per parameter row as a single unit and
    /// returns the summed affected-row count.
    ///
    /// The unit commits when the count is above zero and rolls back
    /// otherwise, or when any row fails. No other statement on the same
    /// handle may run between the first row and the commit or rollback.
    async fn write(
        &self,
        sql: &str,
        rows: &[Vec<SqlValue>],
    ) -> std::result::Result<u64, Self::Error>;

    /// Runs a query and returns every result row as positional values.
    async fn fetch_all(
        &self,
        sql: &str,
        params: &[SqlValue],
    ) -> std::result::Result<Vec<Vec<SqlValue>>, Self::Error>;
}

/// Runs a write and reports whether it changed anything.
pub(crate) async fn apply_write<E: Executor>(
    executor: &E,
    sql: &str,
    rows: &[Vec<SqlValue>],
) -> Result<bool> {
    let affected = executor.write(sql, rows).await.map_err(Error::execution)?;
    Ok(affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockExecutor;

    #[tokio::test]
    async fn test_affected_rows_commit() {
        let mock = MockExecutor::new();
        mock.push_affected(2);

        assert!(apply_write(&mock, "UPDATE t SET a = ?", &[vec![SqlValue::Int(1)]])
            .await
            .unwrap());
        assert_eq!(mock.commits(), 1);
        assert_eq!(mock.rollbacks(), 0);
    }

    #[tokio::test]
    async fn test_zero_rows_roll_back() {
        let mock = MockExecutor::new();

        assert!(!apply_write(&mock, "UPDATE t SET a = ?", &[vec![SqlValue::Int(1)]])
            .await
            .unwrap());
        assert_eq!(mock.commits(), 0);
        assert_eq!(mock.rollbacks(), 1);
    }

    #[tokio::test]
    async fn test_engine_error_rolls_back_and_propagates() {
        let mock = MockExecutor::new();
        mock.fail_next("no such table");

        let err = apply_write(&mock, "UPDATE t SET a = ?", &[vec![SqlValue::Int(1)]])
            .await
            .unwrap_err();

        assert!(err.to_string().contains("no such table"));
        assert_eq!(mock.rollbacks(), 1);
    }
}
