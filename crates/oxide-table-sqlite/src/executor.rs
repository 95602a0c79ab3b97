//! SQLite execution handle.
//!
//! One sqlx connection behind an async mutex. Every write opens a
//! transaction, runs its rows and settles it while holding the lock, so
//! concurrent writes never share a transaction.

use std::fmt;
use std::str::FromStr;

use oxide_table_core::{Executor, SqlValue};
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{ConnectOptions, Connection, Row, Sqlite, TypeInfo, ValueRef};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

const TABLE_PRESENT_SQL: &str =
    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?";

/// The shared execution handle for one SQLite database.
pub struct SqliteExecutor {
    conn: Mutex<SqliteConnection>,
}

impl fmt::Debug for SqliteExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteExecutor").finish_non_exhaustive()
    }
}

impl SqliteExecutor {
    /// Wraps an open connection.
    #[must_use]
    pub fn new(conn: SqliteConnection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Connects with explicit options.
    pub async fn connect_with(options: &SqliteConnectOptions) -> Result<Self, sqlx::Error> {
        let conn = options.connect().await?;
        Ok(Self::new(conn))
    }

    /// Connects to a database URL such as `sqlite:my_database.db`.
    pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        Self::connect_with(&options).await
    }

    /// Opens a private in-memory database.
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        Self::connect("sqlite::memory:").await
    }

    /// Runs one statement in autocommit mode and returns the affected-row
    /// count. Builders go through [`Executor::write`] instead.
    pub async fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<u64, sqlx::Error> {
        debug!(sql = %sql, params = params.len(), "Executing SQL");
        let mut conn = self.conn.lock().await;
        let result = bind_params(sqlx::query(sql), params)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }

    /// Runs a DDL statement in its own transaction.
    ///
    /// Commits and returns `true` only when `table` goes from the opposite
    /// of `present_after` to `present_after`. When the table is already in
    /// the target state nothing is sent and `false` is returned.
    pub(crate) async fn apply_ddl(
        &self,
        sql: &str,
        table: &str,
        present_after: bool,
    ) -> Result<bool, sqlx::Error> {
        let mut conn = self.conn.lock().await;
        let mut tx = conn.begin().await?;
        if table_present(&mut tx, table).await? == present_after {
            tx.rollback().await?;
            return Ok(false);
        }

        debug!(sql = %sql, "Executing DDL");
        let outcome = match sqlx::query(sql).execute(&mut *tx).await {
            Ok(_) => table_present(&mut tx, table).await,
            Err(err) => Err(err),
        };
        match outcome {
            Ok(present) if present == present_after => {
                tx.commit().await?;
                Ok(true)
            }
            Ok(_) => {
                tx.rollback().await?;
                Ok(false)
            }
            Err(err) => {
                if let Err(rollback) = tx.rollback().await {
                    warn!(error = %rollback, "Rollback after failed DDL also failed");
                }
                Err(err)
            }
        }
    }

    /// Closes the connection.
    pub async fn close(self) -> Result<(), sqlx::Error> {
        self.conn.into_inner().close().await
    }

    /// Locks the connection for read-only statements such as introspection.
    pub(crate) async fn lock(&self) -> MutexGuard<'_, SqliteConnection> {
        self.conn.lock().await
    }
}

async fn table_present(conn: &mut SqliteConnection, table: &str) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar(TABLE_PRESENT_SQL)
        .bind(table)
        .fetch_one(conn)
        .await?;
    Ok(count > 0)
}

async fn run_rows(
    conn: &mut SqliteConnection,
    sql: &str,
    rows: &[Vec<SqlValue>],
) -> Result<u64, sqlx::Error> {
    let mut affected = 0;
    for params in rows {
        let result = bind_params(sqlx::query(sql), params)
            .execute(&mut *conn)
            .await?;
        affected += result.rows_affected();
    }
    Ok(affected)
}

impl Executor for SqliteExecutor {
    type Error = sqlx::Error;

    async fn write(&self, sql: &str, rows: &[Vec<SqlValue>]) -> Result<u64, sqlx::Error> {
        debug!(sql = %sql, rows = rows.len(), "Executing write");
        let mut conn = self.conn.lock().await;
        let mut tx = conn.begin().await?;

        match run_rows(&mut tx, sql, rows).await {
            Ok(affected) if affected > 0 => {
                tx.commit().await?;
                debug!(affected, "Transaction committed");
                Ok(affected)
            }
            Ok(_) => {
                tx.rollback().await?;
                debug!("No rows affected, transaction rolled back");
                Ok(0)
            }
            Err(err) => {
                if let Err(rollback) = tx.rollback().await {
                    warn!(error = %rollback, "Rollback after failed write also failed");
                }
                debug!(error = %err, "Transaction rolled back");
                Err(err)
            }
        }
    }

    async fn fetch_all(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<Vec<SqlValue>>, sqlx::Error> {
        debug!(sql = %sql, params = params.len(), "Fetching rows");
        let mut conn = self.conn.lock().await;
        let rows = bind_params(sqlx::query(sql), params)
            .fetch_all(&mut *conn)
            .await?;
        rows.iter().map(decode_row).collect()
    }
}

fn bind_params<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    params: &[SqlValue],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for param in params {
        query = bind_param(query, param.clone());
    }
    query
}

/// Binds a SqlValue parameter to a raw query.
fn bind_param<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    value: SqlValue,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        SqlValue::Null => query.bind(Option::<i64>::None),
        SqlValue::Bool(b) => query.bind(b),
        SqlValue::Int(i) => query.bind(i),
        SqlValue::Float(f) => query.bind(f),
        SqlValue::Text(s) => query.bind(s),
        SqlValue::Blob(b) => query.bind(b),
    }
}

fn decode_row(row: &SqliteRow) -> Result<Vec<SqlValue>, sqlx::Error> {
    (0..row.len()).map(|index| decode_value(row, index)).collect()
}

/// Decodes one value by its runtime storage class.
fn decode_value(row: &SqliteRow, index: usize) -> Result<SqlValue, sqlx::Error> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(SqlValue::Null);
    }

    let type_info = raw.type_info();
    let value = match type_info.name() {
        "INTEGER" | "BOOLEAN" => SqlValue::Int(row.try_get_unchecked(index)?),
        "REAL" => SqlValue::Float(row.try_get_unchecked(index)?),
        "BLOB" => SqlValue::Blob(row.try_get_unchecked(index)?),
        _ => SqlValue::Text(row.try_get_unchecked(index)?),
    };
    Ok(value)
}
