//! INSERT builder.

use std::sync::Arc;

use tracing::debug;

use super::context::StatementContext;
use super::{quote_identifier, quote_list};
use crate::error::{Error, Result};
use crate::executor::{apply_write, Executor};
use crate::value::SqlValue;

/// A validated `INSERT INTO <table> (<all columns>) VALUES (...)`, run once
/// per row.
///
/// Rows always cover every column in declared order.
#[derive(Debug)]
pub struct Insert<E> {
    context: Arc<StatementContext<E>>,
    rows: Vec<Vec<SqlValue>>,
}

impl<E> Insert<E> {
    /// Checks every row against the table's column count.
    pub(crate) fn new(context: Arc<StatementContext<E>>, rows: Vec<Vec<SqlValue>>) -> Result<Self> {
        let expected = context.columns().len();
        if let Some((row, values)) = rows
            .iter()
            .enumerate()
            .find(|(_, values)| values.len() != expected)
        {
            return Err(Error::ArityMismatch {
                row,
                expected,
                got: values.len(),
            });
        }
        Ok(Self { context, rows })
    }

    /// Returns the rows to insert.
    #[must_use]
    pub fn rows(&self) -> &[Vec<SqlValue>] {
        &self.rows
    }

    /// Renders the INSERT statement shared by every row.
    #[must_use]
    pub fn render(&self) -> String {
        let columns = self.context.columns();
        let placeholders = vec![SqlValue::placeholder(); columns.len()];
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            quote_identifier(self.context.table()),
            quote_list(columns),
            placeholders.join(", ")
        )
    }
}

impl<E: Executor> Insert<E> {
    /// Inserts every row; commits and returns `true` if any row landed.
    pub async fn execute(&self) -> Result<bool> {
        let sql = self.render();
        debug!(table = %self.context.table(), sql = %sql, rows = self.rows.len(), "Executing SQL");

        apply_write(self.context.executor(), &sql, &self.rows).await
    }
}
