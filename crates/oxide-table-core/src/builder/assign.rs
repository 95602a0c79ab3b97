//! UPDATE ... SET builder.

use std::sync::Arc;

use tracing::debug;

use super::context::StatementContext;
use super::filter::Filter;
use super::{quote_identifier, Clause};
use crate::error::{Error, Result};
use crate::executor::{apply_write, Executor};
use crate::value::{SqlValue, ToSqlValues};

/// A validated `UPDATE <table> SET c1 = ?, c2 = ?`.
///
/// Without a filter every row of the table is updated.
#[derive(Debug)]
pub struct Assign<E> {
    context: Arc<StatementContext<E>>,
    columns: Vec<String>,
    values: Vec<SqlValue>,
}

impl<E> Assign<E> {
    /// Validates column names, then the value count.
    pub(crate) fn new(
        context: Arc<StatementContext<E>>,
        columns: Vec<String>,
        values: Vec<SqlValue>,
    ) -> Result<Self> {
        context.validate_columns(&columns)?;
        if columns.len() != values.len() {
            return Err(Error::ArityMismatch {
                row: 0,
                expected: columns.len(),
                got: values.len(),
            });
        }
        Ok(Self {
            context,
            columns,
            values,
        })
    }

    /// Returns the assigned columns.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the assigned values, in column order.
    #[must_use]
    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    /// Renders the UPDATE statement.
    #[must_use]
    pub fn render(&self) -> String {
        let set_parts: Vec<String> = self
            .columns
            .iter()
            .map(|column| format!("{} = {}", quote_identifier(column), SqlValue::placeholder()))
            .collect();
        format!(
            "UPDATE {} SET {}",
            quote_identifier(self.context.table()),
            set_parts.join(", ")
        )
    }

    /// Adds a WHERE condition; its parameters bind after the assigned values.
    #[must_use]
    pub fn filter<P: ToSqlValues>(self, condition: &str, params: P) -> Filter<Self>
    where
        E: Executor,
    {
        Filter::new(self, condition, params.to_sql_values())
    }
}

impl<E: Executor> Assign<E> {
    /// Updates every row; commits and returns `true` if any row changed.
    pub async fn execute(&self) -> Result<bool> {
        self.dispatch(&self.render(), &self.values).await
    }
}

impl<E: Executor> Clause for Assign<E> {
    type Output = bool;

    fn render(&self) -> String {
        Self::render(self)
    }

    fn params(&self) -> Vec<SqlValue> {
        self.values.clone()
    }

    async fn dispatch(&self, sql: &str, params: &[SqlValue]) -> Result<bool> {
        debug!(table = %self.context.table(), sql = %sql, params = params.len(), "Executing SQL");
        apply_write(self.context.executor(), sql, &[params.to_vec()]).await
    }
}
