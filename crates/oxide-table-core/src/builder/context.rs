//! Shared statement context.

use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::schema::TableSchema;

/// Everything a builder chain needs to know about its table.
///
/// Immutable once built; shared behind an `Arc` by every builder the
/// [`Table`](super::Table) hands out.
pub struct StatementContext<E> {
    executor: Arc<E>,
    table: String,
    columns: Vec<String>,
}

impl<E> StatementContext<E> {
    /// Creates a context for one table from its cached schema.
    #[must_use]
    pub fn new(executor: Arc<E>, schema: &TableSchema) -> Self {
        Self {
            executor,
            table: schema.name().to_string(),
            columns: schema.columns().to_vec(),
        }
    }

    /// Returns the execution handle.
    #[must_use]
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Returns the table name.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Returns the table's columns in declared order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Checks that every name is a column of the table.
    pub fn validate_columns(&self, names: &[String]) -> Result<()> {
        match names.iter().find(|name| !self.columns.contains(name)) {
            Some(missing) => Err(Error::InvalidColumn {
                table: self.table.clone(),
                column: missing.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl<E> fmt::Debug for StatementContext<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatementContext")
            .field("table", &self.table)
            .field("columns", &self.columns)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> StatementContext<()> {
        let schema = TableSchema::new("tbl_fruit", ["id", "name"]);
        StatementContext::new(Arc::new(()), &schema)
    }

    #[test]
    fn test_validate_known_columns() {
        let ctx = context();
        assert!(ctx.validate_columns(&[String::from("name")]).is_ok());
        assert!(ctx.validate_columns(&[]).is_ok());
    }

    #[test]
    fn test_validate_reports_first_unknown_column() {
        let err = context()
            .validate_columns(&[
                String::from("id"),
                String::from("colour"),
                String::from("size"),
            ])
            .unwrap_err();

        assert!(matches!(
            err,
            Error::InvalidColumn { ref table, ref column } if table == "tbl_fruit" && column == "colour"
        ));
    }
}
