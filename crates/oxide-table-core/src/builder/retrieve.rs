//! SELECT builder.

use std::sync::Arc;

use tracing::debug;

use super::context::StatementContext;
use super::filter::Filter;
use super::{quote_identifier, quote_list, Clause};
use crate::error::{Error, Result};
use crate::executor::Executor;
use crate::row::Row;
use crate::value::{SqlValue, ToSqlValues};

/// Which columns a [`Retrieve`] selects.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// Every column, in declared order.
    #[default]
    All,
    /// The named columns, in the given order.
    Columns(Vec<String>),
}

impl Selection {
    /// Selects every column.
    #[must_use]
    pub const fn all() -> Self {
        Self::All
    }

    /// Selects the named columns.
    pub fn columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Columns(columns.into_iter().map(Into::into).collect())
    }
}

impl From<&str> for Selection {
    fn from(column: &str) -> Self {
        Self::Columns(vec![column.to_string()])
    }
}

impl From<&[&str]> for Selection {
    fn from(columns: &[&str]) -> Self {
        Self::columns(columns.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for Selection {
    fn from(columns: [&str; N]) -> Self {
        Self::columns(columns)
    }
}

impl From<Vec<&str>> for Selection {
    fn from(columns: Vec<&str>) -> Self {
        Self::columns(columns)
    }
}

impl From<Vec<String>> for Selection {
    fn from(columns: Vec<String>) -> Self {
        Self::Columns(columns)
    }
}

/// A validated `SELECT <columns> FROM <table>`.
#[derive(Debug)]
pub struct Retrieve<E> {
    context: Arc<StatementContext<E>>,
    columns: Vec<String>,
}

impl<E> Retrieve<E> {
    /// Resolves and validates the selection.
    ///
    /// `All` and an empty column list both select every column.
    pub(crate) fn new(context: Arc<StatementContext<E>>, selection: Selection) -> Result<Self> {
        match selection {
            Selection::Columns(columns) if !columns.is_empty() => {
                context.validate_columns(&columns)?;
                Ok(Self { context, columns })
            }
            _ => Ok(Self::all(context)),
        }
    }

    /// Selects every column of the table.
    pub(crate) fn all(context: Arc<StatementContext<E>>) -> Self {
        let columns = context.columns().to_vec();
        Self { context, columns }
    }

    /// Returns the selected columns, in result order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Renders the SELECT statement.
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "SELECT {} FROM {}",
            quote_list(&self.columns),
            quote_identifier(self.context.table())
        )
    }

    /// Adds a WHERE condition with its positional parameters.
    #[must_use]
    pub fn filter<P: ToSqlValues>(self, condition: &str, params: P) -> Filter<Self>
    where
        E: Executor,
    {
        Filter::new(self, condition, params.to_sql_values())
    }
}

impl<E: Executor> Retrieve<E> {
    /// Runs the query and maps each row onto the selected columns.
    pub async fn execute(&self) -> Result<Vec<Row>> {
        self.dispatch(&self.render(), &[]).await
    }
}

impl<E: Executor> Clause for Retrieve<E> {
    type Output = Vec<Row>;

    fn render(&self) -> String {
        Self::render(self)
    }

    fn params(&self) -> Vec<SqlValue> {
        vec![]
    }

    async fn dispatch(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>> {
        debug!(table = %self.context.table(), sql = %sql, params = params.len(), "Executing SQL");
        let rows = self
            .context
            .executor()
            .fetch_all(sql, params)
            .await
            .map_err(Error::execution)?;

        Ok(rows
            .into_iter()
            .map(|values| Row::from_columns(&self.columns, values))
            .collect())
    }
}
