//! Table entry point.

use std::sync::Arc;

use super::assign::Assign;
use super::context::StatementContext;
use super::insert::Insert;
use super::retrieve::{Retrieve, Selection};
use crate::error::Result;
use crate::value::{ToSqlValue, ToSqlValues};

/// Where every query chain starts: one table, three verbs.
///
/// Each call returns an independent builder sharing the same immutable
/// [`StatementContext`].
#[derive(Debug)]
pub struct Table<E> {
    context: Arc<StatementContext<E>>,
}

impl<E> Clone for Table<E> {
    fn clone(&self) -> Self {
        Self {
            context: Arc::clone(&self.context),
        }
    }
}

impl<E> Table<E> {
    /// Creates an entry point over a statement context.
    #[must_use]
    pub fn new(context: StatementContext<E>) -> Self {
        Self {
            context: Arc::new(context),
        }
    }

    /// Returns the table name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.context.table()
    }

    /// Returns the table's columns in declared order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        self.context.columns()
    }

    /// Starts a SELECT of the given columns.
    pub fn retrieve(&self, selection: impl Into<Selection>) -> Result<Retrieve<E>> {
        Retrieve::new(Arc::clone(&self.context), selection.into())
    }

    /// Starts a SELECT of every column.
    #[must_use]
    pub fn retrieve_all(&self) -> Retrieve<E> {
        Retrieve::all(Arc::clone(&self.context))
    }

    /// Starts an UPDATE of several columns.
    pub fn assign<C, V>(&self, columns: C, values: V) -> Result<Assign<E>>
    where
        C: IntoIterator,
        C::Item: Into<String>,
        V: ToSqlValues,
    {
        Assign::new(
            Arc::clone(&self.context),
            columns.into_iter().map(Into::into).collect(),
            values.to_sql_values(),
        )
    }

    /// Starts an UPDATE of a single column.
    pub fn assign_one(&self, column: &str, value: impl ToSqlValue) -> Result<Assign<E>> {
        Assign::new(
            Arc::clone(&self.context),
            vec![column.to_string()],
            vec![value.to_sql_value()],
        )
    }

    /// Starts an INSERT of full rows.
    pub fn insert<I>(&self, rows: I) -> Result<Insert<E>>
    where
        I: IntoIterator,
        I::Item: ToSqlValues,
    {
        Insert::new(
            Arc::clone(&self.context),
            rows.into_iter().map(ToSqlValues::to_sql_values).collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::schema::TableSchema;
    use crate::testing::{fruit_table, MockExecutor};

    #[test]
    fn test_table_exposes_schema() {
        let (_, table) = fruit_table();
        assert_eq!(table.name(), "tbl_fruit");
        assert_eq!(table.columns(), ["id", "name", "price", "stock"]);
    }

    #[test]
    fn test_builders_are_independent() {
        let (_, table) = fruit_table();
        let narrow = table.retrieve("name").unwrap();
        let wide = table.clone().retrieve_all();

        assert_eq!(narrow.render(), r#"SELECT "name" FROM "tbl_fruit""#);
        assert_eq!(wide.render(), r#"SELECT "id", "name", "price", "stock" FROM "tbl_fruit""#);
    }

    #[test]
    fn test_reserved_and_odd_names_render_quoted() {
        let schema = TableSchema::new("odd \"t\"", ["order", "my col"]);
        let table = Table::new(StatementContext::new(Arc::new(MockExecutor::new()), &schema));

        assert_eq!(
            table.retrieve_all().render(),
            r#"SELECT "order", "my col" FROM "odd ""t""""#
        );
        assert_eq!(
            table.insert([(1, "a")]).unwrap().render(),
            r#"INSERT INTO "odd ""t""" ("order", "my col") VALUES (?, ?)"#
        );
        assert_eq!(
            table.assign_one("order", 2).unwrap().render(),
            r#"UPDATE "odd ""t""" SET "order" = ?"#
        );
    }
}
