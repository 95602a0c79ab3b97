//! Schema cache and introspection trait.
//!
//! Driver crates (oxide-table-sqlite, etc.) implement [`Introspect`] to read
//! the live schema. The [`SchemaCache`] keeps the table -> columns mapping
//! that every builder validates against.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{Error, Result};

/// One column as reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    /// Zero-based position in the table definition.
    pub position: usize,
    /// Column name.
    pub name: String,
    /// Declared type text (may be empty).
    pub declared_type: String,
    /// Whether the column is declared `NOT NULL`.
    pub not_null: bool,
    /// Default value expression, if any.
    pub default_value: Option<String>,
    /// Whether the column is part of the primary key.
    pub primary_key: bool,
}

impl ColumnInfo {
    /// Creates a nullable, non-key column description.
    #[must_use]
    pub fn new(position: usize, name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            position,
            name: name.into(),
            declared_type: declared_type.into(),
            not_null: false,
            default_value: None,
            primary_key: false,
        }
    }
}

/// Reads table names and column layouts from a live database.
///
/// Implementations live in driver crates.
#[allow(async_fn_in_trait)]
pub trait Introspect {
    /// Error type for introspection failures.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Lists the user tables.
    async fn list_tables(&self) -> std::result::Result<Vec<String>, Self::Error>;

    /// Describes a table's columns, ordered by position.
    async fn describe_table(&self, table: &str) -> std::result::Result<Vec<ColumnInfo>, Self::Error>;
}

/// A table name with its ordered column list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    name: String,
    columns: Vec<String>,
}

impl TableSchema {
    /// Creates a schema from column names in declared order.
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a schema from introspected columns, sorted by position.
    #[must_use]
    pub fn from_columns(name: impl Into<String>, mut columns: Vec<ColumnInfo>) -> Self {
        columns.sort_by_key(|c| c.position);
        Self::new(name, columns.into_iter().map(|c| c.name))
    }

    /// Returns the table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the column names in declared order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns `true` if the table has the column.
    #[must_use]
    pub fn contains(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }
}

/// Local copy of table -> column list, refreshed from the engine.
#[derive(Debug, Clone, Default)]
pub struct SchemaCache {
    tables: BTreeMap<String, TableSchema>,
}

impl SchemaCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the whole mapping from the engine.
    ///
    /// The previous mapping is kept if introspection fails part-way.
    pub async fn refresh<I: Introspect>(&mut self, introspector: &I) -> Result<()> {
        let names = introspector
            .list_tables()
            .await
            .map_err(Error::execution)?;

        let mut tables = BTreeMap::new();
        for name in names {
            let columns = introspector
                .describe_table(&name)
                .await
                .map_err(Error::execution)?;
            tables.insert(name.clone(), TableSchema::from_columns(name, columns));
        }

        debug!(tables = tables.len(), "Schema cache refreshed");
        self.tables = tables;
        Ok(())
    }

    /// Adds or replaces one table.
    pub fn insert(&mut self, schema: TableSchema) {
        self.tables.insert(schema.name.clone(), schema);
    }

    /// Returns the schema of a table.
    pub fn schema(&self, table: &str) -> Result<&TableSchema> {
        self.tables
            .get(table)
            .ok_or_else(|| Error::UnknownTable(table.to_string()))
    }

    /// Returns the ordered column list of a table.
    pub fn columns_of(&self, table: &str) -> Result<&[String]> {
        self.schema(table).map(TableSchema::columns)
    }

    /// Returns `true` if the table is cached.
    #[must_use]
    pub fn contains(&self, table: &str) -> bool {
        self.tables.contains_key(table)
    }

    /// Returns the cached table names, sorted.
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Returns the number of cached tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns `true` if no table is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
