//! # oxide-table-core
//!
//! Chainable, schema-validated SQL statement builders scoped to one table.
//!
//! This crate provides:
//! - A [`SchemaCache`] of table -> ordered column names, filled through the
//!   [`Introspect`] trait
//! - A [`Table`] entry point producing `SELECT`, `INSERT` and `UPDATE`
//!   builders whose column names are checked before any SQL is sent
//! - A [`Filter`] extension adding `WHERE` with positional parameters bound
//!   after the statement's own values
//! - The [`Executor`] trait that driver crates implement over a connection
//!
//! ## Building statements
//!
//! Rendering is pure; only `execute` reaches the engine:
//!
//! ```rust
//! use std::sync::Arc;
//! use oxide_table_core::{StatementContext, Table, TableSchema};
//!
//! let schema = TableSchema::new("tbl_fruit", ["id", "name", "price", "stock"]);
//! let table = Table::new(StatementContext::new(Arc::new(()), &schema));
//!
//! let sql = table.retrieve(["name", "stock"]).unwrap().render();
//! assert_eq!(sql, r#"SELECT "name", "stock" FROM "tbl_fruit""#);
//!
//! // Unknown columns are rejected up front.
//! assert!(table.retrieve("colour").is_err());
//! ```

pub mod builder;
pub mod error;
pub mod executor;
pub mod row;
pub mod schema;
pub mod value;

#[cfg(test)]
pub(crate) mod testing;

pub use builder::{
    quote_identifier, Assign, Clause, Filter, Insert, Retrieve, Selection, StatementContext, Table,
};
pub use error::{Error, Result};
pub use executor::Executor;
pub use row::Row;
pub use schema::{ColumnInfo, Introspect, SchemaCache, TableSchema};
pub use value::{SqlValue, ToSqlValue, ToSqlValues};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::builder::{Clause, Selection, Table};
    pub use crate::error::{Error, Result};
    pub use crate::executor::Executor;
    pub use crate::row::Row;
    pub use crate::schema::{Introspect, SchemaCache};
    pub use crate::value::{SqlValue, ToSqlValue, ToSqlValues};
}
