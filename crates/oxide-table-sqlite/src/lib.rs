//! # oxide-table-sqlite
//!
//! SQLite backend for `oxide-table-core`.
//!
//! This crate provides:
//! - [`SqliteExecutor`], one sqlx connection that runs statements and
//!   implements schema introspection
//! - [`Database`], which keeps the schema cache, hands out [`Table`]
//!   entry points and guards `CREATE TABLE` / `DROP TABLE` behind a passphrase
//! - [`DatabaseConfig`] for connection settings
//!
//! ## Example
//!
//! ```rust,no_run
//! use oxide_table_sqlite::prelude::*;
//!
//! # async fn run() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let mut db = Database::connect(&DatabaseConfig::default().passphrase("lorem-ipsum")).await?;
//! db.create_table(
//!     "tbl_fruit",
//!     [("id", "INTEGER PRIMARY KEY"), ("name", "TEXT"), ("price", "INTEGER"), ("stock", "INTEGER")],
//!     "lorem-ipsum",
//! )
//! .await?;
//!
//! let fruit = db.table("tbl_fruit")?;
//! fruit.insert([(1, "apple", 500, 5), (2, "banana", 400, 150)])?.execute().await?;
//!
//! let low_stock = fruit.retrieve_all().filter("stock < ?", (50,)).execute().await?;
//! assert_eq!(low_stock.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod database;
mod dialect;
pub mod error;
pub mod executor;
mod introspect;

pub use config::{DatabaseConfig, DEFAULT_DATABASE_URL, IN_MEMORY_URL};
pub use database::Database;
pub use error::{DatabaseError, Result};
pub use executor::SqliteExecutor;
pub use oxide_table_core::Table;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::DatabaseConfig;
    pub use crate::database::Database;
    pub use crate::error::DatabaseError;
    pub use crate::executor::SqliteExecutor;
    pub use oxide_table_core::prelude::*;
}
