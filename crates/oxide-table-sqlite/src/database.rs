//! The database facade: schema cache, table handles and guarded DDL.

use std::fmt;
use std::sync::{Arc, OnceLock};

use oxide_table_core::{ColumnInfo, Introspect, SchemaCache, StatementContext, Table};
use tracing::{debug, info, warn};

use crate::config::DatabaseConfig;
use crate::dialect::{create_table_sql, drop_table_sql};
use crate::error::{DatabaseError, Result};
use crate::executor::SqliteExecutor;

/// An open SQLite database.
///
/// Owns the shared [`SqliteExecutor`] and the schema cache that table
/// handles are built from. Creating and dropping tables requires the
/// passphrase installed with [`Database::set_passphrase`].
pub struct Database {
    executor: Arc<SqliteExecutor>,
    schema: SchemaCache,
    passphrase: OnceLock<String>,
}

impl fmt::Debug for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Database")
            .field("schema", &self.schema)
            .field("passphrase_set", &self.passphrase.get().is_some())
            .finish_non_exhaustive()
    }
}

impl Database {
    /// Connects using `config` and loads the schema cache.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let options = config.connect_options()?;
        let executor = SqliteExecutor::connect_with(&options).await?;
        let database = Self::with_executor(executor).await?;
        if let Some(secret) = &config.passphrase {
            database.set_passphrase(secret.clone())?;
        }
        info!(url = %config.url, tables = database.schema.len(), "Database opened");
        Ok(database)
    }

    /// Opens a private in-memory database.
    pub async fn open_in_memory() -> Result<Self> {
        Self::connect(&DatabaseConfig::in_memory()).await
    }

    /// Wraps an existing execution handle and loads the schema cache.
    pub async fn with_executor(executor: SqliteExecutor) -> Result<Self> {
        let mut database = Self {
            executor: Arc::new(executor),
            schema: SchemaCache::new(),
            passphrase: OnceLock::new(),
        };
        database.refresh().await?;
        Ok(database)
    }

    /// Returns the shared execution handle.
    #[must_use]
    pub const fn executor(&self) -> &Arc<SqliteExecutor> {
        &self.executor
    }

    /// Installs the administrative passphrase. Only the first call succeeds.
    pub fn set_passphrase(&self, secret: impl Into<String>) -> Result<()> {
        self.passphrase
            .set(secret.into())
            .map_err(|_| DatabaseError::AlreadyConfigured)?;
        info!("Passphrase configured");
        Ok(())
    }

    /// Checks a secret against the installed passphrase.
    pub fn is_admin(&self, secret: &str) -> Result<bool> {
        self.passphrase
            .get()
            .map(|passphrase| passphrase == secret)
            .ok_or(DatabaseError::NotConfigured)
    }

    fn authorize(&self, secret: &str) -> Result<()> {
        if self.is_admin(secret)? {
            Ok(())
        } else {
            warn!("Rejected administrative request");
            Err(DatabaseError::Unauthorized)
        }
    }

    /// Rebuilds the schema cache from the engine.
    pub async fn refresh(&mut self) -> Result<()> {
        self.schema.refresh(&*self.executor).await?;
        Ok(())
    }

    /// Returns the schema cache as of the last refresh.
    #[must_use]
    pub const fn schema(&self) -> &SchemaCache {
        &self.schema
    }

    /// Refreshes the cache, then reports whether `name` exists.
    pub async fn table_exists(&mut self, name: &str) -> Result<bool> {
        self.refresh().await?;
        Ok(self.schema.contains(name))
    }

    /// Returns a statement entry point for a cached table.
    pub fn table(&self, name: &str) -> oxide_table_core::Result<Table<SqliteExecutor>> {
        let schema = self.schema.schema(name)?;
        Ok(Table::new(StatementContext::new(
            Arc::clone(&self.executor),
            schema,
        )))
    }

    /// Returns the cached table names, sorted.
    #[must_use]
    pub fn table_names(&self) -> Vec<String> {
        self.schema.table_names().map(str::to_string).collect()
    }

    /// Reads full column metadata for `name` straight from the engine.
    pub async fn table_info(&self, name: &str) -> Result<Vec<ColumnInfo>> {
        let columns = self.executor.describe_table(name).await?;
        if columns.is_empty() {
            return Err(oxide_table_core::Error::UnknownTable(name.to_string()).into());
        }
        Ok(columns)
    }

    /// Creates a table from `(column, type)` pairs.
    ///
    /// Returns `true` only when the table did not exist before and does now.
    pub async fn create_table<I, K, V>(&mut self, name: &str, columns: I, secret: &str) -> Result<bool>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.authorize(secret)?;
        let created = self
            .executor
            .apply_ddl(&create_table_sql(name, columns), name, true)
            .await?;
        self.refresh().await?;
        if created {
            info!(table = %name, "Table created");
        } else {
            warn!(table = %name, "Table already exists");
        }
        Ok(created)
    }

    /// Drops a table.
    ///
    /// Returns `true` only when the table existed before and is gone now.
    /// An absent table is reported without sending the drop to the engine.
    pub async fn drop_table(&mut self, name: &str, secret: &str) -> Result<bool> {
        self.authorize(secret)?;
        let dropped = self
            .executor
            .apply_ddl(&drop_table_sql(name), name, false)
            .await?;
        self.refresh().await?;
        if dropped {
            info!(table = %name, "Table dropped");
        } else {
            warn!(table = %name, "Table does not exist");
        }
        Ok(dropped)
    }

    /// Consumes the handle and closes the connection when no table handle
    /// still shares it.
    pub async fn close(self) -> Result<()> {
        match Arc::try_unwrap(self.executor) {
            Ok(executor) => executor.close().await?,
            Err(_) => debug!("Connection still shared, leaving it open"),
        }
        Ok(())
    }
}
