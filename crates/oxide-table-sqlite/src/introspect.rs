//! Schema introspection for SQLite.

use oxide_table_core::{ColumnInfo, Introspect};
use sqlx::Row;

use crate::dialect::table_info_sql;
use crate::executor::SqliteExecutor;

/// Lists user tables; SQLite's internal `sqlite_%` tables are skipped.
const LIST_TABLES_SQL: &str =
    "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name";

impl Introspect for SqliteExecutor {
    type Error = sqlx::Error;

    async fn list_tables(&self) -> Result<Vec<String>, sqlx::Error> {
        let mut conn = self.lock().await;
        let rows: Vec<(String,)> = sqlx::query_as(LIST_TABLES_SQL)
            .fetch_all(&mut *conn)
            .await?;
        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    async fn describe_table(&self, table: &str) -> Result<Vec<ColumnInfo>, sqlx::Error> {
        let mut conn = self.lock().await;
        let rows = sqlx::query(&table_info_sql(table))
            .fetch_all(&mut *conn)
            .await?;

        let mut columns = rows
            .iter()
            .map(|row| {
                let position: i64 = row.try_get("cid")?;
                Ok(ColumnInfo {
                    position: usize::try_from(position).unwrap_or_default(),
                    name: row.try_get("name")?,
                    declared_type: row.try_get("type")?,
                    not_null: row.try_get::<i64, _>("notnull")? != 0,
                    default_value: row.try_get("dflt_value")?,
                    primary_key: row.try_get::<i64, _>("pk")? != 0,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;
        columns.sort_by_key(|c| c.position);
        Ok(columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_and_describe() {
        let executor = SqliteExecutor::in_memory().await.unwrap();
        executor
            .execute(
                "CREATE TABLE tbl_fruit (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL, price INTEGER DEFAULT 0)",
                &[],
            )
            .await
            .unwrap();

        // AUTOINCREMENT creates sqlite_sequence, which must not show up.
        assert_eq!(executor.list_tables().await.unwrap(), vec!["tbl_fruit"]);

        let columns = executor.describe_table("tbl_fruit").await.unwrap();
        let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["id", "name", "price"]);
        assert!(columns[0].primary_key);
        assert!(columns[1].not_null);
        assert_eq!(columns[2].declared_type, "INTEGER");
        assert_eq!(columns[2].default_value.as_deref(), Some("0"));
    }

    #[tokio::test]
    async fn test_describe_missing_table_is_empty() {
        let executor = SqliteExecutor::in_memory().await.unwrap();
        assert!(executor.describe_table("nope").await.unwrap().is_empty());
    }
}
