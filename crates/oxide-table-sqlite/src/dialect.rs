//! SQLite-specific SQL text for the administrative statements.

use oxide_table_core::quote_identifier;

/// Renders `CREATE TABLE IF NOT EXISTS` from `(column, type)` pairs.
///
/// The type text is passed through as written (e.g. `INTEGER PRIMARY KEY`).
pub(crate) fn create_table_sql<I, K, V>(table: &str, columns: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let defs: Vec<String> = columns
        .into_iter()
        .map(|(name, ty)| {
            let ty = ty.as_ref().trim();
            if ty.is_empty() {
                quote_identifier(name.as_ref())
            } else {
                format!("{} {ty}", quote_identifier(name.as_ref()))
            }
        })
        .collect();
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        quote_identifier(table),
        defs.join(", ")
    )
}

/// Renders `DROP TABLE`.
pub(crate) fn drop_table_sql(table: &str) -> String {
    format!("DROP TABLE {}", quote_identifier(table))
}

/// Renders `PRAGMA table_info`.
pub(crate) fn table_info_sql(table: &str) -> String {
    format!("PRAGMA table_info({})", quote_identifier(table))
}
