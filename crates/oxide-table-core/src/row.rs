//! Result rows.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::value::SqlValue;

/// A result row: column names mapped to values, in the order the columns
/// were requested.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    entries: Vec<(String, SqlValue)>,
}

impl Row {
    /// Creates an empty row.
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: vec![] }
    }

    /// Creates a row from `(column, value)` pairs, keeping their order.
    #[must_use]
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, SqlValue)>,
        K: Into<String>,
    {
        Self {
            entries: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Maps engine values positionally onto column names.
    pub(crate) fn from_columns(columns: &[String], values: Vec<SqlValue>) -> Self {
        Self {
            entries: columns.iter().cloned().zip(values).collect(),
        }
    }

    /// Returns the value of a column.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.entries
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Iterates over column names in order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Iterates over values in column order.
    pub fn values(&self) -> impl Iterator<Item = &SqlValue> {
        self.entries.iter().map(|(_, value)| value)
    }

    /// Iterates over `(column, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the row has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consumes the row, returning its values in column order.
    #[must_use]
    pub fn into_values(self) -> Vec<SqlValue> {
        self.entries.into_iter().map(|(_, value)| value).collect()
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apple() -> Row {
        Row::from_pairs([
            ("id", SqlValue::Int(1)),
            ("name", SqlValue::Text(String::from("apple"))),
        ])
    }

    #[test]
    fn test_lookup_by_name() {
        let row = apple();
        assert_eq!(row.get("id"), Some(&SqlValue::Int(1)));
        assert_eq!(row.get("price"), None);
        assert_eq!(row.len(), 2);
    }

    #[test]
    fn test_column_order_is_preserved() {
        let row = Row::from_columns(
            &[String::from("name"), String::from("id")],
            vec![SqlValue::Text(String::from("apple")), SqlValue::Int(1)],
        );
        assert_eq!(row.columns().collect::<Vec<_>>(), vec!["name", "id"]);
        assert_ne!(row, apple());
    }

    #[test]
    fn test_serialize_as_json_object() {
        let json = serde_json::to_string(&apple()).unwrap();
        assert_eq!(json, r#"{"id":1,"name":"apple"}"#);
    }
}
