//! SQL values and parameter handling.
//!
//! Every value reaching the engine travels as a positional parameter, never
//! inlined into the SQL text.

use serde::{Serialize, Serializer};

/// A SQL value that can be bound as a parameter or read back from a row.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// NULL value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// Text value.
    Text(String),
    /// Binary blob value.
    Blob(Vec<u8>),
}

impl SqlValue {
    /// Returns the parameter placeholder.
    #[must_use]
    pub const fn placeholder() -> &'static str {
        "?"
    }

    /// Returns `true` for [`SqlValue::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the integer payload, if any.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the text payload, if any.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl Serialize for SqlValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_none(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(n) => serializer.serialize_i64(*n),
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::Text(s) => serializer.serialize_str(s),
            Self::Blob(b) => serializer.serialize_bytes(b),
        }
    }
}

macro_rules! sql_value_from {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$ty> for SqlValue {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )+
    };
}

sql_value_from!(
    bool => Bool,
    i64 => Int,
    f64 => Float,
    String => Text,
    Vec<u8> => Blob,
);

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl<T: Into<Self>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// A single bindable value. Anything convertible into [`SqlValue`] is one.
pub trait ToSqlValue {
    /// Converts the value to a `SqlValue`.
    fn to_sql_value(self) -> SqlValue;
}

impl<T: Into<SqlValue>> ToSqlValue for T {
    fn to_sql_value(self) -> SqlValue {
        self.into()
    }
}

/// Trait for fixed-arity value sequences: insert rows, assigned values and
/// filter parameters.
///
/// Implemented for tuples of up to eight values, arrays, vectors and `()`.
///
/// ```rust
/// use oxide_table_core::value::{SqlValue, ToSqlValues};
///
/// let row = (None::<i64>, "apple", 500, 5).to_sql_values();
/// assert_eq!(row.len(), 4);
/// assert_eq!(row[0], SqlValue::Null);
/// ```
pub trait ToSqlValues {
    /// Converts the sequence to positional `SqlValue`s.
    fn to_sql_values(self) -> Vec<SqlValue>;
}

impl ToSqlValues for () {
    fn to_sql_values(self) -> Vec<SqlValue> {
        vec![]
    }
}

impl<T: ToSqlValue> ToSqlValues for Vec<T> {
    fn to_sql_values(self) -> Vec<SqlValue> {
        self.into_iter().map(ToSqlValue::to_sql_value).collect()
    }
}

impl<T: ToSqlValue, const N: usize> ToSqlValues for [T; N] {
    fn to_sql_values(self) -> Vec<SqlValue> {
        self.into_iter().map(ToSqlValue::to_sql_value).collect()
    }
}

macro_rules! impl_to_sql_values_for_tuple {
    ($($name:ident),+) => {
        impl<$($name: ToSqlValue),+> ToSqlValues for ($($name,)+) {
            #[allow(non_snake_case)]
            fn to_sql_values(self) -> Vec<SqlValue> {
                let ($($name,)+) = self;
                vec![$($name.to_sql_value()),+]
            }
        }
    };
}

impl_to_sql_values_for_tuple!(A);
impl_to_sql_values_for_tuple!(A, B);
impl_to_sql_values_for_tuple!(A, B, C);
impl_to_sql_values_for_tuple!(A, B, C, D);
impl_to_sql_values_for_tuple!(A, B, C, D, E);
impl_to_sql_values_for_tuple!(A, B, C, D, E, F);
impl_to_sql_values_for_tuple!(A, B, C, D, E, F, G);
impl_to_sql_values_for_tuple!(A, B, C, D, E, F, G, H);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_sql_value_conversions() {
        assert_eq!(true.to_sql_value(), SqlValue::Bool(true));
        assert_eq!(42_i32.to_sql_value(), SqlValue::Int(42));
        assert_eq!(2.5_f64.to_sql_value(), SqlValue::Float(2.5));
        assert_eq!(
            "hello".to_sql_value(),
            SqlValue::Text(String::from("hello"))
        );
        assert_eq!(None::<i32>.to_sql_value(), SqlValue::Null);
        assert_eq!(Some(42_i32).to_sql_value(), SqlValue::Int(42));
        assert_eq!(b"hi".to_vec().to_sql_value(), SqlValue::Blob(vec![b'h', b'i']));
        assert_eq!(SqlValue::Null.to_sql_value(), SqlValue::Null);
    }

    #[test]
    fn test_tuple_keeps_positional_order() {
        let values = (1, "apple", 500_i64, Some(5)).to_sql_values();
        assert_eq!(
            values,
            vec![
                SqlValue::Int(1),
                SqlValue::Text(String::from("apple")),
                SqlValue::Int(500),
                SqlValue::Int(5),
            ]
        );
    }

    #[test]
    fn test_array_vec_and_unit() {
        assert_eq!(["a", "b"].to_sql_values().len(), 2);
        assert_eq!(vec![1_i64, 2, 3].to_sql_values()[2], SqlValue::Int(3));
        assert!(().to_sql_values().is_empty());
    }

    #[test]
    fn test_serialize_as_plain_json() {
        let json = serde_json::to_string(&vec![
            SqlValue::Null,
            SqlValue::Int(7),
            SqlValue::Text(String::from("pear")),
        ])
        .unwrap();
        assert_eq!(json, r#"[null,7,"pear"]"#);
    }

    #[test]
    fn test_accessors() {
        assert!(SqlValue::Null.is_null());
        assert_eq!(SqlValue::Int(3).as_int(), Some(3));
        assert_eq!(SqlValue::Text(String::from("x")).as_text(), Some("x"));
        assert_eq!(SqlValue::Float(1.0).as_int(), None);
    }
}
