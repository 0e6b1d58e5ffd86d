//! Row decoding for introspection results.

use indexmap::IndexMap;
use mysql_async::{Row, Value};
use tracing::warn;

/// Trait for converting a MySQL row to a Rust type.
pub trait FromMysqlRow: Sized {
    /// Convert a MySQL row to this type.
    fn from_row(row: &Row) -> Result<Self, FromMysqlRowError>;
}

/// Error type for row deserialization.
#[derive(Debug)]
pub struct FromMysqlRowError {
    /// The error message.
    pub message: String,
    /// The column that caused the error, if known.
    pub column: Option<String>,
}

impl FromMysqlRowError {
    /// Create a new error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            column: None,
        }
    }

    /// Create a new error with a column name.
    pub fn with_column(message: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            column: Some(column.into()),
        }
    }
}

impl std::fmt::Display for FromMysqlRowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref column) = self.column {
            write!(f, "column '{}': {}", column, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for FromMysqlRowError {}

/// One row of introspection output, keyed by the server's column labels.
///
/// Field order follows the result set. SQL `NULL` is stored as `None`, every
/// other value as its textual form, so `SHOW ...` output and
/// `INFORMATION_SCHEMA` rows look the same regardless of protocol.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    fields: IndexMap<String, Option<String>>,
}

impl RawRow {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field, replacing any earlier value under the same label.
    pub fn insert(&mut self, label: impl Into<String>, value: Option<String>) {
        self.fields.insert(label.into(), value);
    }

    /// Builder-style [`RawRow::insert`].
    pub fn with(mut self, label: impl Into<String>, value: Option<&str>) -> Self {
        self.insert(label, value.map(str::to_string));
        self
    }

    /// Value of a field. `None` when the field is missing or SQL `NULL`.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.fields.get(label).and_then(|v| v.as_deref())
    }

    /// Whether the row has a field with this label (even if `NULL`).
    pub fn contains(&self, label: &str) -> bool {
        self.fields.contains_key(label)
    }

    /// Value of a field that must be present and non-`NULL`.
    pub fn require(&self, label: &str) -> Result<&str, FromMysqlRowError> {
        match self.fields.get(label) {
            Some(Some(value)) => Ok(value),
            Some(None) => Err(FromMysqlRowError::with_column("unexpected NULL", label)),
            None => Err(FromMysqlRowError::with_column("missing field", label)),
        }
    }

    /// Value of the field at a position, e.g. the single column of `SHOW TABLES`.
    pub fn get_index(&self, index: usize) -> Option<&str> {
        self.fields.get_index(index).and_then(|(_, v)| v.as_deref())
    }

    /// Field labels in result-set order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the row has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, Option<V>)> for RawRow
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, Option<V>)>>(iter: I) -> Self {
        let mut row = RawRow::new();
        for (label, value) in iter {
            row.insert(label, value.map(Into::into));
        }
        row
    }
}

impl FromMysqlRow for RawRow {
    fn from_row(row: &Row) -> Result<Self, FromMysqlRowError> {
        let mut raw = RawRow::new();

        for (i, column) in row.columns_ref().iter().enumerate() {
            let name = column.name_str().to_string();
            let value: Option<Value> = row.get(i);
            let text = value.and_then(value_to_text);
            raw.insert(name, text);
        }

        Ok(raw)
    }
}

/// Render a driver value as text. `NULL` maps to `None`.
///
/// Invalid UTF-8 is replaced rather than rejected.
pub fn value_to_text(value: Value) -> Option<String> {
    let text = match value {
        Value::NULL => return None,
        Value::Bytes(bytes) => match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                let bytes = e.into_bytes();
                warn!(len = bytes.len(), "Replacing invalid UTF-8 in introspection value");
                String::from_utf8_lossy(&bytes).into_owned()
            }
        },
        Value::Int(i) => i.to_string(),
        Value::UInt(u) => u.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Double(d) => d.to_string(),
        Value::Date(year, month, day, hour, minute, second, micro) => {
            if micro == 0 {
                format!(
                    "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
                    year, month, day, hour, minute, second
                )
            } else {
                format!(
                    "{:04}-{:02}-{:02} {:02}:{:02}:{:02}.{:06}",
                    year, month, day, hour, minute, second, micro
                )
            }
        }
        Value::Time(is_neg, days, hours, minutes, seconds, micro) => {
            let sign = if is_neg { "-" } else { "" };
            let hours = days * 24 + u32::from(hours);
            if micro == 0 {
                format!("{}{:02}:{:02}:{:02}", sign, hours, minutes, seconds)
            } else {
                format!(
                    "{}{:02}:{:02}:{:02}.{:06}",
                    sign, hours, minutes, seconds, micro
                )
            }
        }
    };
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_mysql_row_error_display() {
        let err = FromMysqlRowError::with_column("missing value", "Field");
        let display = format!("{}", err);
        assert!(display.contains("Field"));
        assert!(display.contains("missing value"));
        assert_eq!(FromMysqlRowError::new("boom").to_string(), "boom");
    }

    #[test]
    fn test_raw_row_keeps_field_order() {
        let row: RawRow = [
            ("Field", Some("id")),
            ("Type", Some("int(11)")),
            ("Default", None),
        ]
        .into_iter()
        .collect();

        assert_eq!(row.labels().collect::<Vec<_>>(), ["Field", "Type", "Default"]);
        assert_eq!(row.get_index(1), Some("int(11)"));
        assert_eq!(row.len(), 3);
    }

    #[test]
    fn test_raw_row_null_and_missing() {
        let row = RawRow::new().with("Default", None).with("Field", Some("id"));

        assert_eq!(row.get("Default"), None);
        assert!(row.contains("Default"));
        assert!(!row.contains("Extra"));
        assert_eq!(row.require("Field").unwrap(), "id");

        let null = row.require("Default").unwrap_err();
        assert_eq!(null.column.as_deref(), Some("Default"));
        assert!(null.message.contains("NULL"));

        let missing = row.require("Extra").unwrap_err();
        assert!(missing.message.contains("missing"));
    }

    #[test]
    fn test_value_to_text() {
        assert_eq!(value_to_text(Value::NULL), None);
        assert_eq!(
            value_to_text(Value::Bytes(b"InnoDB".to_vec())),
            Some("InnoDB".to_string())
        );
        assert_eq!(value_to_text(Value::Int(-3)), Some("-3".to_string()));
        assert_eq!(value_to_text(Value::UInt(1)), Some("1".to_string()));
        assert_eq!(
            value_to_text(Value::Date(2024, 1, 2, 3, 4, 5, 0)),
            Some("2024-01-02 03:04:05".to_string())
        );
        assert_eq!(
            value_to_text(Value::Time(false, 1, 2, 0, 0, 0)),
            Some("26:00:00".to_string())
        );
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        assert_eq!(
            value_to_text(Value::Bytes(vec![b'a', 0xff, b'b'])),
            Some("a\u{fffd}b".to_string())
        );
    }
}
