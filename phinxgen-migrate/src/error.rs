//! Error types for schema introspection and emission.

use phinxgen_mysql::{FromMysqlRowError, MysqlError};
use thiserror::Error;

/// Result type alias for migration operations.
pub type MigrateResult<T> = Result<T, MigrationError>;

/// Errors that can occur while building a migration.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// Connection or query failure.
    #[error(transparent)]
    Database(#[from] MysqlError),

    /// An introspection row is missing a field the model needs.
    #[error("Invalid {kind} row for table '{table}': {source}")]
    InvalidRow {
        /// Table being read.
        table: String,
        /// Which introspection result the row came from.
        kind: RowKind,
        /// Decoding failure.
        #[source]
        source: FromMysqlRowError,
    },
}

impl MigrationError {
    /// Create an invalid-row error.
    pub fn invalid_row(table: impl Into<String>, kind: RowKind, source: FromMysqlRowError) -> Self {
        Self::InvalidRow {
            table: table.into(),
            kind,
            source,
        }
    }

    /// Whether the error came from the database connection.
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Database(e) if e.is_connection())
    }
}

/// Source of an introspection row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// `SHOW COLUMNS`.
    Column,
    /// `SHOW INDEXES`.
    Index,
    /// `INFORMATION_SCHEMA` foreign-key join.
    ForeignKey,
}

impl std::fmt::Display for RowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowKind::Column => write!(f, "column"),
            RowKind::Index => write!(f, "index"),
            RowKind::ForeignKey => write!(f, "foreign key"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_row_display() {
        let err = MigrationError::invalid_row(
            "users",
            RowKind::Index,
            FromMysqlRowError::with_column("missing field", "Key_name"),
        );
        let display = err.to_string();
        assert!(display.contains("index row"));
        assert!(display.contains("'users'"));
        assert!(display.contains("Key_name"));
    }

    #[test]
    fn test_connection_errors_are_detected() {
        let err: MigrationError = MysqlError::connection("refused").into();
        assert!(err.is_connection());

        let err: MigrationError = MysqlError::query("SHOW TABLES", "denied").into();
        assert!(!err.is_connection());
    }
}
