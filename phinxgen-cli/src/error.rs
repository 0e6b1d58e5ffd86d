//! CLI error types and result alias.

use miette::Diagnostic;
use thiserror::Error;

use phinxgen_migrate::MigrationError;
use phinxgen_mysql::MysqlError;

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// IO error
    #[error("IO error: {0}")]
    #[diagnostic(code(phinxgen::io))]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    #[diagnostic(code(phinxgen::config))]
    Config(String),

    /// Could not open the connection
    #[error("Could not connect to database: {0}")]
    #[diagnostic(
        code(phinxgen::connection),
        help("check the host, port and credentials")
    )]
    Connection(String),

    /// Database error after connecting
    #[error("Database error: {0}")]
    #[diagnostic(code(phinxgen::database))]
    Database(String),

    /// Introspection row could not be turned into the schema model
    #[error("Schema error: {0}")]
    #[diagnostic(code(phinxgen::schema))]
    Schema(String),
}

impl From<MysqlError> for CliError {
    fn from(err: MysqlError) -> Self {
        match err {
            MysqlError::Connection(msg) => CliError::Connection(msg),
            other => CliError::Database(other.to_string()),
        }
    }
}

impl From<MigrationError> for CliError {
    fn from(err: MigrationError) -> Self {
        match err {
            MigrationError::Database(e) => e.into(),
            other => CliError::Schema(other.to_string()),
        }
    }
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        CliError::Config(format!("Failed to parse TOML: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phinxgen_migrate::RowKind;
    use phinxgen_mysql::FromMysqlRowError;

    #[test]
    fn test_connection_message() {
        let err: CliError = MysqlError::connection("Access denied for user 'root'").into();
        assert_eq!(
            err.to_string(),
            "Could not connect to database: Access denied for user 'root'"
        );
    }

    #[test]
    fn test_query_error_names_query() {
        let err: CliError =
            MigrationError::Database(MysqlError::query("SHOW COLUMNS FROM `users`", "gone"))
                .into();
        assert!(matches!(err, CliError::Database(_)));
        assert!(err.to_string().contains("SHOW COLUMNS FROM `users`"));
    }

    #[test]
    fn test_invalid_row_is_schema_error() {
        let err: CliError = MigrationError::invalid_row(
            "users",
            RowKind::Column,
            FromMysqlRowError::with_column("missing field", "Type"),
        )
        .into();
        assert!(matches!(err, CliError::Schema(_)));
        assert!(err.to_string().contains("users"));
    }
}
