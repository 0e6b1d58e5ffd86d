//! Error types for MySQL operations.

use std::fmt;

/// Result type for MySQL operations.
pub type MysqlResult<T> = Result<T, MysqlError>;

/// Error type for MySQL operations.
#[derive(Debug)]
pub enum MysqlError {
    /// MySQL driver error.
    Mysql(mysql_async::Error),
    /// Connection error.
    Connection(String),
    /// Query error, carrying the statement that failed.
    Query {
        /// The failing statement.
        query: String,
        /// Driver message.
        message: String,
    },
    /// Row decoding error.
    Deserialization(String),
}

impl MysqlError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Create a query error for the given statement.
    pub fn query(query: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Query {
            query: query.into(),
            message: msg.into(),
        }
    }

    /// Create a deserialization error.
    pub fn deserialization(msg: impl Into<String>) -> Self {
        Self::Deserialization(msg.into())
    }

    /// Whether the error happened while establishing the connection.
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

impl fmt::Display for MysqlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mysql(e) => write!(f, "MySQL error: {}", e),
            Self::Connection(msg) => write!(f, "Connection error: {}", msg),
            Self::Query { query, message } => {
                write!(f, "Query error: {} (query: {})", message, query)
            }
            Self::Deserialization(msg) => write!(f, "Deserialization error: {}", msg),
        }
    }
}

impl std::error::Error for MysqlError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Mysql(e) => Some(e),
            _ => None,
        }
    }
}

impl From<mysql_async::Error> for MysqlError {
    fn from(err: mysql_async::Error) -> Self {
        Self::Mysql(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MysqlError::connection("access denied");
        assert!(err.to_string().contains("Connection error"));
        assert!(err.to_string().contains("access denied"));
    }

    #[test]
    fn test_query_error_names_statement() {
        let err = MysqlError::query("SHOW COLUMNS FROM `users`", "table doesn't exist");
        let display = err.to_string();
        assert!(display.contains("SHOW COLUMNS FROM `users`"));
        assert!(display.contains("table doesn't exist"));
    }

    #[test]
    fn test_error_constructors() {
        assert!(matches!(
            MysqlError::connection("test"),
            MysqlError::Connection(_)
        ));
        assert!(matches!(
            MysqlError::query("SELECT 1", "test"),
            MysqlError::Query { .. }
        ));
        assert!(matches!(
            MysqlError::deserialization("test"),
            MysqlError::Deserialization(_)
        ));
        assert!(MysqlError::connection("test").is_connection());
        assert!(!MysqlError::deserialization("test").is_connection());
    }
}
