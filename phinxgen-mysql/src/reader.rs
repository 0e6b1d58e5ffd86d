//! Schema reader issuing the MySQL introspection statements.

use tracing::debug;

use crate::connection::MysqlConnection;
use crate::error::MysqlResult;
use crate::row::RawRow;

/// Reads raw schema metadata over one connection.
pub struct SchemaReader {
    conn: MysqlConnection,
    database: String,
}

impl SchemaReader {
    /// Create a reader for `database` on an open connection.
    pub fn new(conn: MysqlConnection, database: impl Into<String>) -> Self {
        Self {
            conn,
            database: database.into(),
        }
    }

    /// The database being read.
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Names of all base tables, in server order.
    pub async fn tables(&mut self) -> MysqlResult<Vec<String>> {
        let rows = self.conn.query_rows(queries::TABLES).await?;
        let tables: Vec<String> = rows
            .iter()
            .filter_map(|row| row.get_index(0).map(str::to_string))
            .collect();
        debug!(database = %self.database, count = tables.len(), "Discovered tables");
        Ok(tables)
    }

    /// `SHOW COLUMNS` rows for a table.
    pub async fn columns(&mut self, table: &str) -> MysqlResult<Vec<RawRow>> {
        self.conn.query_rows(&queries::columns(table)).await
    }

    /// `SHOW INDEXES` rows for a table.
    pub async fn indexes(&mut self, table: &str) -> MysqlResult<Vec<RawRow>> {
        self.conn.query_rows(&queries::indexes(table)).await
    }

    /// Foreign-key rows for a table, one per constrained column.
    pub async fn foreign_keys(&mut self, table: &str) -> MysqlResult<Vec<RawRow>> {
        self.conn
            .query_rows_params(queries::FOREIGN_KEYS, (self.database.as_str(), table))
            .await
    }

    /// `SHOW TABLE STATUS` rows for a table (engine, collation, comment).
    pub async fn table_status(&mut self, table: &str) -> MysqlResult<Vec<RawRow>> {
        self.conn.query_rows(&queries::table_status(table)).await
    }

    /// Give the connection back, e.g. to disconnect it.
    pub fn into_connection(self) -> MysqlConnection {
        self.conn
    }
}

/// Introspection statements.
pub mod queries {
    /// Base tables of the current database. Views are skipped.
    pub const TABLES: &str = "SHOW FULL TABLES WHERE Table_type = 'BASE TABLE'";

    /// Foreign-key columns of one table, ordered for grouping by constraint.
    pub const FOREIGN_KEYS: &str = r#"
        SELECT
            k.CONSTRAINT_NAME,
            k.COLUMN_NAME,
            k.REFERENCED_TABLE_NAME,
            k.REFERENCED_COLUMN_NAME,
            r.UPDATE_RULE,
            r.DELETE_RULE
        FROM INFORMATION_SCHEMA.KEY_COLUMN_USAGE k
        JOIN INFORMATION_SCHEMA.REFERENTIAL_CONSTRAINTS r
            ON r.CONSTRAINT_SCHEMA = k.CONSTRAINT_SCHEMA
            AND r.CONSTRAINT_NAME = k.CONSTRAINT_NAME
            AND r.TABLE_NAME = k.TABLE_NAME
        WHERE k.TABLE_SCHEMA = ?
            AND k.TABLE_NAME = ?
            AND k.REFERENCED_TABLE_NAME IS NOT NULL
        ORDER BY k.CONSTRAINT_NAME, k.ORDINAL_POSITION
    "#;

    /// Columns of a table.
    pub fn columns(table: &str) -> String {
        format!("SHOW COLUMNS FROM {}", quote_identifier(table))
    }

    /// Indexes of a table.
    pub fn indexes(table: &str) -> String {
        format!("SHOW INDEXES FROM {}", quote_identifier(table))
    }

    /// Status row of a table.
    pub fn table_status(table: &str) -> String {
        format!("SHOW TABLE STATUS WHERE Name = {}", quote_literal(table))
    }

    /// Backtick-quote an identifier.
    pub fn quote_identifier(name: &str) -> String {
        format!("`{}`", name.replace('`', "``"))
    }

    /// Single-quote a string literal.
    pub fn quote_literal(value: &str) -> String {
        format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
    }
}
