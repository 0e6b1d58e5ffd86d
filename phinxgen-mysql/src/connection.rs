//! MySQL connection wrapper.

use mysql_async::prelude::*;
use mysql_async::{Conn, Params, Row};
use tracing::debug;

use crate::config::MysqlConfig;
use crate::error::{MysqlError, MysqlResult};
use crate::row::{FromMysqlRow, RawRow};

/// A wrapper around a single MySQL connection.
///
/// Every statement runs on the same connection, one after another.
pub struct MysqlConnection {
    conn: Conn,
}

impl MysqlConnection {
    /// Create a new connection wrapper.
    pub fn new(conn: Conn) -> Self {
        Self { conn }
    }

    /// Open a connection with the given configuration.
    pub async fn connect(config: &MysqlConfig) -> MysqlResult<Self> {
        debug!(server = %config.display_target(), "Connecting");
        let conn = Conn::new(config.to_opts_builder())
            .await
            .map_err(|e| MysqlError::connection(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Execute a text-protocol query and return all rows.
    pub async fn query_rows(&mut self, query: &str) -> MysqlResult<Vec<RawRow>> {
        debug!(query = %query, "Executing query");
        let rows: Vec<Row> = self
            .conn
            .query(query)
            .await
            .map_err(|e| MysqlError::query(query, e.to_string()))?;
        decode_rows(query, &rows)
    }

    /// Execute a prepared statement with parameters and return all rows.
    pub async fn query_rows_params<P>(&mut self, query: &str, params: P) -> MysqlResult<Vec<RawRow>>
    where
        P: Into<Params> + Send,
    {
        debug!(query = %query, "Executing parameterized query");
        let rows: Vec<Row> = self
            .conn
            .exec(query, params)
            .await
            .map_err(|e| MysqlError::query(query, e.to_string()))?;
        decode_rows(query, &rows)
    }

    /// Close the connection gracefully.
    pub async fn disconnect(self) -> MysqlResult<()> {
        debug!("Disconnecting");
        self.conn.disconnect().await?;
        Ok(())
    }
}

fn decode_rows(query: &str, rows: &[Row]) -> MysqlResult<Vec<RawRow>> {
    rows.iter()
        .map(|row| {
            RawRow::from_row(row)
                .map_err(|e| MysqlError::deserialization(format!("{} (query: {})", e, query)))
        })
        .collect()
}
