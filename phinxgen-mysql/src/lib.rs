//! MySQL connection and schema reader for phinxgen.
//!
//! This crate owns everything that talks to the server: connection
//! parameters, a thin wrapper around a single `mysql_async` connection, and
//! the [`SchemaReader`] that issues the introspection statements
//! (`SHOW TABLES`, `SHOW COLUMNS`, `SHOW INDEXES`, `SHOW TABLE STATUS` and the
//! `INFORMATION_SCHEMA` foreign-key join).
//!
//! Results are returned as [`RawRow`]s, ordered field mappings that mirror the
//! server's own introspection output. Turning those rows into a schema model
//! is the job of `phinxgen-migrate`.
//!
//! # Example
//!
//! ```rust,ignore
//! use phinxgen_mysql::{MysqlConfig, MysqlConnection, SchemaReader};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = MysqlConfig::new("shop").username("root").password("secret");
//!     let conn = MysqlConnection::connect(&config).await?;
//!     let mut reader = SchemaReader::new(conn, "shop");
//!
//!     for table in reader.tables().await? {
//!         let columns = reader.columns(&table).await?;
//!         println!("{table}: {} columns", columns.len());
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod connection;
pub mod error;
pub mod reader;
pub mod row;

pub use config::MysqlConfig;
pub use connection::MysqlConnection;
pub use error::{MysqlError, MysqlResult};
pub use reader::SchemaReader;
pub use row::{FromMysqlRow, FromMysqlRowError, RawRow};
