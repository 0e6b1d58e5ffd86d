//! # phinxgen
//!
//! Generate a Phinx migration class from an existing MySQL database.
//!
//! phinxgen provides:
//! - A schema reader that returns `SHOW ...` and `INFORMATION_SCHEMA` output as raw rows
//! - A schema model grouping those rows into tables, indexes and foreign keys
//! - A type mapper from MySQL column types to Phinx column types and options
//! - An emitter producing the PHP migration source
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use phinxgen::prelude::*;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = MysqlConfig::new("shop").username("root").password("secret");
//!     let conn = MysqlConnection::connect(&config).await?;
//!     let mut reader = SchemaReader::new(conn, "shop");
//!
//!     let result = Introspector::default().run(&mut reader).await?;
//!     print!("{}", MigrationEmitter::default().emit(&result.schema));
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// MySQL connection and raw schema rows.
pub mod mysql {
    pub use phinxgen_mysql::*;
}

/// Schema model, type mapping and migration emission.
pub mod migrate {
    pub use phinxgen_migrate::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use phinxgen_migrate::{
        DatabaseSchema, EmitterOptions, IntrospectionConfig, Introspector, MigrationEmitter,
        SchemaSource, Table, TypeMapper,
    };
    pub use phinxgen_mysql::{MysqlConfig, MysqlConnection, RawRow, SchemaReader};
}

// Re-export key types at the crate root
pub use phinxgen_migrate::{MigrateResult, MigrationError};
pub use phinxgen_mysql::{MysqlError, MysqlResult};
