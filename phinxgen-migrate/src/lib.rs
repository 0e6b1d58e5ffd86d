//! # phinxgen-migrate
//!
//! Schema model, type mapping and Phinx migration emission.
//!
//! This crate provides functionality for:
//! - Grouping raw MySQL introspection rows into tables, indexes and foreign keys
//! - Classifying native column types into Phinx logical types and attributes
//! - Rendering a Phinx migration class with `up()` and `down()` methods
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌────────────────┐     ┌─────────────┐
//! │ SchemaSource │────▶│  Introspector  │────▶│ Schema Model│
//! └──────────────┘     └────────────────┘     └─────────────┘
//!                                                    │
//!                                                    ▼
//!                      ┌────────────────┐     ┌─────────────┐
//!                      │   TypeMapper   │◀────│   Emitter   │
//!                      └────────────────┘     └─────────────┘
//!                                                    │
//!                                                    ▼
//!                                             ┌─────────────┐
//!                                             │  PHP source │
//!                                             └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use phinxgen_migrate::{EmitterOptions, IntrospectionConfig, Introspector, MigrationEmitter};
//! use phinxgen_mysql::{MysqlConfig, MysqlConnection, SchemaReader};
//!
//! async fn generate() -> Result<String, Box<dyn std::error::Error>> {
//!     let config = MysqlConfig::new("shop").username("root").password("secret");
//!     let conn = MysqlConnection::connect(&config).await?;
//!     let mut reader = SchemaReader::new(conn, "shop");
//!
//!     let result = Introspector::new(IntrospectionConfig::default())
//!         .run(&mut reader)
//!         .await?;
//!
//!     let emitter = MigrationEmitter::new(EmitterOptions::default());
//!     Ok(emitter.emit(&result.schema))
//! }
//! ```

pub mod emitter;
pub mod error;
pub mod introspect;
pub mod model;
pub mod php;
pub mod types;

// Re-exports
pub use emitter::{EmitterOptions, MigrationEmitter};
pub use error::{MigrateResult, MigrationError, RowKind};
pub use introspect::{
    IntrospectionConfig, IntrospectionResult, Introspector, SchemaSource, SkippedTable,
};
pub use model::{
    Column, DatabaseSchema, ForeignKey, Index, KeyRole, Table, TableRows, group_foreign_keys,
    group_indexes,
};
pub use types::{
    ColumnAttributes, ColumnType, DefaultValue, Limit, LogicalType, MappedColumn, TypeMapper,
};
