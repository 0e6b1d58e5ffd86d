//! Database introspection.
//!
//! The [`Introspector`] walks every base table a [`SchemaSource`] reports,
//! applies the include/exclude filters from [`IntrospectionConfig`] and turns
//! the raw rows of each table into a [`Table`]. Tables are read one after
//! another over the same source.

use phinxgen_mysql::{RawRow, SchemaReader};
use tracing::{debug, info, warn};

use crate::error::MigrateResult;
use crate::model::{DatabaseSchema, Table, TableRows};

/// Phinx's own migration history table.
pub const PHINX_LOG_TABLE: &str = "phinxlog";

/// Result of introspecting a database.
#[derive(Debug, Clone)]
pub struct IntrospectionResult {
    /// The introspected schema.
    pub schema: DatabaseSchema,
    /// Tables that were skipped.
    pub skipped_tables: Vec<SkippedTable>,
}

/// A table that was skipped during introspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedTable {
    /// Table name.
    pub name: String,
    /// Reason it was skipped.
    pub reason: String,
}

/// Configuration for introspection.
#[derive(Debug, Clone)]
pub struct IntrospectionConfig {
    /// Tables to include (empty = all).
    pub include_tables: Vec<String>,
    /// Tables to exclude.
    pub exclude_tables: Vec<String>,
}

impl Default for IntrospectionConfig {
    fn default() -> Self {
        Self {
            include_tables: Vec::new(),
            exclude_tables: vec![PHINX_LOG_TABLE.to_string()],
        }
    }
}

impl IntrospectionConfig {
    /// Create a new introspection config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Include only these tables.
    pub fn include_tables(mut self, tables: Vec<String>) -> Self {
        self.include_tables = tables;
        self
    }

    /// Exclude these tables.
    pub fn exclude_tables(mut self, tables: Vec<String>) -> Self {
        self.exclude_tables = tables;
        self
    }

    /// Check if a table should be included.
    pub fn should_include_table(&self, name: &str) -> bool {
        if self.exclude_tables.iter().any(|t| t == name) {
            return false;
        }
        if self.include_tables.is_empty() {
            return true;
        }
        self.include_tables.iter().any(|t| t == name)
    }

    fn skip_reason(&self, name: &str) -> &'static str {
        if self.exclude_tables.iter().any(|t| t == name) {
            "excluded by configuration"
        } else {
            "not in include list"
        }
    }
}

/// A source of raw introspection rows.
#[async_trait::async_trait]
pub trait SchemaSource: Send {
    /// Name of the database being read.
    fn database(&self) -> &str;

    /// Base table names, in server order.
    async fn tables(&mut self) -> MigrateResult<Vec<String>>;

    /// `SHOW COLUMNS` rows for a table.
    async fn columns(&mut self, table: &str) -> MigrateResult<Vec<RawRow>>;

    /// `SHOW INDEXES` rows for a table.
    async fn indexes(&mut self, table: &str) -> MigrateResult<Vec<RawRow>>;

    /// Foreign-key rows for a table.
    async fn foreign_keys(&mut self, table: &str) -> MigrateResult<Vec<RawRow>>;

    /// `SHOW TABLE STATUS` rows for a table.
    async fn table_status(&mut self, table: &str) -> MigrateResult<Vec<RawRow>>;
}

#[async_trait::async_trait]
impl SchemaSource for SchemaReader {
    fn database(&self) -> &str {
        SchemaReader::database(self)
    }

    async fn tables(&mut self) -> MigrateResult<Vec<String>> {
        Ok(SchemaReader::tables(self).await?)
    }

    async fn columns(&mut self, table: &str) -> MigrateResult<Vec<RawRow>> {
        Ok(SchemaReader::columns(self, table).await?)
    }

    async fn indexes(&mut self, table: &str) -> MigrateResult<Vec<RawRow>> {
        Ok(SchemaReader::indexes(self, table).await?)
    }

    async fn foreign_keys(&mut self, table: &str) -> MigrateResult<Vec<RawRow>> {
        Ok(SchemaReader::foreign_keys(self, table).await?)
    }

    async fn table_status(&mut self, table: &str) -> MigrateResult<Vec<RawRow>> {
        Ok(SchemaReader::table_status(self, table).await?)
    }
}

/// Builds a [`DatabaseSchema`] from a [`SchemaSource`].
#[derive(Debug, Clone, Default)]
pub struct Introspector {
    config: IntrospectionConfig,
}

impl Introspector {
    /// Create an introspector.
    pub fn new(config: IntrospectionConfig) -> Self {
        Self { config }
    }

    /// The introspection config.
    pub fn config(&self) -> &IntrospectionConfig {
        &self.config
    }

    /// Read every included table.
    pub async fn run<S>(&self, source: &mut S) -> MigrateResult<IntrospectionResult>
    where
        S: SchemaSource + ?Sized,
    {
        let database = source.database().to_string();
        let names = source.tables().await?;
        info!(database = %database, count = names.len(), "Discovered tables");

        let mut tables = Vec::with_capacity(names.len());
        let mut skipped_tables = Vec::new();

        for name in names {
            if !self.config.should_include_table(&name) {
                let reason = self.config.skip_reason(&name);
                warn!(table = %name, reason, "Skipping table");
                skipped_tables.push(SkippedTable {
                    name,
                    reason: reason.to_string(),
                });
                continue;
            }

            let table = self.read_table(source, &name).await?;
            info!(
                table = %table.name,
                columns = table.columns.len(),
                indexes = table.indexes.len(),
                foreign_keys = table.foreign_keys.len(),
                "Introspected table"
            );
            tables.push(table);
        }

        Ok(IntrospectionResult {
            schema: DatabaseSchema {
                name: database,
                tables,
            },
            skipped_tables,
        })
    }

    async fn read_table<S>(&self, source: &mut S, name: &str) -> MigrateResult<Table>
    where
        S: SchemaSource + ?Sized,
    {
        debug!(table = %name, "Reading table");
        let rows = TableRows {
            columns: source.columns(name).await?,
            indexes: source.indexes(name).await?,
            foreign_keys: source.foreign_keys(name).await?,
            status: source.table_status(name).await?,
        };
        Table::from_rows(name, &rows)
    }
}
