//! Intermediate schema model.
//!
//! Built once per run from the raw introspection rows and never mutated
//! afterwards. Indexes and foreign keys arrive as one row per member column;
//! they are grouped by name here, keeping first-seen order.

use indexmap::IndexMap;
use indexmap::map::Entry;
use phinxgen_mysql::{FromMysqlRowError, RawRow};
use tracing::warn;

use crate::error::{MigrateResult, MigrationError, RowKind};

/// Name of the implicit primary key index in `SHOW INDEXES`.
pub const PRIMARY_INDEX: &str = "PRIMARY";

/// A whole database.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatabaseSchema {
    /// Database name.
    pub name: String,
    /// Tables in discovery order.
    pub tables: Vec<Table>,
}

/// One table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Table name.
    pub name: String,
    /// Storage engine, e.g. `InnoDB`.
    pub engine: Option<String>,
    /// Default collation.
    pub collation: Option<String>,
    /// Table comment, `None` when empty.
    pub comment: Option<String>,
    /// Primary key columns, in column order.
    pub primary_key: Vec<String>,
    /// Columns in schema order.
    pub columns: Vec<Column>,
    /// Secondary indexes (the primary key is not listed).
    pub indexes: Vec<Index>,
    /// Foreign key constraints.
    pub foreign_keys: Vec<ForeignKey>,
}

/// Key role reported by `SHOW COLUMNS`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyRole {
    /// Part of the primary key.
    Primary,
    /// First column of a unique index.
    Unique,
    /// First column of a non-unique index.
    Multiple,
    /// Not indexed.
    #[default]
    None,
}

impl KeyRole {
    /// Parse the `Key` field.
    pub fn from_key(key: &str) -> Self {
        match key {
            "PRI" => KeyRole::Primary,
            "UNI" => KeyRole::Unique,
            "MUL" => KeyRole::Multiple,
            _ => KeyRole::None,
        }
    }
}

/// A column as reported by `SHOW COLUMNS`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Native type string, e.g. `decimal(10,2) unsigned`.
    pub native_type: String,
    /// Whether `NULL` is allowed.
    pub nullable: bool,
    /// Default value, `None` when the default is SQL `NULL`.
    pub default: Option<String>,
    /// The `Extra` field (`auto_increment`, `on update CURRENT_TIMESTAMP`, ...).
    pub extra: String,
    /// Key role.
    pub key: KeyRole,
}

impl Column {
    /// Build a column from a `SHOW COLUMNS` row.
    pub fn from_row(row: &RawRow) -> Result<Self, FromMysqlRowError> {
        Ok(Self {
            name: row.require("Field")?.to_string(),
            native_type: row.require("Type")?.to_string(),
            nullable: row.require("Null")? == "YES",
            default: row.get("Default").map(str::to_string),
            extra: row.get("Extra").unwrap_or_default().to_string(),
            key: KeyRole::from_key(row.get("Key").unwrap_or_default()),
        })
    }

    /// Whether the column is auto-incremented.
    pub fn is_auto_increment(&self) -> bool {
        self.extra.to_ascii_lowercase().contains("auto_increment")
    }

    /// Whether the column is refreshed with the current timestamp on update.
    pub fn updates_current_timestamp(&self) -> bool {
        self.extra
            .to_ascii_lowercase()
            .contains("on update current_timestamp")
    }
}

/// A secondary index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Index {
    /// Index name.
    pub name: String,
    /// Member columns in sequence order.
    pub columns: Vec<String>,
    /// Whether the index is unique.
    pub unique: bool,
    /// Whether the index is a FULLTEXT index.
    pub fulltext: bool,
}

/// A foreign key constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForeignKey {
    /// Constraint name.
    pub name: String,
    /// Local columns.
    pub columns: Vec<String>,
    /// Referenced table.
    pub referenced_table: String,
    /// Referenced columns, paired with `columns` by position.
    pub referenced_columns: Vec<String>,
    /// `ON UPDATE` rule as reported by the server, e.g. `NO ACTION`.
    pub update_rule: String,
    /// `ON DELETE` rule as reported by the server.
    pub delete_rule: String,
}

/// Group `SHOW INDEXES` rows by `Key_name`.
///
/// The primary key is skipped. Uniqueness and index type come from the first
/// row of each group; columns keep row order.
pub fn group_indexes(rows: &[RawRow]) -> Result<Vec<Index>, FromMysqlRowError> {
    let mut grouped: IndexMap<String, Index> = IndexMap::new();

    for row in rows {
        let key_name = row.require("Key_name")?;
        if key_name == PRIMARY_INDEX {
            continue;
        }

        // Functional key parts have no column name.
        let Some(column) = row.get("Column_name") else {
            warn!(index = %key_name, "Skipping functional index part");
            continue;
        };

        let index = grouped.entry(key_name.to_string()).or_insert_with(|| Index {
            name: key_name.to_string(),
            columns: Vec::new(),
            unique: row.get("Non_unique") != Some("1"),
            fulltext: row
                .get("Index_type")
                .is_some_and(|t| t.eq_ignore_ascii_case("FULLTEXT")),
        });
        index.columns.push(column.to_string());
    }

    Ok(grouped.into_values().collect())
}

/// Group foreign-key rows by `CONSTRAINT_NAME`.
///
/// Each row contributes one local/referenced column pair, so composite keys
/// keep their pairing order.
pub fn group_foreign_keys(rows: &[RawRow]) -> Result<Vec<ForeignKey>, FromMysqlRowError> {
    let mut grouped: IndexMap<String, ForeignKey> = IndexMap::new();

    for row in rows {
        let name = row.require("CONSTRAINT_NAME")?;
        let column = row.require("COLUMN_NAME")?;
        let referenced_column = row.require("REFERENCED_COLUMN_NAME")?;

        let fk = match grouped.entry(name.to_string()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(ForeignKey {
                name: name.to_string(),
                columns: Vec::new(),
                referenced_table: row.require("REFERENCED_TABLE_NAME")?.to_string(),
                referenced_columns: Vec::new(),
                update_rule: row.get("UPDATE_RULE").unwrap_or("RESTRICT").to_string(),
                delete_rule: row.get("DELETE_RULE").unwrap_or("RESTRICT").to_string(),
            }),
        };

        fk.columns.push(column.to_string());
        fk.referenced_columns.push(referenced_column.to_string());
    }

    Ok(grouped.into_values().collect())
}

/// Raw introspection rows for one table.
#[derive(Debug, Clone, Default)]
pub struct TableRows {
    /// `SHOW COLUMNS` rows.
    pub columns: Vec<RawRow>,
    /// `SHOW INDEXES` rows.
    pub indexes: Vec<RawRow>,
    /// Foreign-key rows.
    pub foreign_keys: Vec<RawRow>,
    /// `SHOW TABLE STATUS` rows.
    pub status: Vec<RawRow>,
}

impl Table {
    /// Build a table from its raw introspection rows.
    pub fn from_rows(name: impl Into<String>, rows: &TableRows) -> MigrateResult<Self> {
        let name = name.into();
        let invalid = |kind: RowKind| {
            let table = name.clone();
            move |source: FromMysqlRowError| MigrationError::invalid_row(table, kind, source)
        };

        let columns = rows
            .columns
            .iter()
            .map(Column::from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(invalid(RowKind::Column))?;
        let indexes = group_indexes(&rows.indexes).map_err(invalid(RowKind::Index))?;
        let foreign_keys =
            group_foreign_keys(&rows.foreign_keys).map_err(invalid(RowKind::ForeignKey))?;

        let primary_key = columns
            .iter()
            .filter(|c| c.key == KeyRole::Primary)
            .map(|c| c.name.clone())
            .collect();

        let status = rows.status.first();
        let status_field = |field: &str| {
            status
                .and_then(|row| row.get(field))
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        Ok(Self {
            engine: status_field("Engine"),
            collation: status_field("Collation"),
            comment: status_field("Comment"),
            name,
            primary_key,
            columns,
            indexes,
            foreign_keys,
        })
    }
}
