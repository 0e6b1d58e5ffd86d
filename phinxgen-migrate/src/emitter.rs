//! Phinx migration emitter.
//!
//! Walks a [`DatabaseSchema`] and renders one PHP class with `up()` and
//! `down()` methods. Each table becomes a `$this->table(...)` builder chain:
//! columns first (schema order), then indexes, then foreign keys, then
//! `->create()`. Both methods run with `FOREIGN_KEY_CHECKS` disabled so tables
//! may reference each other regardless of creation order.
//!
//! `down()` drops tables in the same order `up()` creates them and relies on
//! the disabled checks rather than on dependency ordering.

use tracing::debug;

use crate::model::{Column, DatabaseSchema, ForeignKey, Index, Table};
use crate::php;
use crate::types::{ColumnAttributes, DefaultValue, TypeMapper};

/// Default migration class name.
pub const DEFAULT_CLASS_NAME: &str = "InitialMigration";

/// Default indentation unit.
pub const DEFAULT_INDENT: &str = "    ";

const DISABLE_FK_CHECKS: &str = "$this->execute('SET FOREIGN_KEY_CHECKS=0;');";
const ENABLE_FK_CHECKS: &str = "$this->execute('SET FOREIGN_KEY_CHECKS=1;');";

/// Emitter settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitterOptions {
    /// Name of the generated migration class.
    pub class_name: String,
    /// Indentation unit.
    pub indent: String,
    /// Columns left out of `addColumn` calls, as `column` or `table.column`.
    pub exclude_columns: Vec<String>,
}

impl Default for EmitterOptions {
    fn default() -> Self {
        Self {
            class_name: DEFAULT_CLASS_NAME.to_string(),
            indent: DEFAULT_INDENT.to_string(),
            exclude_columns: Vec::new(),
        }
    }
}

impl EmitterOptions {
    /// Create default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the class name.
    pub fn class_name(mut self, name: impl Into<String>) -> Self {
        self.class_name = name.into();
        self
    }

    /// Set the indentation unit.
    pub fn indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Set the excluded columns.
    pub fn exclude_columns(mut self, columns: Vec<String>) -> Self {
        self.exclude_columns = columns;
        self
    }

    /// Check if a column is excluded.
    pub fn is_excluded(&self, table: &str, column: &str) -> bool {
        self.exclude_columns.iter().any(|entry| match entry.split_once('.') {
            Some((t, c)) => t == table && c == column,
            None => entry == column,
        })
    }
}

/// Renders Phinx migration source.
#[derive(Debug, Clone, Default)]
pub struct MigrationEmitter {
    options: EmitterOptions,
    mapper: TypeMapper,
}

impl MigrationEmitter {
    /// Create an emitter with the default type mapper.
    pub fn new(options: EmitterOptions) -> Self {
        Self {
            options,
            mapper: TypeMapper::default(),
        }
    }

    /// Replace the type mapper.
    pub fn with_mapper(mut self, mapper: TypeMapper) -> Self {
        self.mapper = mapper;
        self
    }

    /// The emitter settings.
    pub fn options(&self) -> &EmitterOptions {
        &self.options
    }

    /// Render the complete PHP file.
    pub fn emit(&self, schema: &DatabaseSchema) -> String {
        let i1 = self.options.indent.clone();
        let i2 = self.options.indent.repeat(2);

        let mut lines = vec![
            "<?php".to_string(),
            format!(
                "// Automatically created phinx migration commands for tables from database {}",
                php::comment(&schema.name)
            ),
            String::new(),
            "use Phinx\\Db\\Adapter\\MysqlAdapter;".to_string(),
            "use Phinx\\Migration\\AbstractMigration;".to_string(),
            String::new(),
            format!("class {} extends AbstractMigration", self.options.class_name),
            "{".to_string(),
            format!("{}public function up()", i1),
            format!("{}{{", i1),
        ];
        lines.extend(indent_lines(&self.up_body(&schema.tables), &i2));
        lines.push(format!("{}}}", i1));
        lines.push(String::new());
        lines.push(format!("{}public function down()", i1));
        lines.push(format!("{}{{", i1));
        lines.extend(indent_lines(&self.down_body(&schema.tables), &i2));
        lines.push(format!("{}}}", i1));
        lines.push("}".to_string());

        let mut output = lines.join("\n");
        output.push('\n');
        output
    }

    /// Statements of `up()`: every table block between the FK-check toggle.
    pub fn up_body(&self, tables: &[Table]) -> Vec<String> {
        let mut lines = vec![DISABLE_FK_CHECKS.to_string(), String::new()];
        for table in tables {
            lines.extend(self.table_migration(table));
            lines.push(String::new());
        }
        lines.push(ENABLE_FK_CHECKS.to_string());
        lines
    }

    /// Statements of `down()`: one drop per table between the FK-check toggle.
    pub fn down_body(&self, tables: &[Table]) -> Vec<String> {
        let mut lines = vec![DISABLE_FK_CHECKS.to_string()];
        lines.extend(tables.iter().map(drop_table));
        lines.push(ENABLE_FK_CHECKS.to_string());
        lines
    }

    /// The builder chain for one table.
    pub fn table_migration(&self, table: &Table) -> Vec<String> {
        let indent = &self.options.indent;
        let mut lines = vec![
            format!("// Migration for table {}", php::comment(&table.name)),
            table_declaration(table),
            "$table".to_string(),
        ];

        for column in &table.columns {
            if self.options.is_excluded(&table.name, &column.name) {
                debug!(table = %table.name, column = %column.name, "Skipping excluded column");
                continue;
            }
            lines.push(format!("{}{}", indent, self.column_fragment(column)));
        }

        for index in &table.indexes {
            lines.push(format!("{}{}", indent, index_fragment(index)));
        }

        for fk in &table.foreign_keys {
            lines.push(format!("{}{}", indent, foreign_key_fragment(fk)));
        }

        lines.push(format!("{}->create();", indent));
        lines
    }

    /// `->addColumn(...)` for one column.
    pub fn column_fragment(&self, column: &Column) -> String {
        let mapped = self.mapper.map(column);
        format!(
            "->addColumn({}, {}, {})",
            php::string(&column.name),
            php::string(&mapped.column_type.to_string()),
            attributes_php(&mapped.attributes)
        )
    }
}

/// `$table = $this->table(...)` with primary key, engine, collation and comment.
pub fn table_declaration(table: &Table) -> String {
    let mut options = vec![("id", "false".to_string())];
    if !table.primary_key.is_empty() {
        options.push(("primary_key", php::string_list(&table.primary_key)));
    }
    if let Some(ref engine) = table.engine {
        options.push(("engine", php::string(engine)));
    }
    if let Some(ref collation) = table.collation {
        options.push(("collation", php::string(collation)));
    }
    if let Some(ref comment) = table.comment {
        options.push(("comment", php::string(comment)));
    }

    format!(
        "$table = $this->table({}, {});",
        php::string(&table.name),
        php::assoc(&options)
    )
}

/// `->addIndex(...)` for one grouped index.
pub fn index_fragment(index: &Index) -> String {
    let mut options = vec![("name", php::string(&index.name))];
    if index.unique {
        options.push(("unique", "true".to_string()));
    }
    if index.fulltext {
        options.push(("type", php::string("fulltext")));
    }

    format!(
        "->addIndex({}, {})",
        php::string_list(&index.columns),
        php::assoc(&options)
    )
}

/// `->addForeignKey(...)` for one grouped constraint.
pub fn foreign_key_fragment(fk: &ForeignKey) -> String {
    let options = [
        ("constraint", php::string(&fk.name)),
        ("delete", php::string(&phinx_rule(&fk.delete_rule))),
        ("update", php::string(&phinx_rule(&fk.update_rule))),
    ];

    format!(
        "->addForeignKey({}, {}, {}, {})",
        php::string_list(&fk.columns),
        php::string(&fk.referenced_table),
        php::string_list(&fk.referenced_columns),
        php::assoc(&options)
    )
}

/// `$this->table(...)->drop()->save();` for one table.
pub fn drop_table(table: &Table) -> String {
    format!("$this->table({})->drop()->save();", php::string(&table.name))
}

/// Referential rule in Phinx spelling: `SET NULL` becomes `SET_NULL`.
pub fn phinx_rule(rule: &str) -> String {
    rule.trim().to_ascii_uppercase().replace(' ', "_")
}

/// Column options array.
pub fn attributes_php(attrs: &ColumnAttributes) -> String {
    let mut entries: Vec<(&str, String)> = Vec::new();

    if attrs.nullable {
        entries.push(("null", "true".to_string()));
    }
    if let Some(ref default) = attrs.default {
        let value = match default {
            DefaultValue::Numeric(n) => n.clone(),
            DefaultValue::Text(t) => php::string(t),
        };
        entries.push(("default", value));
    }
    if attrs.update_current_timestamp {
        entries.push(("update", php::string("CURRENT_TIMESTAMP")));
    }
    if attrs.identity {
        entries.push(("identity", "true".to_string()));
    }
    if let Some(ref limit) = attrs.limit {
        entries.push(("limit", limit.to_string()));
    }
    if attrs.unsigned {
        entries.push(("signed", "false".to_string()));
    }
    if let Some(precision) = attrs.precision {
        entries.push(("precision", precision.to_string()));
    }
    if let Some(scale) = attrs.scale {
        entries.push(("scale", scale.to_string()));
    }
    if let Some(ref values) = attrs.values {
        entries.push(("values", php::string_list(values)));
    }

    php::assoc(&entries)
}

fn indent_lines(lines: &[String], indent: &str) -> Vec<String> {
    lines
        .iter()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{}{}", indent, line)
            }
        })
        .collect()
}
