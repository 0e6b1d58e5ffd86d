//! CLI configuration handling.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use phinxgen_migrate::emitter::{DEFAULT_CLASS_NAME, DEFAULT_INDENT};
use phinxgen_migrate::introspect::PHINX_LOG_TABLE;
use phinxgen_migrate::{EmitterOptions, IntrospectionConfig};
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Default config file name (looked up in the working directory)
pub const CONFIG_FILE_NAME: &str = "phinxgen.toml";

/// phinxgen configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Generated migration settings
    pub migration: MigrationSection,

    /// Table and column selection
    pub introspection: IntrospectionSection,
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Resolve the configuration for a run.
    ///
    /// An explicit path must exist. Without one, `phinxgen.toml` in `cwd` is
    /// used when present, otherwise defaults apply.
    pub fn resolve(explicit: Option<&Path>, cwd: &Path) -> CliResult<Self> {
        let path: PathBuf = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = cwd.join(CONFIG_FILE_NAME);
                if !candidate.exists() {
                    debug!("No config file found, using defaults");
                    return Ok(Self::default());
                }
                candidate
            }
        };

        debug!(path = %path.display(), "Loading config");
        Self::load(&path)
    }

    /// Emitter settings from the `[migration]` and `[introspection]` sections.
    pub fn emitter_options(&self) -> EmitterOptions {
        EmitterOptions::new()
            .class_name(&self.migration.class_name)
            .indent(&self.migration.indent)
            .exclude_columns(self.introspection.exclude_columns.clone())
    }

    /// Table filters from the `[introspection]` section.
    pub fn introspection_config(&self) -> IntrospectionConfig {
        IntrospectionConfig::new()
            .include_tables(self.introspection.include_tables.clone())
            .exclude_tables(self.introspection.exclude_tables.clone())
    }
}

/// `[migration]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationSection {
    /// Name of the generated class
    pub class_name: String,

    /// Indentation unit
    pub indent: String,
}

impl Default for MigrationSection {
    fn default() -> Self {
        Self {
            class_name: DEFAULT_CLASS_NAME.to_string(),
            indent: DEFAULT_INDENT.to_string(),
        }
    }
}

/// `[introspection]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntrospectionSection {
    /// Tables to include (empty = all)
    pub include_tables: Vec<String>,

    /// Tables to skip
    pub exclude_tables: Vec<String>,

    /// Columns to leave out, as `column` or `table.column`
    pub exclude_columns: Vec<String>,
}

impl Default for IntrospectionSection {
    fn default() -> Self {
        Self {
            include_tables: Vec::new(),
            exclude_tables: vec![PHINX_LOG_TABLE.to_string()],
            exclude_columns: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.migration.class_name, "InitialMigration");
        assert_eq!(config.migration.indent, "    ");
        assert_eq!(config.introspection.exclude_tables, vec!["phinxlog"]);
        assert_eq!(config.emitter_options(), EmitterOptions::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [migration]
            class_name = "LegacySchema"
            "#,
        )
        .unwrap();

        assert_eq!(config.migration.class_name, "LegacySchema");
        assert_eq!(config.migration.indent, "    ");
        assert_eq!(config.introspection, IntrospectionSection::default());
    }

    #[test]
    fn test_sections_flow_into_options() {
        let config: Config = toml::from_str(
            r#"
            [migration]
            indent = "  "

            [introspection]
            include_tables = ["users", "posts"]
            exclude_tables = []
            exclude_columns = ["id", "posts.legacy_flag"]
            "#,
        )
        .unwrap();

        let options = config.emitter_options();
        assert_eq!(options.indent, "  ");
        assert!(options.is_excluded("posts", "legacy_flag"));
        assert!(!options.is_excluded("users", "legacy_flag"));

        let filters = config.introspection_config();
        assert!(filters.should_include_table("users"));
        assert!(!filters.should_include_table("comments"));
        assert!(filters.exclude_tables.is_empty());
    }

    #[test]
    fn test_resolve_from_working_directory() {
        let dir = TempDir::new().unwrap();
        assert_eq!(Config::resolve(None, dir.path()).unwrap(), Config::default());

        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[migration]\nclass_name = \"FromCwd\"\n",
        )
        .unwrap();
        let config = Config::resolve(None, dir.path()).unwrap();
        assert_eq!(config.migration.class_name, "FromCwd");
    }

    #[test]
    fn test_resolve_explicit_path() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = Config::resolve(Some(&missing), dir.path()).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));

        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[introspection]\nexclude_columns = [\"id\"]\n").unwrap();
        let config = Config::resolve(Some(&path), dir.path()).unwrap();
        assert_eq!(config.introspection.exclude_columns, vec!["id"]);
    }

    #[test]
    fn test_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[migration\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse TOML"));
    }
}
