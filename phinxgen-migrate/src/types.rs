//! MySQL column type mapping.
//!
//! A native type string such as `decimal(10,2) unsigned` is reduced to its
//! leading keyword (`decimal`), looked up in a fixed table of Phinx column
//! types, and decorated with attributes derived independently from the type
//! string and the `SHOW COLUMNS` metadata.
//!
//! Keywords missing from the table are not an error. They map to
//! [`ColumnType::Unsupported`], which renders as `[keyword]` so the generated
//! migration stays syntactically complete and the gap is easy to spot.

use std::fmt;
use std::sync::LazyLock;

use regex_lite::Regex;
use tracing::warn;

use crate::model::Column;

/// Portable column types understood by Phinx.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalType {
    Integer,
    String,
    Char,
    Text,
    Decimal,
    Float,
    Double,
    Enum,
    Set,
    Date,
    Time,
    Year,
    Timestamp,
    DateTime,
    Blob,
    Binary,
    VarBinary,
    Bit,
    Json,
}

impl LogicalType {
    /// The Phinx type name.
    pub fn as_str(self) -> &'static str {
        match self {
            LogicalType::Integer => "integer",
            LogicalType::String => "string",
            LogicalType::Char => "char",
            LogicalType::Text => "text",
            LogicalType::Decimal => "decimal",
            LogicalType::Float => "float",
            LogicalType::Double => "double",
            LogicalType::Enum => "enum",
            LogicalType::Set => "set",
            LogicalType::Date => "date",
            LogicalType::Time => "time",
            LogicalType::Year => "year",
            LogicalType::Timestamp => "timestamp",
            LogicalType::DateTime => "datetime",
            LogicalType::Blob => "blob",
            LogicalType::Binary => "binary",
            LogicalType::VarBinary => "varbinary",
            LogicalType::Bit => "bit",
            LogicalType::Json => "json",
        }
    }

    /// Whether defaults of this type may be written as bare PHP numbers.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            LogicalType::Integer
                | LogicalType::Decimal
                | LogicalType::Float
                | LogicalType::Double
                | LogicalType::Bit
        )
    }

    /// Whether the type carries a list of allowed values.
    pub fn has_values(self) -> bool {
        matches!(self, LogicalType::Enum | LogicalType::Set)
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying a native type keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnType {
    /// A type with a Phinx equivalent.
    Known(LogicalType),
    /// No mapping exists; holds the native keyword.
    Unsupported(String),
}

impl ColumnType {
    /// The logical type, if the keyword was mapped.
    pub fn logical(&self) -> Option<LogicalType> {
        match self {
            ColumnType::Known(t) => Some(*t),
            ColumnType::Unsupported(_) => None,
        }
    }

    /// Whether the keyword had no mapping.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, ColumnType::Unsupported(_))
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Known(t) => f.write_str(t.as_str()),
            ColumnType::Unsupported(keyword) => write!(f, "[{}]", keyword),
        }
    }
}

/// Native keyword to logical type.
pub const LOGICAL_TYPES: &[(&str, LogicalType)] = &[
    ("tinyint", LogicalType::Integer),
    ("smallint", LogicalType::Integer),
    ("mediumint", LogicalType::Integer),
    ("int", LogicalType::Integer),
    ("integer", LogicalType::Integer),
    ("bigint", LogicalType::Integer),
    ("varchar", LogicalType::String),
    ("char", LogicalType::Char),
    ("tinytext", LogicalType::Text),
    ("text", LogicalType::Text),
    ("mediumtext", LogicalType::Text),
    ("longtext", LogicalType::Text),
    ("decimal", LogicalType::Decimal),
    ("numeric", LogicalType::Decimal),
    ("float", LogicalType::Float),
    ("double", LogicalType::Double),
    ("real", LogicalType::Double),
    ("enum", LogicalType::Enum),
    ("set", LogicalType::Set),
    ("date", LogicalType::Date),
    ("time", LogicalType::Time),
    ("year", LogicalType::Year),
    ("timestamp", LogicalType::Timestamp),
    ("datetime", LogicalType::DateTime),
    ("tinyblob", LogicalType::Blob),
    ("blob", LogicalType::Blob),
    ("mediumblob", LogicalType::Blob),
    ("longblob", LogicalType::Blob),
    ("binary", LogicalType::Binary),
    ("varbinary", LogicalType::VarBinary),
    ("bit", LogicalType::Bit),
    ("json", LogicalType::Json),
];

/// Native keyword to Phinx `MysqlAdapter` size constant.
pub const LIMIT_CONSTANTS: &[(&str, &str)] = &[
    ("tinyint", "MysqlAdapter::INT_TINY"),
    ("smallint", "MysqlAdapter::INT_SMALL"),
    ("mediumint", "MysqlAdapter::INT_MEDIUM"),
    ("bigint", "MysqlAdapter::INT_BIG"),
    ("tinytext", "MysqlAdapter::TEXT_TINY"),
    ("mediumtext", "MysqlAdapter::TEXT_MEDIUM"),
    ("longtext", "MysqlAdapter::TEXT_LONG"),
    ("tinyblob", "MysqlAdapter::BLOB_TINY"),
    ("mediumblob", "MysqlAdapter::BLOB_MEDIUM"),
    ("longblob", "MysqlAdapter::BLOB_LONG"),
];

static KEYWORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z]+").unwrap());

static LENGTH_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\((\d+)\)(?:\s+unsigned)?(?:\s+zerofill)?$").unwrap()
});

static UNSIGNED_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\(\d+(?:,\s*\d+)?\))?\s+unsigned(?:\s+zerofill)?$").unwrap()
});

static PRECISION_SCALE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((\d+)(?:,\s*(\d+))?\)").unwrap());

static NUMERIC_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?(?:0|[1-9]\d*)(?:\.\d+)?$").unwrap());

/// Significant digits a PHP float keeps exactly.
const FLOAT_DIGITS: usize = 15;

/// A column size limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Limit {
    /// A `MysqlAdapter` constant, emitted unquoted.
    Constant(&'static str),
    /// An explicit length from the type string.
    Length(u64),
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::Constant(name) => f.write_str(name),
            Limit::Length(n) => write!(f, "{}", n),
        }
    }
}

/// A column default value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultValue {
    /// Integer or decimal literal, emitted bare.
    Numeric(String),
    /// Anything else, emitted as a quoted string.
    Text(String),
}

impl DefaultValue {
    /// Classify a raw default for a column of the given type.
    ///
    /// Only canonical literals on numeric columns stay bare, and only when
    /// PHP reads them back unchanged: integers must fit in an `i64`,
    /// fractions in a float's exact digits.
    pub fn parse(raw: &str, column_type: &ColumnType) -> Self {
        let numeric_column = column_type.logical().is_some_and(LogicalType::is_numeric);
        if numeric_column && NUMERIC_LITERAL.is_match(raw) && fits_php_number(raw) {
            DefaultValue::Numeric(raw.to_string())
        } else {
            DefaultValue::Text(raw.to_string())
        }
    }
}

fn fits_php_number(literal: &str) -> bool {
    if literal.contains('.') {
        let digits = literal.chars().filter(char::is_ascii_digit).count();
        digits <= FLOAT_DIGITS
    } else {
        literal.parse::<i64>().is_ok()
    }
}

/// Attributes derived for one column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnAttributes {
    /// `NULL` allowed.
    pub nullable: bool,
    /// Default value.
    pub default: Option<DefaultValue>,
    /// `ON UPDATE CURRENT_TIMESTAMP`.
    pub update_current_timestamp: bool,
    /// `AUTO_INCREMENT`.
    pub identity: bool,
    /// Size limit.
    pub limit: Option<Limit>,
    /// `UNSIGNED`.
    pub unsigned: bool,
    /// Decimal precision.
    pub precision: Option<u32>,
    /// Decimal scale.
    pub scale: Option<u32>,
    /// Enum or set members.
    pub values: Option<Vec<String>>,
}

/// A column with its type classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedColumn {
    /// Phinx column type.
    pub column_type: ColumnType,
    /// Derived attributes.
    pub attributes: ColumnAttributes,
}

/// Maps native MySQL types onto Phinx column types.
///
/// The lookup tables are plain data handed to the mapper; [`TypeMapper::default`]
/// uses [`LOGICAL_TYPES`] and [`LIMIT_CONSTANTS`].
#[derive(Debug, Clone, Copy)]
pub struct TypeMapper {
    types: &'static [(&'static str, LogicalType)],
    limits: &'static [(&'static str, &'static str)],
}

impl Default for TypeMapper {
    fn default() -> Self {
        Self::new(LOGICAL_TYPES, LIMIT_CONSTANTS)
    }
}

impl TypeMapper {
    /// Create a mapper over custom lookup tables.
    pub fn new(
        types: &'static [(&'static str, LogicalType)],
        limits: &'static [(&'static str, &'static str)],
    ) -> Self {
        Self { types, limits }
    }

    /// Classify a native type string.
    pub fn column_type(&self, native_type: &str) -> ColumnType {
        let keyword = native_keyword(native_type);
        self.types
            .iter()
            .find(|(name, _)| *name == keyword)
            .map(|(_, t)| ColumnType::Known(*t))
            .unwrap_or(ColumnType::Unsupported(keyword))
    }

    /// Size limit for a native type string.
    pub fn limit(&self, native_type: &str) -> Option<Limit> {
        let keyword = native_keyword(native_type);
        if let Some((_, constant)) = self.limits.iter().find(|(name, _)| *name == keyword) {
            return Some(Limit::Constant(*constant));
        }

        let lowered = native_type.trim().to_ascii_lowercase();
        LENGTH_SUFFIX
            .captures(&lowered)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
            .map(Limit::Length)
    }

    /// Classify a column and derive its attributes.
    pub fn map(&self, column: &Column) -> MappedColumn {
        let column_type = self.column_type(&column.native_type);
        if let ColumnType::Unsupported(ref keyword) = column_type {
            warn!(
                column = %column.name,
                native_type = %column.native_type,
                keyword = %keyword,
                "Unsupported column type"
            );
        }

        let logical = column_type.logical();
        let (precision, scale) = match logical {
            Some(LogicalType::Decimal) => precision_scale(&column.native_type),
            _ => (None, None),
        };
        let values = match logical {
            Some(t) if t.has_values() => Some(parse_values(&column.native_type)),
            _ => None,
        };

        let attributes = ColumnAttributes {
            nullable: column.nullable,
            default: column
                .default
                .as_deref()
                .map(|raw| DefaultValue::parse(raw, &column_type)),
            update_current_timestamp: column.updates_current_timestamp(),
            identity: column.is_auto_increment(),
            limit: self.limit(&column.native_type),
            unsigned: is_unsigned(&column.native_type),
            precision,
            scale,
            values,
        };

        MappedColumn {
            column_type,
            attributes,
        }
    }
}

/// Leading alphabetic keyword of a native type, lower-cased.
pub fn native_keyword(native_type: &str) -> String {
    let lowered = native_type.trim().to_ascii_lowercase();
    KEYWORD
        .find(&lowered)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Whether a native type ends in `unsigned`.
pub fn is_unsigned(native_type: &str) -> bool {
    UNSIGNED_SUFFIX.is_match(&native_type.trim().to_ascii_lowercase())
}

/// Precision and scale from a `(P,S)` or `(P)` suffix.
pub fn precision_scale(native_type: &str) -> (Option<u32>, Option<u32>) {
    match PRECISION_SCALE.captures(native_type) {
        Some(caps) => (
            caps.get(1).and_then(|m| m.as_str().parse().ok()),
            caps.get(2).and_then(|m| m.as_str().parse().ok()),
        ),
        None => (None, None),
    }
}

/// Members of an `enum(...)` or `set(...)` type.
///
/// Members are single-quoted; a doubled quote inside a member is one quote.
/// Backslash escapes follow MySQL string literal rules.
pub fn parse_values(native_type: &str) -> Vec<String> {
    let (Some(start), Some(end)) = (native_type.find('('), native_type.rfind(')')) else {
        return Vec::new();
    };
    if end <= start {
        return Vec::new();
    }

    let mut values = Vec::new();
    let mut chars = native_type[start + 1..end].chars().peekable();
    let mut current = String::new();
    let mut quoted = false;

    while let Some(ch) = chars.next() {
        match (quoted, ch) {
            (false, '\'') => quoted = true,
            (true, '\'') if chars.peek() == Some(&'\'') => {
                chars.next();
                current.push('\'');
            }
            (true, '\'') => {
                quoted = false;
                values.push(std::mem::take(&mut current));
            }
            (true, '\\') => {
                if let Some(escaped) = chars.next() {
                    current.push(unescape(escaped));
                }
            }
            (true, c) => current.push(c),
            (false, _) => {}
        }
    }

    values
}

fn unescape(ch: char) -> char {
    match ch {
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        '0' => '\0',
        'b' => '\u{8}',
        'Z' => '\u{1a}',
        other => other,
    }
}
