//! Diagnostic logging for the `phinxgen` binary.
//!
//! Logs go to stderr so stdout only ever carries generated code.
//!
//! # Environment Variables
//!
//! - `PHINXGEN_DEBUG=true|1|yes` - Enable debug logging
//! - `PHINXGEN_LOG_LEVEL=trace|debug|info|warn|error` - Set a specific level
//! - `PHINXGEN_LOG_FORMAT=pretty|compact|json` - Output format (default: compact)
//!
//! Nothing is installed unless one of the first two is set.

use std::env;
use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static INIT: Once = Once::new();

const CRATES: &[&str] = &["phinxgen_cli", "phinxgen_migrate", "phinxgen_mysql"];

/// Whether `PHINXGEN_DEBUG` is set to a truthy value.
pub fn is_debug_enabled() -> bool {
    env::var("PHINXGEN_DEBUG")
        .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(false)
}

/// Level from `PHINXGEN_LOG_LEVEL`, falling back to `debug` or `warn`.
pub fn log_level() -> &'static str {
    let fallback = if is_debug_enabled() { "debug" } else { "warn" };
    match env::var("PHINXGEN_LOG_LEVEL") {
        Ok(level) => parse_level(&level).unwrap_or(fallback),
        Err(_) => fallback,
    }
}

/// Format from `PHINXGEN_LOG_FORMAT`.
pub fn log_format() -> &'static str {
    env::var("PHINXGEN_LOG_FORMAT")
        .map(|f| parse_format(&f))
        .unwrap_or("compact")
}

fn parse_level(level: &str) -> Option<&'static str> {
    match level.to_lowercase().as_str() {
        "trace" => Some("trace"),
        "debug" => Some("debug"),
        "info" => Some("info"),
        "warn" => Some("warn"),
        "error" => Some("error"),
        _ => None,
    }
}

fn parse_format(format: &str) -> &'static str {
    match format.to_lowercase().as_str() {
        "pretty" => "pretty",
        "json" => "json",
        _ => "compact",
    }
}

fn filter_directives(level: &str) -> String {
    CRATES
        .iter()
        .map(|krate| format!("{}={}", krate, level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install the subscriber. Subsequent calls are no-ops.
pub fn init() {
    INIT.call_once(|| {
        if !is_debug_enabled() && env::var("PHINXGEN_LOG_LEVEL").is_err() {
            return;
        }

        let level = log_level();
        let filter =
            EnvFilter::try_new(filter_directives(level)).unwrap_or_else(|_| EnvFilter::new("warn"));
        let layer = fmt::layer().with_writer(std::io::stderr);

        match log_format() {
            "json" => tracing_subscriber::registry()
                .with(filter)
                .with(layer.json())
                .init(),
            "pretty" => tracing_subscriber::registry()
                .with(filter)
                .with(layer.pretty())
                .init(),
            _ => tracing_subscriber::registry()
                .with(filter)
                .with(layer.compact())
                .init(),
        }

        tracing::debug!(level, format = log_format(), "Logging initialized");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG"), Some("debug"));
        assert_eq!(parse_level("warn"), Some("warn"));
        assert_eq!(parse_level("loud"), None);
    }

    #[test]
    fn test_parse_format() {
        assert_eq!(parse_format("JSON"), "json");
        assert_eq!(parse_format("pretty"), "pretty");
        assert_eq!(parse_format("xml"), "compact");
    }

    #[test]
    fn test_filter_directives() {
        assert_eq!(
            filter_directives("info"),
            "phinxgen_cli=info,phinxgen_migrate=info,phinxgen_mysql=info"
        );
    }
}
