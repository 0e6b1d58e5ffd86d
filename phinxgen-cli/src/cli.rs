//! CLI argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use phinxgen_mysql::MysqlConfig;
use phinxgen_mysql::config::{DEFAULT_HOST, DEFAULT_PORT};

use crate::error::{CliError, CliResult};

/// phinxgen - Generate Phinx migrations from an existing MySQL database
#[derive(Parser, Debug)]
#[command(name = "phinxgen")]
#[command(author = "Pegasus Heavy Industries LLC")]
#[command(version)]
#[command(
    about = "Generate a Phinx migration class from an existing MySQL database",
    long_about = None
)]
pub struct Cli {
    /// Database to introspect
    pub database: Option<String>,

    /// User to connect as
    pub user: Option<String>,

    /// Password for the user
    pub password: Option<String>,

    /// Server host
    #[arg(default_value = DEFAULT_HOST)]
    pub host: String,

    /// Server port
    #[arg(default_value_t = DEFAULT_PORT.to_string())]
    pub port: String,

    /// Path to a phinxgen.toml configuration file
    #[arg(short, long, env = "PHINXGEN_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Connection arguments once all required positionals are present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionArgs {
    /// Database name.
    pub database: String,
    /// User name.
    pub user: String,
    /// Password.
    pub password: String,
    /// Server host.
    pub host: String,
    /// Unparsed server port.
    pub port: String,
}

impl Cli {
    /// The connection arguments, or `None` when a required positional is missing.
    pub fn connection_args(&self) -> Option<ConnectionArgs> {
        Some(ConnectionArgs {
            database: self.database.clone()?,
            user: self.user.clone()?,
            password: self.password.clone()?,
            host: self.host.clone(),
            port: self.port.clone(),
        })
    }
}

impl ConnectionArgs {
    /// Build the driver configuration, validating the port.
    pub fn to_mysql_config(&self) -> CliResult<MysqlConfig> {
        let port: u16 = self.port.trim().parse().map_err(|_| {
            CliError::Config(format!(
                "Invalid port '{}': expected a number between 0 and 65535",
                self.port
            ))
        })?;

        Ok(MysqlConfig::new(&self.database)
            .host(&self.host)
            .port(port)
            .username(&self.user)
            .password(&self.password))
    }
}
