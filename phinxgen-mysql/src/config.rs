//! MySQL connection parameters.

use mysql_async::OptsBuilder;

/// Default MySQL host.
pub const DEFAULT_HOST: &str = "localhost";

/// Default MySQL port.
pub const DEFAULT_PORT: u16 = 3306;

/// MySQL database configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MysqlConfig {
    /// Database host.
    pub host: String,
    /// Database port.
    pub port: u16,
    /// Database name.
    pub database: String,
    /// Username for authentication.
    pub username: Option<String>,
    /// Password for authentication.
    pub password: Option<String>,
}

impl Default for MysqlConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database: String::new(),
            username: None,
            password: None,
        }
    }
}

impl MysqlConfig {
    /// Create a new configuration with the given database name.
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            ..Default::default()
        }
    }

    /// Convert to mysql_async OptsBuilder.
    pub fn to_opts_builder(&self) -> OptsBuilder {
        let mut builder = OptsBuilder::default()
            .ip_or_hostname(&self.host)
            .tcp_port(self.port)
            .db_name(Some(&self.database));

        if let Some(ref user) = self.username {
            builder = builder.user(Some(user));
        }

        if let Some(ref pass) = self.password {
            builder = builder.pass(Some(pass));
        }

        builder
    }

    /// `host:port/database`, for log lines and error messages.
    pub fn display_target(&self) -> String {
        format!("{}:{}/{}", self.host, self.port, self.database)
    }

    /// Set the host.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the port.
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the database name.
    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Set the username.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the password.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }
}
