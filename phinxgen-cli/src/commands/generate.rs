//! `phinxgen` generate command - Emit a Phinx migration for a live database.

use phinxgen_migrate::{Introspector, MigrationEmitter};
use phinxgen_mysql::{MysqlConnection, SchemaReader};
use tracing::{info, warn};

use crate::cli::{Cli, ConnectionArgs};
use crate::config::Config;
use crate::error::CliResult;
use crate::output;

/// Run the generate command
pub async fn run(cli: Cli) -> CliResult<()> {
    let Some(args) = cli.connection_args() else {
        output::usage("phinxgen");
        return Ok(());
    };

    let cwd = std::env::current_dir()?;
    let config = Config::resolve(cli.config.as_deref(), &cwd)?;
    let php = generate(&args, &config).await?;

    output::code(&php)?;
    Ok(())
}

/// Connect, introspect and render the migration source.
pub async fn generate(args: &ConnectionArgs, config: &Config) -> CliResult<String> {
    let mysql = args.to_mysql_config()?;
    let conn = MysqlConnection::connect(&mysql).await?;
    info!(target_db = %mysql.display_target(), "Connected");

    let mut reader = SchemaReader::new(conn, &mysql.database);
    let result = Introspector::new(config.introspection_config())
        .run(&mut reader)
        .await?;

    for skipped in &result.skipped_tables {
        warn!(table = %skipped.name, reason = %skipped.reason, "Table not emitted");
    }

    let php = MigrationEmitter::new(config.emitter_options()).emit(&result.schema);

    if let Err(e) = reader.into_connection().disconnect().await {
        warn!(error = %e, "Failed to close connection");
    }

    Ok(php)
}
