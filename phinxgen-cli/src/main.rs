//! phinxgen - Generate Phinx migrations from an existing MySQL database.

use clap::Parser;

use phinxgen_cli::cli::Cli;
use phinxgen_cli::commands;
use phinxgen_cli::error::CliResult;
use phinxgen_cli::logging;
use phinxgen_cli::output;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    logging::init();

    if let Err(e) = run().await {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run() -> CliResult<()> {
    let cli = Cli::parse();
    commands::generate::run(cli).await
}
