//! Styled terminal output utilities.
//!
//! Generated code goes to stdout unstyled; everything else is decoration.

use std::io::{self, Write};

use owo_colors::OwoColorize;

/// Title shown in the usage banner
pub const BANNER_TITLE: &str = "Phinx MySQL migration generator";

/// Print the usage banner
pub fn usage(program: &str) {
    let rule = "=".repeat(BANNER_TITLE.len());
    println!("{}", rule.dimmed());
    println!("{}", BANNER_TITLE.bold().cyan());
    println!("{}", rule.dimmed());
    println!("{}", "Usage:".bold());
    println!(
        "{} {} {}",
        program,
        "<database> <user> <password> [host=localhost] [port=3306]".white(),
        "> migration.php".dimmed()
    );
}

/// Print an error message
pub fn error(text: &str) {
    eprintln!("{} {}", "✖".red().bold(), text.red());
}

/// Write generated code to stdout verbatim
pub fn code(text: &str) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle.write_all(text.as_bytes())?;
    handle.flush()
}
