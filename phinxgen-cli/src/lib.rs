//! phinxgen CLI - Generate Phinx migrations from an existing MySQL database.
//!
//! This crate provides the `phinxgen` binary: argument parsing, the optional
//! `phinxgen.toml` configuration file, diagnostic logging and terminal output.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
