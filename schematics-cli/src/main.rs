//! `schematics` command-line tool
//!
//! Thin front end over the Schematics client: every command maps to one or
//! two API calls and prints the result as pretty JSON on stdout. Logs and
//! errors go to stderr.

use clap::Parser;
use colored::Colorize;
use schematics_logging::LogConfig;

mod cli;
mod commands;

use cli::Args;
use commands::execute_command;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let mut log_config = LogConfig::from_env();
    if args.debug {
        log_config = log_config.with_level("schematics=debug,schematics_core=debug");
    }
    let _log_guard = schematics_logging::init_with(&log_config);

    if let Err(e) = execute_command(args).await {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
