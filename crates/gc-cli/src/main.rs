//! Golden config CLI
//!
//! Runs compliance batches, shows configuration diffs and validates input
//! documents.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    tracing::debug!("Verbose mode enabled");

    match cli.command {
        Commands::Compliance {
            inputs,
            devices,
            store,
            workers,
            names,
            platforms,
            filters,
            json,
        } => commands::run_compliance(commands::ComplianceOptions {
            inputs,
            devices,
            store,
            workers,
            names,
            platforms,
            filters,
            json,
        }),
        Commands::Diff {
            backup,
            intended,
            context,
        } => commands::run_diff(&backup, &intended, context),
        Commands::Validate { inputs } => commands::run_validate(&inputs),
    }
}
