//! TACE CLI - activity-rate metrics for staffing sheets.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = cli.config.as_deref();

    let result = match cli.command {
        Commands::Analyze { files, month, json } => {
            commands::analyze::run(files, month, json, config, cli.verbose)
        }

        Commands::Daily { files, rates, json } => {
            commands::daily::run(files, rates, json, config)
        }

        Commands::Projects { file, month, json } => {
            commands::projects::run(file, month, json, config)
        }

        Commands::Alerts { files, json } => commands::alerts::run(files, json, config),

        Commands::Export {
            files,
            kind,
            output,
        } => commands::export::run(files, kind, output, config),

        Commands::Calendar { month } => commands::calendar::run(&month),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
