//! Gauntlet CLI - challenge-table validation tool.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check {
            file,
            config,
            delimiter,
            json,
        } => commands::check::run(file, config, delimiter, json, cli.verbose),

        Commands::Schema { json } => commands::schema::run(json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
