//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Gauntlet: challenge-table validation tool
#[derive(Parser)]
#[command(name = "gauntlet")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate an uploaded challenge table against the business rules
    Check {
        /// Path to the uploaded file (CSV, `;`-separated by convention)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Rule configuration JSON (allowed sets, thresholds, date bounds)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Field delimiter (auto-detected when omitted)
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Output the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the expected column contract
    Schema {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
