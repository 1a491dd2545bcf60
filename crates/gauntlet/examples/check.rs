//! Validate an uploaded challenge table and print each rule outcome.
//!
//! Usage: cargo run --example check -- path/to/challenges.csv

use gauntlet::Gauntlet;

fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "challenges.csv".to_string());

    let gauntlet = Gauntlet::new();
    match gauntlet.check_file(&path) {
        Ok(run) => {
            println!(
                "{} ({} rows, {} columns, {})",
                run.source.file, run.source.row_count, run.source.column_count, run.source.format
            );
            for result in run.report.results() {
                println!("  {:7} {}", result.status.label(), result.message);
            }
            println!(
                "{} passed, {} failed, {} invalid",
                run.summary.passed, run.summary.failed, run.summary.invalid
            );
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
