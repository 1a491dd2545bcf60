//! Schema command - print the expected column contract.

use colored::Colorize;
use gauntlet::TableSchema;

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let schema = TableSchema::challenge_table();

    if json {
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }

    println!("{}", "Expected columns:".yellow().bold());
    for column in &schema.columns {
        println!("  {:20} {}", column.name.white(), column.semantic.label());
    }

    Ok(())
}
