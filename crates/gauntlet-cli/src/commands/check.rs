//! Check command - validate an uploaded challenge table.

use std::fs::File;
use std::path::PathBuf;

use colored::Colorize;
use gauntlet::{Gauntlet, GauntletConfig, RuleConfig, RuleStatus};

pub fn run(
    file: PathBuf,
    config_path: Option<PathBuf>,
    delimiter: Option<char>,
    json: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let mut config = GauntletConfig::default();

    if let Some(path) = config_path {
        let reader = File::open(&path)
            .map_err(|e| format!("Cannot read config {}: {}", path.display(), e))?;
        let rules: RuleConfig = serde_json::from_reader(reader)
            .map_err(|e| format!("Invalid config {}: {}", path.display(), e))?;
        config.rules = rules;
    }

    if let Some(c) = delimiter {
        if !c.is_ascii() {
            return Err(format!("Delimiter must be an ASCII character: '{}'", c).into());
        }
        config.parser.delimiter = Some(c as u8);
    }

    if !json {
        println!(
            "{} {}",
            "Checking".cyan().bold(),
            file.display().to_string().white()
        );
    }

    let gauntlet = Gauntlet::with_config(config);
    let run = gauntlet.check_file(&file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&run)?);
        if !run.summary.ok {
            std::process::exit(1);
        }
        return Ok(());
    }

    if verbose {
        println!();
        println!("{}", "Source:".yellow().bold());
        println!("  rows    {}", run.source.row_count);
        println!("  columns {}", run.source.column_count);
        println!("  format  {}", run.source.format);
        println!("  hash    {}", run.source.hash);
    }

    println!();
    for result in run.report.results() {
        let line = format!("{:28} {}", result.rule, result.message);
        match result.status {
            RuleStatus::Passed => println!("  {} {}", "ok".green().bold(), line),
            RuleStatus::Failed => println!("  {} {}", "fail".red().bold(), line),
            RuleStatus::Invalid => println!("  {} {}", "invalid".yellow().bold(), line),
        }
    }

    println!();
    println!(
        "{} rules: {} passed, {} failed, {} invalid",
        run.summary.total.to_string().white().bold(),
        run.summary.passed.to_string().green(),
        run.summary.failed.to_string().red(),
        run.summary.invalid.to_string().yellow()
    );

    if run.summary.ok {
        println!("{}", "Upload looks clean.".green());
    } else {
        println!("{}", "Upload has issues - fix the rows above and re-upload.".red());
        std::process::exit(1);
    }

    Ok(())
}
