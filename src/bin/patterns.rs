use std::process::ExitCode;

use colored::Colorize;
use design_patterns::{demo, logging, DemoConfig, PatternKind, Result};

/// Positional arguments name the patterns to run; without any, the
/// configured list is used.
fn selected_patterns(config: &DemoConfig) -> Result<Vec<PatternKind>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        return Ok(config.patterns.clone());
    }
    args.iter().map(|arg| arg.parse()).collect()
}

fn run() -> Result<()> {
    let config = DemoConfig::load(None)?;
    logging::init(&config.log_level);

    for kind in selected_patterns(&config)? {
        demo::run(kind, &config)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
