//! # lesson-check entry point
//!
//! Parses arguments, sets up logging and runs one lesson check. Exit code
//! is 0 for a clean lesson and 1 for violations or a fatal error.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use lesson_cli::check::run_check;
use lesson_cli::config::{CheckArgs, CheckConfig};

/// Check a lesson's structure and formatting against the lesson template.
#[derive(Parser, Debug)]
#[command(name = "lesson-check", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(flatten)]
    check: CheckArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let config = match CheckConfig::try_from(cli.check) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::from(1);
        }
    };
    tracing::debug!(?config, "configuration resolved");

    match run_check(&config, &mut io::stderr().lock()) {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
