//! # Command-Line Configuration
//!
//! Raw arguments ([`CheckArgs`]) are resolved into a [`CheckConfig`]
//! before any document is read. Resolution failures are fatal: the run
//! stops with a diagnostic and a non-zero exit code.

use std::path::PathBuf;

use clap::Args;
use thiserror::Error;

use lesson_validate::CheckSettings;

/// Arguments for a lesson check.
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Check line lengths.
    #[arg(short = 'l', long = "linelen")]
    pub line_len: bool,

    /// Path to the Markdown parser script.
    #[arg(short, long, value_name = "PATH")]
    pub parser: Option<PathBuf>,

    /// Lesson source directory.
    #[arg(short, long = "source", value_name = "DIR", default_value = ".")]
    pub source_dir: PathBuf,

    /// Interpreter used to run the parser script.
    #[arg(long, value_name = "PROGRAM", default_value = "ruby")]
    pub ruby: String,

    /// Stray trailing arguments; any value here is an error.
    #[arg(hide = true)]
    pub extras: Vec<String>,
}

/// Configuration errors. All are fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Path to Markdown parser not provided")]
    MissingParser,

    #[error("Unexpected trailing command-line arguments {0:?}")]
    UnexpectedArguments(Vec<String>),
}

/// Resolved configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckConfig {
    pub line_length_check: bool,
    /// Parser script handed to [`interpreter`](Self::interpreter).
    pub parser: PathBuf,
    pub interpreter: String,
    pub source_dir: PathBuf,
}

impl CheckConfig {
    /// Settings for the validation engine.
    pub fn settings(&self) -> CheckSettings {
        CheckSettings {
            line_length_check: self.line_length_check,
        }
    }
}

impl TryFrom<CheckArgs> for CheckConfig {
    type Error = ConfigError;

    fn try_from(args: CheckArgs) -> Result<Self, Self::Error> {
        let parser = args.parser.ok_or(ConfigError::MissingParser)?;
        if !args.extras.is_empty() {
            return Err(ConfigError::UnexpectedArguments(args.extras));
        }
        Ok(Self {
            line_length_check: args.line_len,
            parser,
            interpreter: args.ruby,
            source_dir: args.source_dir,
        })
    }
}
