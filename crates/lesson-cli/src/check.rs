//! # Lesson Check Driver
//!
//! One full run: read `_config.yml`, load every document, validate the
//! lesson and write the consolidated report.

use std::io::Write;

use anyhow::{Context, Result};

use lesson_validate::{check_config, LessonChecker, Outcome, Reporter, CONFIG_FILE};

use crate::config::CheckConfig;
use crate::loader::{read_all_markdown, read_config, MarkdownParser};

/// Validate the lesson described by `config`, writing the report to `out`.
///
/// Returns `Err` only for fatal problems (unreadable configuration,
/// malformed front matter, unusable rule set); content problems end up in
/// the returned [`Outcome`].
pub fn run_check(config: &CheckConfig, out: &mut impl Write) -> Result<Outcome> {
    let mut reporter = Reporter::new();

    let config_path = config.source_dir.join(CONFIG_FILE);
    let lesson_config = read_config(&config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;
    check_config(&config_path, &lesson_config, &mut reporter);
    tracing::debug!(path = %config_path.display(), "configuration checked");

    let parser = MarkdownParser::new(config.interpreter.clone(), config.parser.clone());
    let docs = read_all_markdown(&config.source_dir, &parser)
        .with_context(|| format!("failed to load lesson in {}", config.source_dir.display()))?;
    tracing::info!(
        source = %config.source_dir.display(),
        documents = docs.len(),
        "lesson loaded"
    );

    let checker = LessonChecker::new(config.settings()).context("invalid rule set")?;
    checker.check_lesson(&config.source_dir, &docs, &mut reporter);

    reporter.report(out).context("failed to write report")
}
