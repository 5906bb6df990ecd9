//! Errors raised while building the rule set at start-up.

use thiserror::Error;

/// A fixed rule could not be compiled.
#[derive(Error, Debug)]
pub enum RuleError {
    /// A path or filename pattern failed to compile.
    #[error("invalid rule pattern '{pattern}': {source}")]
    Pattern {
        /// The pattern text.
        pattern: String,
        /// Underlying regex error.
        #[source]
        source: regex::Error,
    },
}

/// Compile a fixed pattern, attaching the pattern text on failure.
pub(crate) fn compile(pattern: &str) -> Result<regex::Regex, RuleError> {
    regex::Regex::new(pattern).map_err(|source| RuleError::Pattern {
        pattern: pattern.to_string(),
        source,
    })
}
