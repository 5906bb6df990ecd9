//! # Reporter
//!
//! The single sink for every violation found in a run. Checkers never
//! decide success or failure themselves: they record what they find here,
//! and [`Reporter::report`] renders the lot and yields the run's
//! [`Outcome`].
//!
//! The idiom used throughout the engine is [`Reporter::check`]: state the
//! condition that should hold, and a violation is recorded only when it
//! does not.
//!
//! ```
//! use lesson_core::{Location, ViolationKind};
//! use lesson_validate::Reporter;
//!
//! let mut reporter = Reporter::new();
//! let metadata_present = false;
//! reporter.check(
//!     metadata_present,
//!     ViolationKind::MissingMetadata,
//!     Some(Location::file("./setup.md")),
//!     format_args!("Missing metadata entirely"),
//! );
//! assert_eq!(reporter.len(), 1);
//! ```

use std::fmt;
use std::io::{self, Write};

use lesson_core::{render_value, Location, Metadata, Violation, ViolationKind};

/// Result of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No violations were recorded.
    Clean,
    /// At least one violation was recorded.
    Failed {
        /// How many.
        violations: usize,
    },
}

impl Outcome {
    pub fn is_clean(&self) -> bool {
        matches!(self, Self::Clean)
    }

    /// Process exit code: 0 when clean, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Clean => 0,
            Self::Failed { .. } => 1,
        }
    }
}

/// Accumulates violations for one run.
#[derive(Debug, Default)]
pub struct Reporter {
    violations: Vec<Violation>,
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation unconditionally.
    pub fn add(
        &mut self,
        kind: ViolationKind,
        location: Option<Location>,
        message: fmt::Arguments<'_>,
    ) {
        self.push(Violation::new(kind, location, message.to_string()));
    }

    /// Record an already-built violation.
    pub fn push(&mut self, violation: Violation) {
        tracing::debug!(kind = ?violation.kind, "{violation}");
        self.violations.push(violation);
    }

    /// Record a violation only if `condition` is false.
    ///
    /// Returns `condition`, so callers can skip dependent checks.
    pub fn check(
        &mut self,
        condition: bool,
        kind: ViolationKind,
        location: Option<Location>,
        message: fmt::Arguments<'_>,
    ) -> bool {
        if !condition {
            self.add(kind, location, message);
        }
        condition
    }

    /// Check that `values[key]` exists and is the text `expected`.
    ///
    /// `name` describes the mapping in messages ("configuration",
    /// "metadata"). Both the missing-key and wrong-value cases are
    /// recorded as `kind`.
    pub fn check_field(
        &mut self,
        kind: ViolationKind,
        location: Option<Location>,
        name: &str,
        values: &Metadata,
        key: &str,
        expected: &str,
    ) -> bool {
        match values.get(key) {
            None => {
                self.add(kind, location, format_args!("{name} does not contain {key}"));
                false
            }
            Some(actual) if actual.as_str() != Some(expected) => {
                self.add(
                    kind,
                    location,
                    format_args!("{name} {key} is {} not {expected}", render_value(actual)),
                );
                false
            }
            Some(_) => true,
        }
    }

    pub fn extend(&mut self, violations: impl IntoIterator<Item = Violation>) {
        for violation in violations {
            self.push(violation);
        }
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Number of recorded violations of one kind.
    pub fn count(&self, kind: ViolationKind) -> usize {
        self.violations.iter().filter(|v| v.kind == kind).count()
    }

    /// Violations in report order: file-scope first, then by path and line.
    /// Ties keep the order in which they were recorded.
    pub fn sorted(&self) -> Vec<&Violation> {
        let mut sorted: Vec<&Violation> = self.violations.iter().collect();
        sorted.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        sorted
    }

    /// Render every violation to `out`, one per line, and consume the
    /// reporter.
    pub fn report<W: Write>(self, out: &mut W) -> io::Result<Outcome> {
        for violation in self.sorted() {
            writeln!(out, "{violation}")?;
        }
        out.flush()?;

        let outcome = if self.violations.is_empty() {
            Outcome::Clean
        } else {
            Outcome::Failed {
                violations: self.violations.len(),
            }
        };
        tracing::info!(violations = self.violations.len(), "report complete");
        Ok(outcome)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_violation() -> impl Strategy<Value = Violation> {
        let location = prop_oneof![
            Just(None),
            "[a-c]\\.md".prop_map(|p| Some(Location::file(p))),
            ("[a-c]\\.md", 1usize..50).prop_map(|(p, l)| Some(Location::line(p, l))),
        ];
        (location, "[a-z ]{1,20}").prop_map(|(location, message)| {
            Violation::new(ViolationKind::LineTooLong, location, message)
        })
    }

    proptest! {
        /// The same violations always render to the same bytes.
        #[test]
        fn report_is_deterministic(violations in prop::collection::vec(arb_violation(), 0..20)) {
            let mut first = Reporter::new();
            first.extend(violations.clone());
            let mut second = Reporter::new();
            second.extend(violations.clone());

            let mut a = Vec::new();
            let mut b = Vec::new();
            let outcome_a = first.report(&mut a).unwrap();
            let outcome_b = second.report(&mut b).unwrap();
            prop_assert_eq!(a, b);
            prop_assert_eq!(outcome_a, outcome_b);
            prop_assert_eq!(outcome_a.is_clean(), violations.is_empty());
        }
    }
}
