//! # Violations
//!
//! A [`Violation`] is one recorded rule failure: what kind of rule failed,
//! where (if known), and a rendered human-readable message. Violations are
//! data, not errors; they accumulate in a reporter and are printed together
//! at the end of a run.

use std::fmt;
use std::path::{Path, PathBuf};

/// Where a violation was found.
///
/// File-scope violations (missing required files, numbering problems) carry
/// no location at all and are represented as `Option::<Location>::None`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Location {
    /// Somewhere in this file.
    File(PathBuf),
    /// A specific (1-based) line of this file.
    Line(PathBuf, usize),
}

impl Location {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    pub fn line(path: impl Into<PathBuf>, line: usize) -> Self {
        Self::Line(path.into(), line)
    }

    /// A line location when `line` is known, otherwise file scope.
    pub fn at(path: impl Into<PathBuf>, line: Option<usize>) -> Self {
        match line {
            Some(line) => Self::Line(path.into(), line),
            None => Self::File(path.into()),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::File(path) | Self::Line(path, _) => path,
        }
    }

    pub fn line_number(&self) -> Option<usize> {
        match self {
            Self::File(_) => None,
            Self::Line(_, line) => Some(*line),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Line(path, line) => write!(f, "{}:{}", path.display(), line),
        }
    }
}

/// The rule family a violation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    /// A lesson configuration field is missing or has the wrong value.
    Configuration,
    /// The document's category requires metadata and it has none.
    MissingMetadata,
    /// The document's category forbids metadata and it has some.
    UnexpectedMetadata,
    /// A schema field is absent.
    MissingField,
    /// A schema field has the wrong semantic type.
    WrongFieldType,
    /// The `layout` value is not one this document category accepts.
    UnknownLayout,
    /// A blockquote's class is missing or not in the known set.
    UnknownBlockquoteClass,
    /// A code block's class is missing or not in the known set.
    UnknownCodeblockClass,
    /// A catalogued file is not present in the lesson.
    MissingRequiredFile,
    /// An episode file name does not follow `NN-slug.md`.
    BadEpisodeFilename,
    /// Two or more episodes share a number.
    DuplicateEpisodeNumber,
    /// Sorted episode numbers are not consecutive.
    NonConsecutiveEpisodes,
    /// A body line exceeds the maximum length.
    LineTooLong,
}

/// One recorded rule failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub kind: ViolationKind,
    pub location: Option<Location>,
    pub message: String,
}

impl Violation {
    pub fn new(kind: ViolationKind, location: Option<Location>, message: impl Into<String>) -> Self {
        Self {
            kind,
            location,
            message: message.into(),
        }
    }

    /// Ordering key for reports: file-scope first, then by path and line.
    pub fn sort_key(&self) -> (Option<&Path>, Option<usize>) {
        match &self.location {
            None => (None, None),
            Some(location) => (Some(location.path()), location.line_number()),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            None => f.write_str(&self.message),
            Some(location) => write!(f, "{location}: {}", self.message),
        }
    }
}
