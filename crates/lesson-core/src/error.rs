//! # Error Types
//!
//! Errors raised while turning decoded front matter into [`Metadata`].
//! Content problems in a lesson are not errors: they are recorded as
//! [`Violation`](crate::Violation)s and reported at the end of a run.
//!
//! [`Metadata`]: crate::Metadata

use thiserror::Error;

use crate::metadata::ValueType;

/// Front matter could not be interpreted as a metadata mapping.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetadataError {
    /// The front matter decoded to something other than a mapping.
    #[error("front matter must be a mapping, found {found}")]
    NotAMapping {
        /// Semantic type of the decoded value.
        found: ValueType,
    },

    /// A mapping key was not a plain scalar.
    #[error("front matter key must be text, found {found}")]
    NonTextKey {
        /// Semantic type of the offending key.
        found: ValueType,
    },
}
