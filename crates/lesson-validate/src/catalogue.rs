//! # Rule Catalogue
//!
//! The fixed lesson-template taxonomy: which files a lesson must contain,
//! which blockquote and code block classes are recognised, and how long a
//! body line may be. These are immutable for the life of the process.

use std::path::{Path, PathBuf};

/// Placeholder in [`RequiredFile::template`] replaced by the source root.
pub const ROOT_PLACEHOLDER: char = '%';

/// Directory holding numbered episodes.
pub const EPISODE_DIR: &str = "_episodes";

/// Directory holding extra pages.
pub const EXTRAS_DIR: &str = "_extras";

/// Extension of lesson documents.
pub const DOCUMENT_EXTENSION: &str = "md";

/// Maximum body line length, in characters, when line checks are enabled.
pub const MAX_LINE_LEN: usize = 100;

/// Lines starting with this marker (images, embeds) are exempt from the
/// line-length check.
pub const EMBED_MARKER: char = '!';

/// Recognised blockquote classes.
pub const KNOWN_BLOCKQUOTES: &[&str] = &[
    "callout",
    "challenge",
    "checklist",
    "discussion",
    "keypoints",
    "objectives",
    "prereq",
    "quotation",
    "solution",
    "testimonial",
];

/// Recognised code block classes.
pub const KNOWN_CODEBLOCKS: &[&str] = &[
    "error", "output", "source", "bash", "make", "python", "r", "sql",
];

/// A file every lesson must contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredFile {
    /// Path with [`ROOT_PLACEHOLDER`] standing in for the source root.
    pub template: &'static str,
    /// Whether the file is expected to carry front matter. Recorded for
    /// catalogue completeness; only presence is checked.
    pub metadata: bool,
}

impl RequiredFile {
    /// Substitute `root` for the placeholder.
    pub fn resolve(&self, root: &Path) -> PathBuf {
        let root = root.to_string_lossy();
        PathBuf::from(self.template.replace(ROOT_PLACEHOLDER, &root))
    }
}

/// Files every lesson must contain.
pub const REQUIRED_FILES: &[RequiredFile] = &[
    RequiredFile { template: "%/CONDUCT.md", metadata: true },
    RequiredFile { template: "%/LICENSE.md", metadata: true },
    RequiredFile { template: "%/README.md", metadata: false },
    RequiredFile { template: "%/_extras/discuss.md", metadata: true },
    RequiredFile { template: "%/_extras/figures.md", metadata: true },
    RequiredFile { template: "%/_extras/guide.md", metadata: true },
    RequiredFile { template: "%/index.md", metadata: true },
    RequiredFile { template: "%/reference.md", metadata: true },
    RequiredFile { template: "%/setup.md", metadata: true },
];

pub fn is_known_blockquote(class: &str) -> bool {
    KNOWN_BLOCKQUOTES.contains(&class)
}

pub fn is_known_codeblock(class: &str) -> bool {
    KNOWN_CODEBLOCKS.contains(&class)
}
