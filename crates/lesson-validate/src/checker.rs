//! # Document and Lesson Checks
//!
//! [`check_document`] runs every per-document check for one [`Variant`]:
//! front-matter policy, optional line lengths, and blockquote / code block
//! classes. [`LessonChecker`] ties dispatch, per-document checks and the
//! file-set checks together for a whole lesson.

use std::path::{Path, PathBuf};

use lesson_core::{Document, Location, Metadata, ViolationKind};

use crate::catalogue::{
    is_known_blockquote, is_known_codeblock, EMBED_MARKER, MAX_LINE_LEN,
};
use crate::dispatch::{Dispatcher, MetadataPolicy, Variant};
use crate::error::RuleError;
use crate::fileset::FileSetValidator;
use crate::matcher::{find_all, Pattern};
use crate::reporter::Reporter;
use crate::schema::{check_episode_metadata, LAYOUT_FIELD};

/// Name of the lesson configuration file inside the source directory.
pub const CONFIG_FILE: &str = "_config.yml";

/// Required value of the configuration's `kind` field.
pub const LESSON_KIND: &str = "lesson";

/// Run-wide switches for the per-document checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckSettings {
    /// Flag body lines longer than [`MAX_LINE_LEN`].
    pub line_length_check: bool,
}

/// Check the lesson configuration: `kind` must be `lesson`.
pub fn check_config(path: &Path, config: &Metadata, reporter: &mut Reporter) {
    reporter.check_field(
        ViolationKind::Configuration,
        Some(Location::file(path)),
        "configuration",
        config,
        "kind",
        LESSON_KIND,
    );
}

/// Run every check `variant` calls for on `doc`.
pub fn check_document(
    variant: Variant,
    doc: &Document,
    settings: &CheckSettings,
    reporter: &mut Reporter,
) {
    check_metadata(variant, doc, reporter);
    if settings.line_length_check {
        check_line_lengths(doc, reporter);
    }
    check_blockquote_classes(doc, reporter);
    check_codeblock_classes(doc, reporter);
}

fn check_metadata(variant: Variant, doc: &Document, reporter: &mut Reporter) {
    let file = || Some(Location::file(doc.path()));

    let metadata = match (variant.metadata_policy(), &doc.metadata) {
        (MetadataPolicy::Forbidden, metadata) => {
            reporter.check(
                metadata.is_none(),
                ViolationKind::UnexpectedMetadata,
                file(),
                format_args!("Unexpected metadata"),
            );
            return;
        }
        (_, None) => {
            reporter.add(
                ViolationKind::MissingMetadata,
                file(),
                format_args!("Missing metadata entirely"),
            );
            return;
        }
        // An explicit `{}` counts as present, so its fields are still checked.
        (_, Some(metadata)) => metadata,
    };

    match variant.metadata_policy() {
        MetadataPolicy::Layout(layout) => {
            reporter.check_field(
                ViolationKind::UnknownLayout,
                file(),
                "metadata",
                metadata,
                LAYOUT_FIELD,
                layout,
            );
        }
        MetadataPolicy::EpisodeSchema => {
            reporter.extend(check_episode_metadata(doc.path(), metadata));
        }
        MetadataPolicy::Forbidden => {}
    }
}

/// One violation per document listing every over-long body line.
/// Lines starting with [`EMBED_MARKER`] are exempt.
fn check_line_lengths(doc: &Document, reporter: &mut Reporter) {
    let over: Vec<String> = doc
        .lines
        .iter()
        .filter(|line| line.length > MAX_LINE_LEN && !line.text.starts_with(EMBED_MARKER))
        .map(|line| line.number.to_string())
        .collect();
    reporter.check(
        over.is_empty(),
        ViolationKind::LineTooLong,
        Some(Location::file(doc.path())),
        format_args!("Line(s) are too long: {}", over.join(", ")),
    );
}

fn check_blockquote_classes(doc: &Document, reporter: &mut Reporter) {
    for node in find_all(&doc.tree, &Pattern::kind("blockquote")) {
        let class = node.class();
        reporter.check(
            class.is_some_and(is_known_blockquote),
            ViolationKind::UnknownBlockquoteClass,
            Some(Location::at(doc.path(), doc.line_of(node))),
            format_args!("Unknown or missing blockquote type {}", class.unwrap_or("<missing>")),
        );
    }
}

fn check_codeblock_classes(doc: &Document, reporter: &mut Reporter) {
    for node in find_all(&doc.tree, &Pattern::kind("codeblock")) {
        let class = node.class();
        reporter.check(
            class.is_some_and(is_known_codeblock),
            ViolationKind::UnknownCodeblockClass,
            Some(Location::at(doc.path(), doc.line_of(node))),
            format_args!("Unknown or missing code block type {}", class.unwrap_or("<missing>")),
        );
    }
}

/// Validates a whole lesson: file set first, then each document.
#[derive(Debug, Clone)]
pub struct LessonChecker {
    dispatcher: Dispatcher,
    file_set: FileSetValidator,
    settings: CheckSettings,
}

impl LessonChecker {
    /// Checker with the standard dispatch rules and catalogue.
    pub fn new(settings: CheckSettings) -> Result<Self, RuleError> {
        Ok(Self {
            dispatcher: Dispatcher::standard()?,
            file_set: FileSetValidator::new()?,
            settings,
        })
    }

    /// Check one document with the variant its path selects.
    pub fn check_document(&self, doc: &Document, reporter: &mut Reporter) -> Variant {
        let variant = self.dispatcher.select_variant(doc.path());
        check_document(variant, doc, &self.settings, reporter);
        variant
    }

    /// Run the file-set checks over every document path, then check each
    /// document in order.
    pub fn check_lesson(&self, source_root: &Path, docs: &[Document], reporter: &mut Reporter) {
        let paths: Vec<PathBuf> = docs.iter().map(|doc| doc.path.clone()).collect();
        reporter.extend(self.file_set.check_file_set(source_root, &paths));

        for doc in docs {
            let before = reporter.len();
            let variant = self.check_document(doc, reporter);
            tracing::debug!(
                path = %doc.path.display(),
                %variant,
                violations = reporter.len() - before,
                "checked document"
            );
        }
        tracing::info!(documents = docs.len(), violations = reporter.len(), "lesson checked");
    }
}
