//! # Checker Dispatch
//!
//! Maps a document path to the [`Variant`] of checks that applies to it.
//!
//! Rules are an ordered list of `(path pattern, variant)` pairs. The first
//! pattern that matches anywhere in the path wins; later rules are not
//! consulted. The standard rule set is:
//!
//! | Pattern             | Variant |
//! |---------------------|---------|
//! | `CONTRIBUTING\.md`  | [`Variant::NonJekyll`] |
//! | `README\.md`        | [`Variant::NonJekyll`] |
//! | `index\.md`         | [`Variant::Index`] |
//! | `reference\.md`     | [`Variant::Reference`] |
//! | `_episodes/.*\.md`  | [`Variant::Episode`] |
//! | `.*\.md`            | [`Variant::Generic`] |
//!
//! A path no rule matches gets [`Variant::Generic`].

use std::fmt;
use std::path::Path;

use regex::Regex;

use crate::error::{compile, RuleError};

/// What a document category requires of its front matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataPolicy {
    /// The file is not processed by the site generator: front matter must
    /// be absent.
    Forbidden,
    /// Front matter must be present and declare this `layout`.
    Layout(&'static str),
    /// Front matter must be present and satisfy the episode schema
    /// selected by its `layout`.
    EpisodeSchema,
}

/// Closed set of document categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Repository files the site generator does not process
    /// (contribution guide, top-level readme).
    NonJekyll,
    /// The lesson's landing page.
    Index,
    /// The glossary/reference page.
    Reference,
    /// A numbered episode.
    Episode,
    /// Any other page.
    Generic,
}

impl Variant {
    /// The `layout` value this category requires, if it requires one.
    pub fn required_layout(&self) -> Option<&'static str> {
        match self.metadata_policy() {
            MetadataPolicy::Layout(layout) => Some(layout),
            MetadataPolicy::Forbidden | MetadataPolicy::EpisodeSchema => None,
        }
    }

    pub fn metadata_policy(&self) -> MetadataPolicy {
        match self {
            Self::NonJekyll => MetadataPolicy::Forbidden,
            Self::Index => MetadataPolicy::Layout("lesson"),
            Self::Reference => MetadataPolicy::Layout("reference"),
            Self::Episode => MetadataPolicy::EpisodeSchema,
            Self::Generic => MetadataPolicy::Layout("page"),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NonJekyll => "non-jekyll",
            Self::Index => "index",
            Self::Reference => "reference",
            Self::Episode => "episode",
            Self::Generic => "generic",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Standard dispatch rules, in priority order.
pub const STANDARD_RULES: &[(&str, Variant)] = &[
    (r"CONTRIBUTING\.md", Variant::NonJekyll),
    (r"README\.md", Variant::NonJekyll),
    (r"index\.md", Variant::Index),
    (r"reference\.md", Variant::Reference),
    (r"_episodes/.*\.md", Variant::Episode),
    (r".*\.md", Variant::Generic),
];

/// Ordered, first-match-wins path rules.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    rules: Vec<(Regex, Variant)>,
}

impl Dispatcher {
    /// Dispatcher over [`STANDARD_RULES`].
    pub fn standard() -> Result<Self, RuleError> {
        Self::from_rules(STANDARD_RULES)
    }

    /// Compile an ordered rule list.
    pub fn from_rules(rules: &[(&str, Variant)]) -> Result<Self, RuleError> {
        let rules = rules
            .iter()
            .map(|(pattern, variant)| Ok((compile(pattern)?, *variant)))
            .collect::<Result<Vec<_>, RuleError>>()?;
        Ok(Self { rules })
    }

    /// Variant for `path`: the first rule whose pattern is found in it.
    pub fn select_variant(&self, path: &Path) -> Variant {
        let text = path_text(path);
        let variant = self
            .rules
            .iter()
            .find(|(pattern, _)| pattern.is_match(&text))
            .map(|(_, variant)| *variant)
            .unwrap_or(Variant::Generic);
        tracing::debug!(path = %path.display(), %variant, "selected checker");
        variant
    }
}

/// Path as text with `/` separators, so rules are platform-independent.
pub(crate) fn path_text(path: &Path) -> String {
    let text = path.to_string_lossy();
    if std::path::MAIN_SEPARATOR == '/' {
        text.into_owned()
    } else {
        text.replace(std::path::MAIN_SEPARATOR, "/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select(path: &str) -> Variant {
        Dispatcher::standard().unwrap().select_variant(Path::new(path))
    }

    #[test]
    fn standard_rules_compile() {
        assert!(Dispatcher::standard().is_ok());
    }

    #[test]
    fn non_jekyll_files() {
        assert_eq!(select("./README.md"), Variant::NonJekyll);
        assert_eq!(select("./CONTRIBUTING.md"), Variant::NonJekyll);
    }

    #[test]
    fn index_and_reference() {
        assert_eq!(select("./index.md"), Variant::Index);
        assert_eq!(select("./reference.md"), Variant::Reference);
    }

    #[test]
    fn episodes() {
        assert_eq!(select("./_episodes/01-intro.md"), Variant::Episode);
        assert_eq!(select("./_episodes/badname.md"), Variant::Episode);
    }

    #[test]
    fn everything_else_is_generic() {
        assert_eq!(select("./setup.md"), Variant::Generic);
        assert_eq!(select("./_extras/guide.md"), Variant::Generic);
        assert_eq!(select("./notes.txt"), Variant::Generic);
    }

    #[test]
    fn first_match_wins() {
        // Matches both the index rule and the episode rule; index comes first.
        assert_eq!(select("./_episodes/index.md"), Variant::Index);
        // README rule precedes everything.
        assert_eq!(select("./_extras/README.md"), Variant::NonJekyll);
    }

    #[test]
    fn custom_rule_order_is_respected() {
        let dispatcher = Dispatcher::from_rules(&[
            (r"\.md$", Variant::Reference),
            (r"index\.md", Variant::Index),
        ])
        .unwrap();
        assert_eq!(dispatcher.select_variant(Path::new("index.md")), Variant::Reference);
    }

    #[test]
    fn invalid_rule_is_an_error() {
        let err = Dispatcher::from_rules(&[("(", Variant::Generic)]).unwrap_err();
        assert!(err.to_string().contains("invalid rule pattern '('"));
    }

    #[test]
    fn capabilities() {
        assert_eq!(Variant::NonJekyll.metadata_policy(), MetadataPolicy::Forbidden);
        assert_eq!(Variant::Index.required_layout(), Some("lesson"));
        assert_eq!(Variant::Reference.required_layout(), Some("reference"));
        assert_eq!(Variant::Generic.required_layout(), Some("page"));
        assert_eq!(Variant::Episode.required_layout(), None);
        assert_eq!(Variant::Episode.metadata_policy(), MetadataPolicy::EpisodeSchema);
    }
}
