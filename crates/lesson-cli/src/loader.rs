//! # Document Loading
//!
//! Turns lesson source files into [`Document`]s:
//!
//! - [`discover`] lists `*.md` files in the source root, `_episodes/` and
//!   `_extras/` (non-recursive, sorted).
//! - [`split_front_matter`] separates the YAML header from the body.
//! - [`MarkdownParser`] runs the external parser script and converts its
//!   JSON tree into a [`Node`].
//!
//! Unreadable files and malformed front matter are fatal ([`LoadError`]).
//! A document the parser cannot handle is skipped with a warning so the
//! rest of the lesson is still checked.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde::Deserialize;
use thiserror::Error;

use lesson_core::{Document, Line, Metadata, MetadataError, Node};
use lesson_validate::catalogue::{DOCUMENT_EXTENSION, EPISODE_DIR, EXTRAS_DIR};

/// Directories scanned for documents, relative to the source root.
pub const SOURCE_DIRS: &[&str] = &["", EPISODE_DIR, EXTRAS_DIR];

const FRONT_MATTER_FENCE: &str = "---";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid YAML in {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("unusable metadata in {}: {source}", path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: MetadataError,
    },

    /// The parser could not be run or produced unusable output.
    #[error("Markdown parser failed on {}: {reason}", path.display())]
    Parser { path: PathBuf, reason: String },
}

/// A file split into its front-matter block and body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontMatter<'a> {
    /// Raw YAML between the fences, including its trailing newline.
    pub raw: Option<&'a str>,
    pub body: &'a str,
}

impl FrontMatter<'_> {
    /// Lines taken up by the header before the body starts, minus one.
    /// Added to parser locations to get file line numbers.
    pub fn offset(&self) -> Option<usize> {
        self.raw.map(|raw| raw.matches('\n').count())
    }
}

/// Split `text` at its front matter. Text that does not start with `---`,
/// or has no closing fence, is all body.
pub fn split_front_matter(text: &str) -> FrontMatter<'_> {
    let whole = FrontMatter { raw: None, body: text };
    let Some(rest) = text.strip_prefix(FRONT_MATTER_FENCE) else {
        return whole;
    };
    let Some(end) = rest.find("\n---") else {
        return whole;
    };
    FrontMatter {
        raw: Some(&rest[..end + 1]),
        body: &rest[end + 4..],
    }
}

/// List lesson documents under `source_dir`.
pub fn discover(source_dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let mut found = Vec::new();
    for dir in SOURCE_DIRS {
        let dir = if dir.is_empty() {
            source_dir.to_path_buf()
        } else {
            source_dir.join(dir)
        };
        if !dir.is_dir() {
            tracing::debug!(dir = %dir.display(), "source directory absent");
            continue;
        }
        let read_err = |source: io::Error| LoadError::Read { path: dir.clone(), source };
        for entry in fs::read_dir(&dir).map_err(read_err)? {
            let path = entry.map_err(read_err)?.path();
            let hidden = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with('.'));
            if path.is_file() && !hidden && path.extension().is_some_and(|ext| ext == DOCUMENT_EXTENSION) {
                found.push(path);
            }
        }
    }
    found.sort();
    Ok(found)
}

/// Parse a YAML file into [`Metadata`]. An empty file is an empty mapping.
pub fn read_config(path: &Path) -> Result<Metadata, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_metadata(path, &text)?.unwrap_or_default())
}

fn parse_metadata(path: &Path, raw: &str) -> Result<Option<Metadata>, LoadError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    let value: serde_yaml::Value = serde_yaml::from_str(raw).map_err(|source| LoadError::Yaml {
        path: path.to_path_buf(),
        source,
    })?;
    Metadata::from_value(value).map_err(|source| LoadError::Metadata {
        path: path.to_path_buf(),
        source,
    })
}

/// External Markdown parser: `interpreter script`, body on stdin, JSON
/// tree on stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownParser {
    pub interpreter: String,
    pub script: PathBuf,
}

impl MarkdownParser {
    pub fn new(interpreter: impl Into<String>, script: impl Into<PathBuf>) -> Self {
        Self {
            interpreter: interpreter.into(),
            script: script.into(),
        }
    }

    /// Parse `body`, attributing failures to `path`.
    pub fn parse(&self, path: &Path, body: &str) -> Result<Node, LoadError> {
        let fail = |reason: String| LoadError::Parser {
            path: path.to_path_buf(),
            reason,
        };

        let mut child = Command::new(&self.interpreter)
            .arg(&self.script)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| fail(format!("cannot start {}: {e}", self.interpreter)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(body.as_bytes())
                .map_err(|e| fail(format!("cannot write input: {e}")))?;
        }
        let output = child
            .wait_with_output()
            .map_err(|e| fail(format!("cannot collect output: {e}")))?;

        if !output.status.success() {
            return Err(fail(format!(
                "{}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        let raw: RawNode = serde_json::from_slice(&output.stdout)
            .map_err(|e| fail(format!("unreadable tree: {e}")))?;
        Ok(raw.into_node())
    }
}

/// Parser output node.
#[derive(Debug, Deserialize)]
struct RawNode {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    attr: Option<BTreeMap<String, serde_json::Value>>,
    #[serde(default)]
    options: Option<RawOptions>,
    #[serde(default)]
    children: Option<Vec<RawNode>>,
}

#[derive(Debug, Deserialize)]
struct RawOptions {
    #[serde(default)]
    location: Option<usize>,
}

impl RawNode {
    fn into_node(self) -> Node {
        let attributes = self
            .attr
            .unwrap_or_default()
            .into_iter()
            .map(|(key, value)| {
                let value = match value {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                };
                (key, value)
            })
            .collect();
        Node {
            kind: self.kind,
            attributes,
            location: self.options.and_then(|options| options.location),
            children: self
                .children
                .unwrap_or_default()
                .into_iter()
                .map(RawNode::into_node)
                .collect(),
        }
    }
}

/// Load one document. `Ok(None)` means the parser rejected it and it was
/// skipped.
pub fn read_document(parser: &MarkdownParser, path: &Path) -> Result<Option<Document>, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let front = split_front_matter(&text);

    let mut doc = Document::new(path);
    if let (Some(raw), Some(offset)) = (front.raw, front.offset()) {
        doc = match parse_metadata(path, raw)? {
            Some(metadata) => doc.with_metadata(metadata, offset),
            None => doc.with_offset(offset),
        };
    }

    let first = front.offset().unwrap_or(0) + 1;
    let lines = front
        .body
        .lines()
        .enumerate()
        .map(|(i, text)| Line::new(first + i, text))
        .collect();
    doc = doc.with_lines(lines);

    match parser.parse(path, front.body) {
        Ok(tree) => Ok(Some(doc.with_tree(tree))),
        Err(e) => {
            tracing::warn!("{e}; skipping");
            Ok(None)
        }
    }
}

/// Discover and load every document under `source_dir`.
pub fn read_all_markdown(source_dir: &Path, parser: &MarkdownParser) -> Result<Vec<Document>, LoadError> {
    let paths = discover(source_dir)?;
    tracing::debug!(count = paths.len(), "discovered documents");
    let mut docs = Vec::with_capacity(paths.len());
    for path in &paths {
        if let Some(doc) = read_document(parser, path)? {
            docs.push(doc);
        }
    }
    Ok(docs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, text: &str) -> PathBuf {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn split_without_front_matter() {
        let front = split_front_matter("# Title\n\nText\n");
        assert_eq!(front.raw, None);
        assert_eq!(front.body, "# Title\n\nText\n");
        assert_eq!(front.offset(), None);
    }

    #[test]
    fn split_with_front_matter() {
        let front = split_front_matter("---\nlayout: page\ntitle: Setup\n---\nBody\n");
        assert_eq!(front.raw, Some("\nlayout: page\ntitle: Setup\n"));
        assert_eq!(front.body, "\nBody\n");
        assert_eq!(front.offset(), Some(3));
    }

    #[test]
    fn split_unterminated_is_all_body() {
        let front = split_front_matter("---\nlayout: page\n");
        assert_eq!(front.raw, None);
    }

    #[test]
    fn body_lines_are_numbered_in_file_terms() {
        // Line 5 of the file is "Body" and is the first non-empty body line.
        let text = "---\nlayout: page\ntitle: Setup\n---\nBody\n";
        let front = split_front_matter(text);
        let first = front.offset().unwrap() + 1;
        let numbered: Vec<_> = front.body.lines().enumerate().map(|(i, l)| (first + i, l)).collect();
        assert_eq!(numbered, vec![(4, ""), (5, "Body")]);
        assert_eq!(text.lines().nth(4), Some("Body"));
    }

    #[test]
    fn discover_scans_three_directories_non_recursively() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "index.md", "");
        write(root, "notes.txt", "");
        write(root, ".hidden.md", "");
        write(root, "_episodes/02-b.md", "");
        write(root, "_episodes/01-a.md", "");
        write(root, "_episodes/old/00-x.md", "");
        write(root, "_extras/guide.md", "");
        write(root, "other/ignored.md", "");

        let found = discover(root).unwrap();
        let expected: Vec<PathBuf> = ["_episodes/01-a.md", "_episodes/02-b.md", "_extras/guide.md", "index.md"]
            .iter()
            .map(|rel| root.join(rel))
            .collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn read_config_accepts_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = write(dir.path(), "_config.yml", "");
        assert!(read_config(&path).unwrap().is_empty());
    }

    #[test]
    fn read_config_parses_fields() {
        let dir = TempDir::new().unwrap();
        let path = write(dir.path(), "_config.yml", "kind: lesson\ntitle: Shell\n");
        let config = read_config(&path).unwrap();
        assert_eq!(config.text("kind"), Some("lesson"));
    }

    #[test]
    fn read_config_rejects_invalid_yaml() {
        let dir = TempDir::new().unwrap();
        let path = write(dir.path(), "_config.yml", "kind: [lesson\n");
        assert!(matches!(read_config(&path), Err(LoadError::Yaml { .. })));
    }

    #[test]
    fn read_config_rejects_sequence() {
        let dir = TempDir::new().unwrap();
        let path = write(dir.path(), "_config.yml", "- kind\n- lesson\n");
        assert!(matches!(read_config(&path), Err(LoadError::Metadata { .. })));
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        let err = read_config(&dir.path().join("_config.yml")).unwrap_err();
        assert!(matches!(err, LoadError::Read { .. }));
        assert!(err.to_string().starts_with("cannot read "));
    }

    #[test]
    fn unstartable_parser_skips_document() {
        let dir = TempDir::new().unwrap();
        let path = write(dir.path(), "setup.md", "---\nlayout: page\n---\nBody\n");
        let parser = MarkdownParser::new("lesson-check-no-such-interpreter", "ast.rb");
        assert!(matches!(
            parser.parse(&path, "Body\n"),
            Err(LoadError::Parser { .. })
        ));
        assert!(read_document(&parser, &path).unwrap().is_none());
    }

    #[test]
    fn invalid_front_matter_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = write(dir.path(), "setup.md", "---\nlayout: [page\n---\nBody\n");
        let parser = MarkdownParser::new("lesson-check-no-such-interpreter", "ast.rb");
        assert!(matches!(
            read_document(&parser, &path),
            Err(LoadError::Yaml { .. })
        ));
    }

    #[test]
    fn raw_tree_conversion() {
        let json = r#"{
            "type": "root",
            "attr": null,
            "options": {"location": 1},
            "children": [
                {"type": "blockquote", "attr": {"class": "challenge"}, "options": {"location": 3}, "children": []},
                {"type": "codeblock", "attr": {"class": "python", "data-n": 2}, "options": {}},
                {"type": "text"}
            ]
        }"#;
        let node = serde_json::from_str::<RawNode>(json).unwrap().into_node();
        assert_eq!(node.kind, "root");
        assert!(node.attributes.is_empty());
        assert_eq!(node.children.len(), 3);
        assert_eq!(node.children[0].class(), Some("challenge"));
        assert_eq!(node.children[0].location, Some(3));
        assert_eq!(node.children[1].attributes["data-n"], "2");
        assert_eq!(node.children[1].location, None);
        assert_eq!(node.children[2].location, None);
    }

    #[cfg(unix)]
    #[test]
    fn parser_script_output_becomes_tree() {
        let dir = TempDir::new().unwrap();
        let script = write(
            dir.path(),
            "ast.sh",
            "cat >/dev/null\nprintf '%s' '{\"type\":\"root\",\"children\":[{\"type\":\"blockquote\",\"attr\":{\"class\":\"callout\"},\"options\":{\"location\":3}}]}'\n",
        );
        let doc_path = write(dir.path(), "setup.md", "---\nlayout: page\n---\n\n> note\n");
        let parser = MarkdownParser::new("sh", script);
        let doc = read_document(&parser, &doc_path).unwrap().unwrap();
        assert_eq!(doc.metadata.as_ref().and_then(|m| m.text("layout")), Some("page"));
        assert_eq!(doc.metadata_offset, Some(2));
        let quote = &doc.tree.children[0];
        assert_eq!(doc.line_of(quote), Some(5));
        assert_eq!(doc.lines.last().map(|l| (l.number, l.text.as_str())), Some((5, "> note")));
    }

    #[cfg(unix)]
    #[test]
    fn empty_front_matter_still_offsets_nodes() {
        let dir = TempDir::new().unwrap();
        // Body-relative line of "> note" for each file.
        for (text, location) in [("---\n---\n\n> note\n", 3), ("---\n~\n---\n> note\n", 2)] {
            let script = write(
                dir.path(),
                "ast.sh",
                &format!(
                    "cat >/dev/null\nprintf '%s' '{{\"type\":\"root\",\"children\":[{{\"type\":\"blockquote\",\"options\":{{\"location\":{location}}}}}]}}'\n"
                ),
            );
            let parser = MarkdownParser::new("sh", script);
            let doc_path = write(dir.path(), "setup.md", text);
            let doc = read_document(&parser, &doc_path).unwrap().unwrap();
            assert!(doc.metadata.is_none());
            let note = doc.lines.iter().find(|l| l.text == "> note").map(|l| l.number);
            assert_eq!(note, text.lines().position(|l| l == "> note").map(|i| i + 1));
            assert_eq!(doc.line_of(&doc.tree.children[0]), note, "{text:?}");
        }
    }

    #[cfg(unix)]
    #[test]
    fn failing_parser_script_skips_document() {
        let dir = TempDir::new().unwrap();
        let script = write(dir.path(), "ast.sh", "cat >/dev/null\necho broken >&2\nexit 3\n");
        let doc_path = write(dir.path(), "setup.md", "Body\n");
        let parser = MarkdownParser::new("sh", script);
        let err = parser.parse(&doc_path, "Body\n").unwrap_err();
        assert!(err.to_string().contains("broken"));
        assert!(read_document(&parser, &doc_path).unwrap().is_none());
    }
}
