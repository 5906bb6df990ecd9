//! # Documents and Structural Trees
//!
//! A [`Document`] is one lesson file as handed over by the loader: its
//! path, optional front matter, raw body lines, and the root [`Node`] of
//! the tree produced by the external Markdown parser.
//!
//! ## Line Numbers
//!
//! The parser sees only the body (front matter already stripped), so node
//! locations are body-relative. [`Document::line_of`] adds the front-matter
//! offset back to give a file line number. Raw [`Line`]s are stored with
//! file line numbers already.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::metadata::Metadata;

/// One element of a document tree.
///
/// Children are owned by their parent, so a tree is acyclic and every
/// node has exactly one parent (except the root).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    /// Semantic category, e.g. `blockquote`, `codeblock`, `p`.
    pub kind: String,
    /// Element attributes; `class` is the one the checks care about.
    pub attributes: BTreeMap<String, String>,
    /// Body-relative line number, when the parser reported one.
    pub location: Option<usize>,
    /// Child elements in document order.
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Shorthand for `with_attribute("class", ..)`.
    pub fn with_class(self, class: impl Into<String>) -> Self {
        self.with_attribute("class", class)
    }

    pub fn at(mut self, location: usize) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    /// The `class` attribute, if any.
    pub fn class(&self) -> Option<&str> {
        self.attributes.get("class").map(String::as_str)
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Node::subtree_len).sum::<usize>()
    }
}

/// One raw body line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// File line number (1-based, front matter included).
    pub number: usize,
    pub text: String,
    /// Length in characters.
    pub length: usize,
}

impl Line {
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        let text = text.into();
        let length = text.chars().count();
        Self { number, text, length }
    }
}

/// One loaded lesson file.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Unique identifier for the document within a run.
    pub path: PathBuf,
    /// Decoded front matter; `None` when the file has none.
    pub metadata: Option<Metadata>,
    /// Number of lines consumed by the front-matter block.
    pub metadata_offset: Option<usize>,
    /// Raw body lines.
    pub lines: Vec<Line>,
    /// Root of the parsed body.
    pub tree: Node,
}

impl Document {
    /// A document with no metadata, no lines, and an empty root.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            metadata: None,
            metadata_offset: None,
            lines: Vec::new(),
            tree: Node::new("root"),
        }
    }

    pub fn with_metadata(mut self, metadata: Metadata, offset: usize) -> Self {
        self.metadata = Some(metadata);
        self.with_offset(offset)
    }

    /// Record the lines a front-matter block takes up, whether or not it
    /// decoded to any metadata.
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.metadata_offset = Some(offset);
        self
    }

    pub fn with_lines(mut self, lines: Vec<Line>) -> Self {
        self.lines = lines;
        self
    }

    pub fn with_tree(mut self, tree: Node) -> Self {
        self.tree = tree;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File line number of a node from this document's tree.
    ///
    /// Adds the front-matter offset (zero when absent) to the node's
    /// body-relative location. Returns `None` when the node has no location.
    pub fn line_of(&self, node: &Node) -> Option<usize> {
        node.location
            .map(|location| location + self.metadata_offset.unwrap_or(0))
    }
}
