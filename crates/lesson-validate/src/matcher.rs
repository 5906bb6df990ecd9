//! # Tree Matcher
//!
//! Declarative pattern search over document trees.
//!
//! A [`Pattern`] is a set of named fields, each either a literal the field
//! must equal exactly or a nested pattern the field's value must itself
//! satisfy. A node matches when every field in the pattern is present and
//! satisfied; a missing field means no match. The empty pattern matches
//! every node.
//!
//! [`find_all`] walks a tree in pre-order and collects every matching node.
//! Children are visited whether or not their parent matched, so nested
//! matches (a blockquote inside a blockquote) are all reported.
//!
//! ## Fields
//!
//! Anything implementing [`Record`] can be matched. [`Node`] exposes
//! `kind` (text), `location` (integer, when known) and `attributes`
//! (a nested record of text values).

use std::collections::BTreeMap;

use lesson_core::Node;

/// Field name of a node's semantic category.
pub const KIND: &str = "kind";
/// Field name of a node's attribute record.
pub const ATTRIBUTES: &str = "attributes";
/// Field name of a node's body-relative line number.
pub const LOCATION: &str = "location";

/// A literal field value. Comparison is exact with no coercion:
/// `Text("3")` never equals `Integer(3)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Text(String),
    Integer(i64),
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

/// What a pattern expects of one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expected {
    /// The field must equal this literal.
    Literal(Literal),
    /// The field must be a record satisfying this pattern.
    Nested(Pattern),
}

/// A declarative node pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pattern {
    fields: BTreeMap<String, Expected>,
}

impl Pattern {
    /// The empty pattern, which matches everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pattern matching nodes of one kind.
    pub fn kind(kind: &str) -> Self {
        Self::new().literal(KIND, kind)
    }

    /// Require `key` to equal `value`.
    pub fn literal(mut self, key: impl Into<String>, value: impl Into<Literal>) -> Self {
        self.fields
            .insert(key.into(), Expected::Literal(value.into()));
        self
    }

    /// Require `key` to be a record satisfying `pattern`.
    pub fn nested(mut self, key: impl Into<String>, pattern: Pattern) -> Self {
        self.fields.insert(key.into(), Expected::Nested(pattern));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Does `record` satisfy this pattern?
    pub fn matches(&self, record: &dyn Record) -> bool {
        self.fields.iter().all(|(key, expected)| {
            match (record.field(key), expected) {
                (None, _) => false,
                (Some(FieldValue::Text(actual)), Expected::Literal(Literal::Text(want))) => {
                    actual == want.as_str()
                }
                (Some(FieldValue::Integer(actual)), Expected::Literal(Literal::Integer(want))) => {
                    actual == *want
                }
                (Some(FieldValue::Record(inner)), Expected::Nested(pattern)) => {
                    pattern.matches(inner)
                }
                _ => false,
            }
        })
    }
}

/// A field value as seen by the matcher.
pub enum FieldValue<'a> {
    Text(&'a str),
    Integer(i64),
    Record(&'a dyn Record),
}

/// Something with named fields that a [`Pattern`] can inspect.
pub trait Record {
    /// Look up one field; `None` when absent.
    fn field(&self, key: &str) -> Option<FieldValue<'_>>;
}

impl Record for Node {
    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        match key {
            KIND => Some(FieldValue::Text(&self.kind)),
            ATTRIBUTES => Some(FieldValue::Record(&self.attributes)),
            LOCATION => self
                .location
                .and_then(|location| i64::try_from(location).ok())
                .map(FieldValue::Integer),
            _ => None,
        }
    }
}

impl Record for BTreeMap<String, String> {
    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        self.get(key).map(|value| FieldValue::Text(value))
    }
}

/// Collect every node under (and including) `root` that matches `pattern`,
/// in pre-order.
pub fn find_all<'a>(root: &'a Node, pattern: &Pattern) -> Vec<&'a Node> {
    let mut found = Vec::new();
    collect(root, pattern, &mut found);
    found
}

fn collect<'a>(node: &'a Node, pattern: &Pattern, found: &mut Vec<&'a Node>) {
    if pattern.matches(node) {
        found.push(node);
    }
    for child in &node.children {
        collect(child, pattern, found);
    }
}
