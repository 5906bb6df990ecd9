//! # Front-Matter Metadata
//!
//! Typed view over a document's decoded front matter. The on-disk YAML is
//! decoded elsewhere; this module only classifies values by their semantic
//! type so schema checks compare "text vs. integer vs. list" rather than
//! language-level representations.

use std::collections::BTreeMap;
use std::fmt;

use serde_yaml::Value;

use crate::error::MetadataError;

/// Semantic type of a metadata value.
///
/// Integers and floats are distinct types, as are booleans and integers:
/// `teaching: true` is a boolean, not an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// A string scalar.
    Text,
    /// A whole number.
    Integer,
    /// A number with a fractional part or exponent.
    Float,
    /// `true` or `false`.
    Boolean,
    /// An ordered sequence.
    List,
    /// A nested mapping.
    Mapping,
    /// An explicit null or empty value.
    Null,
}

impl ValueType {
    /// Classify a decoded YAML value. Tags are ignored.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(n) if n.is_i64() || n.is_u64() => Self::Integer,
            Value::Number(_) => Self::Float,
            Value::String(_) => Self::Text,
            Value::Sequence(_) => Self::List,
            Value::Mapping(_) => Self::Mapping,
            Value::Tagged(tagged) => Self::of(&tagged.value),
        }
    }

    /// Returns the lowercase name used in messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::List => "list",
            Self::Mapping => "mapping",
            Self::Null => "null",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decoded front matter: field name to value.
///
/// Keys are kept sorted so iteration (and therefore any message derived
/// from it) is deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    fields: BTreeMap<String, Value>,
}

impl Metadata {
    /// Create an empty metadata mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Interpret a decoded front-matter value.
    ///
    /// `Null` (an empty front-matter block) yields `Ok(None)`: the document
    /// is treated as having no metadata at all. Scalar keys are rendered to
    /// text; any other top-level shape is an error.
    pub fn from_value(value: Value) -> Result<Option<Self>, MetadataError> {
        match value {
            Value::Null => Ok(None),
            Value::Tagged(tagged) => Self::from_value(tagged.value),
            Value::Mapping(mapping) => {
                let mut fields = BTreeMap::new();
                for (key, value) in mapping {
                    let key = match key {
                        Value::String(s) => s,
                        Value::Number(n) => n.to_string(),
                        Value::Bool(b) => b.to_string(),
                        other => {
                            return Err(MetadataError::NonTextKey {
                                found: ValueType::of(&other),
                            })
                        }
                    };
                    fields.insert(key, value);
                }
                Ok(Some(Self { fields }))
            }
            other => Err(MetadataError::NotAMapping {
                found: ValueType::of(&other),
            }),
        }
    }

    /// Set a field, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Remove a field, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Returns the field's value if it is a text scalar.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Render a metadata value for inclusion in a message.
///
/// Scalars render bare (`break`, `3`, `true`); sequences and mappings
/// render in YAML flow style.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Sequence(items) => {
            let items: Vec<String> = items.iter().map(render_value).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Mapping(mapping) => {
            let entries: Vec<String> = mapping
                .iter()
                .map(|(k, v)| format!("{}: {}", render_value(k), render_value(v)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
        Value::Tagged(tagged) => render_value(&tagged.value),
    }
}
