//! # Metadata Schemas
//!
//! Field/type schemas for episode front matter and the `layout`
//! discriminant that selects between them.
//!
//! ## Schema Selection
//!
//! | `layout` value | Schema |
//! |----------------|--------|
//! | absent         | [`TEACHING_SCHEMA`] |
//! | `break`        | [`BREAK_SCHEMA`] |
//! | anything else  | none: one "unknown layout" violation |
//!
//! Type comparison is by semantic type ([`ValueType`]): a quoted `"10"`
//! is text and does not satisfy an integer field.

use std::path::Path;

use lesson_core::{render_value, Location, Metadata, ValueType, Violation, ViolationKind};

/// Name of the discriminant field.
pub const LAYOUT_FIELD: &str = "layout";

/// `layout` value marking a break episode.
pub const BREAK_LAYOUT: &str = "break";

/// One required field and its expected semantic type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub expected: ValueType,
}

/// A named set of required fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetadataSchema {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

/// Fields required of a teaching episode.
pub const TEACHING_SCHEMA: MetadataSchema = MetadataSchema {
    name: "teaching",
    fields: &[
        FieldSpec { name: "title", expected: ValueType::Text },
        FieldSpec { name: "teaching", expected: ValueType::Integer },
        FieldSpec { name: "exercises", expected: ValueType::Integer },
        FieldSpec { name: "questions", expected: ValueType::List },
        FieldSpec { name: "objectives", expected: ValueType::List },
        FieldSpec { name: "keypoints", expected: ValueType::List },
    ],
};

/// Fields required of a break episode.
pub const BREAK_SCHEMA: MetadataSchema = MetadataSchema {
    name: "break",
    fields: &[
        FieldSpec { name: "layout", expected: ValueType::Text },
        FieldSpec { name: "title", expected: ValueType::Text },
        FieldSpec { name: "break", expected: ValueType::Integer },
    ],
};

/// Check `metadata` against every field in `schema`.
///
/// Emits one violation per missing field and one per field whose semantic
/// type differs from the expected one. Fields are checked in schema order.
pub fn check_fields(path: &Path, metadata: &Metadata, schema: &MetadataSchema) -> Vec<Violation> {
    let mut violations = Vec::new();
    for field in schema.fields {
        match metadata.get(field.name) {
            None => violations.push(Violation::new(
                ViolationKind::MissingField,
                Some(Location::file(path)),
                format!("Missing metadata field {}", field.name),
            )),
            Some(value) => {
                let observed = ValueType::of(value);
                if observed != field.expected {
                    violations.push(Violation::new(
                        ViolationKind::WrongFieldType,
                        Some(Location::file(path)),
                        format!(
                            "\"{}\" has wrong type in metadata ({} instead of {})",
                            field.name, observed, field.expected
                        ),
                    ));
                }
            }
        }
    }
    violations
}

/// Result of looking at an episode's `layout` discriminant.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaSelection {
    /// Validate against this schema.
    Schema(&'static MetadataSchema),
    /// The layout value is not recognised; no schema applies.
    UnknownLayout(String),
}

/// Pick the episode schema for this metadata.
pub fn select_episode_schema(metadata: &Metadata) -> SchemaSelection {
    match metadata.get(LAYOUT_FIELD) {
        None => SchemaSelection::Schema(&TEACHING_SCHEMA),
        Some(layout) if layout.as_str() == Some(BREAK_LAYOUT) => {
            SchemaSelection::Schema(&BREAK_SCHEMA)
        }
        Some(layout) => SchemaSelection::UnknownLayout(render_value(layout)),
    }
}

/// Check episode front matter: select a schema by `layout`, then check its
/// fields.
pub fn check_episode_metadata(path: &Path, metadata: &Metadata) -> Vec<Violation> {
    match select_episode_schema(metadata) {
        SchemaSelection::Schema(schema) => {
            tracing::trace!(path = %path.display(), schema = schema.name, "checking episode fields");
            check_fields(path, metadata, schema)
        }
        SchemaSelection::UnknownLayout(layout) => vec![Violation::new(
            ViolationKind::UnknownLayout,
            Some(Location::file(path)),
            format!("Unknown episode layout \"{layout}\""),
        )],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_yaml::Value;

    fn path() -> &'static Path {
        Path::new("./_episodes/02-loops.md")
    }

    fn teaching() -> Metadata {
        Metadata::new()
            .with("title", "Loops")
            .with("teaching", 10)
            .with("exercises", 5)
            .with("questions", vec!["How do I repeat?"])
            .with("objectives", vec!["Write a loop."])
            .with("keypoints", vec!["Loops repeat."])
    }

    fn brk() -> Metadata {
        Metadata::new()
            .with("layout", "break")
            .with("title", "Coffee")
            .with("break", 15)
    }

    #[test]
    fn complete_teaching_episode_passes() {
        assert!(check_episode_metadata(path(), &teaching()).is_empty());
    }

    #[test]
    fn complete_break_episode_passes() {
        assert!(check_episode_metadata(path(), &brk()).is_empty());
    }

    #[test]
    fn break_without_duration_is_missing_field() {
        let mut md = brk();
        md.remove("break");
        let violations = check_episode_metadata(path(), &md);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, ViolationKind::MissingField);
        assert_eq!(violations[0].message, "Missing metadata field break");
    }

    #[test]
    fn text_teaching_time_is_wrong_type() {
        let md = teaching().with("teaching", "ten");
        let violations = check_episode_metadata(path(), &md);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, ViolationKind::WrongFieldType);
        assert_eq!(
            violations[0].message,
            "\"teaching\" has wrong type in metadata (text instead of integer)"
        );
    }

    #[test]
    fn boolean_is_not_integer() {
        let md = teaching().with("exercises", true);
        let violations = check_fields(path(), &md, &TEACHING_SCHEMA);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("boolean instead of integer"));
    }

    #[test]
    fn unknown_layout_skips_field_checks() {
        let md = Metadata::new().with("layout", "episode");
        let violations = check_episode_metadata(path(), &md);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, ViolationKind::UnknownLayout);
        assert_eq!(violations[0].message, "Unknown episode layout \"episode\"");
    }

    #[test]
    fn non_text_layout_is_unknown() {
        let md = Metadata::new().with("layout", Value::Null);
        assert_eq!(
            select_episode_schema(&md),
            SchemaSelection::UnknownLayout("null".to_string())
        );
    }

    #[test]
    fn empty_metadata_reports_every_teaching_field() {
        let violations = check_episode_metadata(path(), &Metadata::new());
        assert_eq!(violations.len(), TEACHING_SCHEMA.fields.len());
        assert!(violations.iter().all(|v| v.kind == ViolationKind::MissingField));
    }

    #[test]
    fn violations_are_located_at_file() {
        let violations = check_episode_metadata(path(), &Metadata::new());
        assert_eq!(violations[0].location, Some(Location::file(path())));
    }
}
