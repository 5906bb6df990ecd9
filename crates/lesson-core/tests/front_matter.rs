//! Front matter decoded from YAML text, as a loader sees it.

use lesson_core::{Document, Metadata, MetadataError, Node, ValueType};

fn decode(yaml: &str) -> Result<Option<Metadata>, MetadataError> {
    let value: serde_yaml::Value = serde_yaml::from_str(yaml).unwrap();
    Metadata::from_value(value)
}

#[test]
fn episode_header_types() {
    let metadata = decode(
        "title: Loops\nteaching: 10\nexercises: 5.5\nquestions:\n- Why?\nbreak: false\nnotes: ~\n",
    )
    .unwrap()
    .unwrap();

    let types: Vec<(&str, ValueType)> = metadata
        .iter()
        .map(|(key, value)| (key, ValueType::of(value)))
        .collect();
    assert_eq!(
        types,
        vec![
            ("break", ValueType::Boolean),
            ("exercises", ValueType::Float),
            ("notes", ValueType::Null),
            ("questions", ValueType::List),
            ("teaching", ValueType::Integer),
            ("title", ValueType::Text),
        ]
    );
}

#[test]
fn null_header_is_absent_metadata() {
    assert_eq!(decode("~").unwrap(), None);
}

#[test]
fn empty_mapping_is_present_metadata() {
    let metadata = decode("{}").unwrap().unwrap();
    assert!(metadata.is_empty());
}

#[test]
fn list_header_is_rejected() {
    let err = decode("- layout\n- page\n").unwrap_err();
    assert_eq!(err, MetadataError::NotAMapping { found: ValueType::List });
}

#[test]
fn numeric_keys_become_text() {
    let metadata = decode("2024: year\n").unwrap().unwrap();
    assert_eq!(metadata.text("2024"), Some("year"));
}

#[test]
fn decoded_document_locates_nodes() {
    let metadata = decode("layout: page\ntitle: Setup\n").unwrap().unwrap();
    let doc = Document::new("setup.md").with_metadata(metadata, 3);
    let node = Node::new("blockquote").with_class("callout").at(2);
    assert_eq!(doc.line_of(&node), Some(5));
    assert_eq!(doc.line_of(&Node::new("p")), None);
}
