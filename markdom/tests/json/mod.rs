//! JSON format tests

use crate::common::{arb_document, convert, options};
use markdom::format::Format;
use markdom::formats::{JsonFormat, MarkdownFormat};
use markdom::{DispatchError, FormatError};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_round_trip(doc in arb_document(), pretty in any::<bool>(), escape in any::<bool>()) {
        let options = options(&[
            ("pretty_print", if pretty { "true" } else { "false" }),
            ("escape_unicode", if escape { "true" } else { "false" }),
        ]);
        let json = JsonFormat.serialize_with_options(&doc, &options).unwrap();
        prop_assert_eq!(JsonFormat.parse(&json).unwrap(), doc);
    }
}

#[test]
fn test_markdown_to_json() {
    let json = convert("# Hi", "markdown", "json");
    assert_eq!(
        json,
        r#"{"version":{"major":1,"minor":0},"blocks":[{"type":"Heading","level":1,"contents":[{"type":"Text","text":"Hi"}]}]}"#
    );
}

#[test]
fn test_json_to_markdown_matches_markdown_model() {
    let markdown = "* a\n\n> b\n";
    let json = convert(markdown, "markdown", "json");
    let back = convert(&json, "json", "markdown");
    assert_eq!(
        MarkdownFormat.parse(&back).unwrap(),
        MarkdownFormat.parse(markdown).unwrap()
    );
}

#[test]
fn test_structure_errors() {
    let err = JsonFormat.parse("[]").unwrap_err();
    assert_eq!(err.to_string(), "Markdom invalid: root node is no object.");
    let err = JsonFormat
        .parse(r#"{"version":{"major":1,"minor":0},"blocks":[{"type":"Table"}]}"#)
        .unwrap_err();
    assert_eq!(err.to_string(), "Markdom invalid: block node type Table is invalid.");
    assert!(matches!(
        JsonFormat.parse("{"),
        Err(FormatError::Dispatch(DispatchError::Parse(_)))
    ));
}
