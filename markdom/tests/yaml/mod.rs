//! YAML format tests

use crate::common::{convert, options};
use markdom::format::Format;
use markdom::formats::{JsonFormat, YamlFormat};
use markdom::FormatRegistry;
use pretty_assertions::assert_eq;

const MARKDOWN: &str = "# Title\n\n1. first item with a rather long sentence that will need folding\n\n```\ncode\n```\n";

#[test]
fn test_yaml_and_json_agree() {
    let yaml = convert(MARKDOWN, "markdown", "yaml");
    let json = convert(MARKDOWN, "markdown", "json");
    assert_eq!(
        YamlFormat.parse(&yaml).unwrap(),
        JsonFormat.parse(&json).unwrap()
    );
}

#[test]
fn test_yaml_to_json() {
    let yaml = convert(MARKDOWN, "markdown", "yaml");
    assert_eq!(
        convert(&yaml, "yaml", "json"),
        convert(MARKDOWN, "markdown", "json")
    );
}

#[test]
fn test_options_round_trip() {
    let registry = FormatRegistry::with_defaults();
    let expected = JsonFormat.parse(&convert(MARKDOWN, "markdown", "json")).unwrap();
    for (pretty, wrap) in [("false", "false"), ("true", "false"), ("false", "true"), ("true", "true")] {
        let yaml = registry
            .convert(
                MARKDOWN,
                "markdown",
                "yaml",
                &options(&[("pretty_print", pretty), ("word_wrap", wrap)]),
            )
            .unwrap();
        assert_eq!(YamlFormat.parse(&yaml).unwrap(), expected, "{yaml}");
    }
}

#[test]
fn test_invalid_yaml() {
    assert!(YamlFormat.parse("blocks: [").is_err());
    let err = YamlFormat.parse("version:\n  major: 2\n  minor: 0\nblocks: []\n").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Markdom invalid: version mismatch Expected version 1.0."
    );
}
