//! Debug trace tests
//!
//! The trace makes the sequencing visible, so these tests check the event grammar
//! produced by every source format.

use crate::common::{convert, count, options};
use markdom::FormatRegistry;

const MARKDOWN: &str = "# a\n\n* b\n* c\n\n> d\n>\n> e\n\n<!-- f -->\n";

fn traces() -> Vec<String> {
    let json = convert(MARKDOWN, "markdown", "json");
    let yaml = convert(MARKDOWN, "markdown", "yaml");
    let xml = convert(MARKDOWN, "markdown", "xml");
    vec![
        convert(MARKDOWN, "markdown", "debug"),
        convert(&json, "json", "debug"),
        convert(&yaml, "yaml", "debug"),
        convert(&xml, "xml", "debug"),
    ]
}

#[test]
fn test_every_source_emits_the_same_events() {
    let traces = traces();
    for trace in &traces[1..] {
        assert_eq!(trace, &traces[0]);
    }
}

#[test]
fn test_begin_and_end_events_balance() {
    for trace in traces() {
        for (begin, end) in [
            ("on_blocks_begin", "on_blocks_end"),
            ("on_block_begin", "on_block_end"),
            ("on_contents_begin", "on_contents_end"),
            ("on_content_begin", "on_content_end"),
            ("on_list_items_begin", "on_list_items_end"),
            ("on_list_item_begin", "on_list_item_end"),
        ] {
            assert_eq!(count(&trace, begin), count(&trace, end), "{begin}");
        }
        // document, one list item each, quote
        assert_eq!(count(&trace, "on_blocks_begin"), 4);
        assert_eq!(count(&trace, "on_next_list_item"), 1);
        // three at the top level, one between the quoted paragraphs
        assert_eq!(count(&trace, "on_next_block"), 4);
    }
}

#[test]
fn test_hidden_comments_keep_their_brackets() {
    let registry = FormatRegistry::with_defaults();
    let trace = registry
        .convert(
            "<!-- f -->",
            "markdown",
            "debug",
            &options(&[("handle_comments", "false")]),
        )
        .unwrap();
    assert_eq!(count(&trace, "on_comment_block"), 0);
    assert_eq!(count(&trace, "on_block_begin"), 1);
    assert!(trace.contains("on_block_begin: Comment"));
}
