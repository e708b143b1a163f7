//! Export tests for Markdown format (Markdom → Markdown)

use crate::common::{convert, options};
use markdom::format::Format;
use markdom::formats::MarkdownFormat;
use markdom::{Block, Content, Document};
use pretty_assertions::assert_eq;

const SAMPLE: &str = "# Title

Some *light* and **strong** text with `code` and a [link](http://x \"T\").

* one
* two

para

3. three

> quoted

```rust
fn main() {}
```

---

<!-- note -->
";

#[test]
fn test_single_paragraph() {
    assert_eq!(convert("Hi", "markdown", "markdown"), "Hi\n");
    assert_eq!(convert("Hi", "markdown", "html"), "<p>Hi</p>");
}

#[test]
fn test_reparse_is_a_fixed_point() {
    let first = MarkdownFormat.parse(SAMPLE).unwrap();
    let markdown = MarkdownFormat.serialize(&first).unwrap();
    let second = MarkdownFormat.parse(&markdown).unwrap();
    assert_eq!(first, second);
    assert_eq!(MarkdownFormat.serialize(&second).unwrap(), markdown);
}

#[test]
fn test_text_that_looks_like_markup_stays_text() {
    let doc = Document::new(vec![
        Block::paragraph("# not a heading"),
        Block::paragraph("*not emphasis*"),
        Block::paragraph("1. not a list"),
    ]);
    let markdown = MarkdownFormat.serialize(&doc).unwrap();
    let blocks = MarkdownFormat.parse(&markdown).unwrap().blocks;
    assert_eq!(blocks.len(), 3);
    assert!(blocks
        .iter()
        .all(|block| matches!(block, Block::Paragraph { .. })));
}

#[test]
fn test_comments_can_be_skipped() {
    let doc = Document::new(vec![
        Block::Comment {
            comment: "hidden".into(),
        },
        Block::Paragraph {
            contents: vec![Content::text("shown")],
        },
    ]);
    let out = MarkdownFormat
        .serialize_with_options(&doc, &options(&[("handle_comments", "false")]))
        .unwrap();
    assert!(!out.contains("hidden"));
    assert!(out.contains("shown"));
}
