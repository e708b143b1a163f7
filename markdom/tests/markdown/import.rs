//! Import tests for Markdown format (CommonMark → Markdom)

use crate::common::trace;
use insta::assert_snapshot;
use markdom::format::Format;
use markdom::formats::MarkdownFormat;
use markdom::types::EmphasisLevel;
use markdom::{Block, Content, ListItem};
use pretty_assertions::assert_eq;

fn blocks(markdown: &str) -> Vec<Block> {
    MarkdownFormat.parse(markdown).unwrap().blocks
}

#[test]
fn test_event_trace() {
    let doc = MarkdownFormat.parse("# Title\n\n*Some* text.").unwrap();
    assert_snapshot!(trace(&doc), @r"
on_document_begin
    on_blocks_begin
        on_block_begin: Heading
            on_heading_block_begin: 1
            on_contents_begin
                on_content_begin: Text
                    on_text_content: Title
                on_content_end: Text
            on_contents_end
            on_heading_block_end: 1
        on_block_end: Heading
        on_next_block
        on_block_begin: Paragraph
            on_paragraph_block_begin
            on_contents_begin
                on_content_begin: Emphasis
                    on_emphasis_content_begin: 1
                    on_contents_begin
                        on_content_begin: Text
                            on_text_content: Some
                        on_content_end: Text
                    on_contents_end
                    on_emphasis_content_end: 1
                on_content_end: Emphasis
                on_next_content
                on_content_begin: Text
                    on_text_content:  text.
                on_content_end: Text
            on_contents_end
            on_paragraph_block_end
        on_block_end: Paragraph
    on_blocks_end
on_document_end
");
}

#[test]
fn test_setext_heading_and_indented_code() {
    assert_eq!(
        blocks("Title\n=====\n\n    let x;\n"),
        vec![
            Block::Heading {
                level: 1,
                contents: vec![Content::text("Title")],
            },
            Block::Code {
                code: "let x;".into(),
                hint: None,
            },
        ]
    );
}

#[test]
fn test_ordered_list_keeps_start_index() {
    assert_eq!(
        blocks("3. a\n4. b\n"),
        vec![Block::OrderedList {
            start_index: 3,
            items: vec![
                ListItem {
                    blocks: vec![Block::paragraph("a")],
                },
                ListItem {
                    blocks: vec![Block::paragraph("b")],
                },
            ],
        }]
    );
}

#[test]
fn test_quote_with_nested_list() {
    assert_eq!(
        blocks("> * a\n"),
        vec![Block::Quote {
            blocks: vec![Block::UnorderedList {
                items: vec![ListItem {
                    blocks: vec![Block::paragraph("a")],
                }],
            }],
        }]
    );
}

#[test]
fn test_comment_block() {
    assert_eq!(
        blocks("<!-- note -->\n"),
        vec![Block::Comment {
            comment: "note".into()
        }]
    );
}

#[test]
fn test_line_breaks() {
    assert_eq!(
        blocks("a\nb  \nc"),
        vec![Block::Paragraph {
            contents: vec![
                Content::text("a"),
                Content::LineBreak { hard: false },
                Content::text("b"),
                Content::LineBreak { hard: true },
                Content::text("c"),
            ],
        }]
    );
}

#[test]
fn test_strong_inside_link() {
    assert_eq!(
        blocks("[**x**](http://a)"),
        vec![Block::Paragraph {
            contents: vec![Content::Link {
                uri: "http://a".into(),
                title: None,
                contents: vec![Content::Emphasis {
                    level: EmphasisLevel::Strong,
                    contents: vec![Content::text("x")],
                }],
            }],
        }]
    );
}
