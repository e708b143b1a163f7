//! Markdown parsing (CommonMark → Markdom events)
//!
//! Pipeline: Markdown string → Comrak AST → enter/exit walk → Sequencer → handler.
//!
//! Every comrak node is first read into a [`MarkdownNode`], which keeps the walk below
//! independent of comrak's node payloads. The walk then maps each start and end edge
//! to the matching Markdom event. Image subtrees are suppressed: the image itself
//! becomes a single image event whose alt text is the plain text of the subtree, and
//! nothing inside it reaches the handler.

use super::html_processor::{HtmlProcessor, HtmlTextProcessor};
use super::plaintext::plain_text;
use crate::dispatcher::Dispatcher;
use crate::error::{DispatchError, NodeKind};
use crate::handler::Handler;
use crate::model;
use crate::sequencer::Sequencer;
use crate::types::{EmphasisLevel, MAX_HEADING_LEVEL};
use comrak::arena_tree::NodeEdge;
use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{parse_document, Arena, Options};

/// comrak's `block_type` for `<!-- ... -->` HTML blocks.
const HTML_BLOCK_COMMENT: u8 = 2;

/// Markdown source read through comrak with plain CommonMark options.
pub struct CommonmarkDispatcher {
    source: String,
    options: Options<'static>,
    html_processor: Box<dyn HtmlProcessor>,
}

impl CommonmarkDispatcher {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            options: Options::default(),
            html_processor: Box::new(HtmlTextProcessor),
        }
    }

    pub fn with_html_processor(mut self, processor: impl HtmlProcessor + 'static) -> Self {
        self.html_processor = Box::new(processor);
        self
    }

    /// Replace the comrak options. Extensions producing nodes without a Markdom
    /// counterpart (tables, footnotes, ...) make dispatching fail.
    pub fn with_options(mut self, options: Options<'static>) -> Self {
        self.options = options;
        self
    }
}

impl Dispatcher for CommonmarkDispatcher {
    fn dispatch_to<H: Handler>(&self, handler: H) -> Result<H::Output, DispatchError> {
        let arena = Arena::new();
        let root = parse_document(&arena, &self.source, &self.options);
        tracing::debug!(bytes = self.source.len(), "dispatching commonmark");

        let mut walk = Walk {
            sequencer: Sequencer::new(handler),
            html_processor: self.html_processor.as_ref(),
            image_depth: 0,
        };
        walk.sequencer.document_begin();
        for edge in root.traverse() {
            match edge {
                NodeEdge::Start(node) => walk.start(node)?,
                NodeEdge::End(node) => walk.end(node)?,
            }
        }
        walk.sequencer.document_end();
        Ok(walk.sequencer.into_inner().result())
    }
}

/// The comrak node taxonomy as the walk sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
enum MarkdownNode {
    Document,
    BlockQuote,
    Heading { level: u8 },
    CodeBlock { literal: String, info: Option<String> },
    HtmlComment(String),
    HtmlBlock(String),
    List { start: Option<u64> },
    Item,
    Paragraph,
    ThematicBreak,
    Emph,
    Strong,
    Link { url: String, title: Option<String> },
    Image { url: String, title: Option<String> },
    Code(String),
    HtmlInline(String),
    SoftBreak,
    LineBreak,
    Text(String),
    Unsupported { kind: NodeKind, name: String },
}

impl MarkdownNode {
    fn read<'a>(node: &'a AstNode<'a>) -> Self {
        match &node.data.borrow().value {
            NodeValue::Document => Self::Document,
            NodeValue::BlockQuote => Self::BlockQuote,
            NodeValue::Heading(heading) => Self::Heading {
                level: heading.level.clamp(1, MAX_HEADING_LEVEL),
            },
            NodeValue::CodeBlock(code) => Self::CodeBlock {
                literal: code.literal.trim_matches(['\r', '\n']).to_string(),
                info: non_empty(&code.info),
            },
            NodeValue::HtmlBlock(html) if html.block_type == HTML_BLOCK_COMMENT => {
                Self::HtmlComment(comment_text(&html.literal))
            }
            NodeValue::HtmlBlock(html) => Self::HtmlBlock(html.literal.clone()),
            NodeValue::List(list) => Self::List {
                start: match list.list_type {
                    ListType::Ordered => Some(list.start as u64),
                    ListType::Bullet => None,
                },
            },
            NodeValue::Item(_) => Self::Item,
            NodeValue::Paragraph => Self::Paragraph,
            NodeValue::ThematicBreak => Self::ThematicBreak,
            NodeValue::Emph => Self::Emph,
            NodeValue::Strong => Self::Strong,
            NodeValue::Link(link) => Self::Link {
                url: link.url.clone(),
                title: non_empty(&link.title),
            },
            NodeValue::Image(link) => Self::Image {
                url: link.url.clone(),
                title: non_empty(&link.title),
            },
            NodeValue::Code(code) => Self::Code(code.literal.clone()),
            NodeValue::HtmlInline(html) => Self::HtmlInline(html.clone()),
            NodeValue::SoftBreak => Self::SoftBreak,
            NodeValue::LineBreak => Self::LineBreak,
            NodeValue::Text(text) => Self::Text(text.clone()),
            other => Self::Unsupported {
                kind: if other.block() {
                    NodeKind::Block
                } else {
                    NodeKind::Inline
                },
                name: variant_name(other),
            },
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// `<!-- text -->` → `text`
fn comment_text(literal: &str) -> String {
    let literal = literal.trim_end();
    let literal = literal.strip_prefix("<!--").unwrap_or(literal);
    let literal = literal.strip_suffix("-->").unwrap_or(literal);
    literal.trim().to_string()
}

/// `Table(NodeTable { .. })` → `Table`
fn variant_name(value: &NodeValue) -> String {
    let debug = format!("{value:?}");
    debug
        .split(|c: char| !c.is_alphanumeric())
        .next()
        .unwrap_or_default()
        .to_string()
}

struct Walk<'p, H: Handler> {
    sequencer: Sequencer<H>,
    html_processor: &'p dyn HtmlProcessor,
    image_depth: usize,
}

impl<H: Handler> Walk<'_, H> {
    fn start<'a>(&mut self, node: &'a AstNode<'a>) -> Result<(), DispatchError> {
        let value = MarkdownNode::read(node);
        let is_image = matches!(value, MarkdownNode::Image { .. });
        if self.image_depth == 0 {
            self.enter(node, value)?;
        }
        if is_image {
            self.image_depth += 1;
        }
        Ok(())
    }

    fn end<'a>(&mut self, node: &'a AstNode<'a>) -> Result<(), DispatchError> {
        let value = MarkdownNode::read(node);
        if matches!(value, MarkdownNode::Image { .. }) {
            self.image_depth = self.image_depth.saturating_sub(1);
        }
        if self.image_depth == 0 {
            self.leave(value)?;
        }
        Ok(())
    }

    fn enter<'a>(&mut self, node: &'a AstNode<'a>, value: MarkdownNode) -> Result<(), DispatchError> {
        let sequencer = &mut self.sequencer;
        match value {
            MarkdownNode::Document => {}
            MarkdownNode::BlockQuote => sequencer.quote_block_begin(),
            MarkdownNode::Heading { level } => sequencer.heading_block_begin(level),
            MarkdownNode::CodeBlock { literal, info } => {
                sequencer.code_block(&literal, info.as_deref())
            }
            MarkdownNode::HtmlComment(comment) => sequencer.comment_block(&comment),
            MarkdownNode::HtmlBlock(html) => {
                let blocks = self.html_processor.process_block(&html);
                model::walk_blocks(&blocks, sequencer);
            }
            MarkdownNode::List { start: Some(start) } => sequencer.ordered_list_block_begin(start),
            MarkdownNode::List { start: None } => sequencer.unordered_list_block_begin(),
            MarkdownNode::Item => sequencer.list_item_begin(),
            MarkdownNode::Paragraph => sequencer.paragraph_block_begin(),
            MarkdownNode::ThematicBreak => sequencer.division_block(),
            MarkdownNode::Emph => sequencer.emphasis_content_begin(EmphasisLevel::Light),
            MarkdownNode::Strong => sequencer.emphasis_content_begin(EmphasisLevel::Strong),
            MarkdownNode::Link { url, title } => sequencer.link_content_begin(&url, title.as_deref()),
            MarkdownNode::Image { url, title } => {
                let alternative = plain_text(node);
                sequencer.image_content(&url, title.as_deref(), Some(&alternative));
            }
            MarkdownNode::Code(code) => sequencer.code_content(&code),
            MarkdownNode::HtmlInline(html) => {
                let contents = self.html_processor.process_inline(&html);
                model::walk_contents(&contents, sequencer);
            }
            MarkdownNode::SoftBreak => sequencer.line_break_content(false),
            MarkdownNode::LineBreak => sequencer.line_break_content(true),
            MarkdownNode::Text(text) => sequencer.text_content(&text),
            MarkdownNode::Unsupported { kind, name } => {
                tracing::warn!(%kind, %name, "unsupported commonmark node");
                return Err(DispatchError::UnknownNode { kind, name });
            }
        }
        Ok(())
    }

    fn leave(&mut self, value: MarkdownNode) -> Result<(), DispatchError> {
        let sequencer = &mut self.sequencer;
        match value {
            MarkdownNode::BlockQuote => sequencer.quote_block_end(),
            MarkdownNode::Heading { .. } => sequencer.heading_block_end(),
            MarkdownNode::List { start: Some(_) } => sequencer.ordered_list_block_end(),
            MarkdownNode::List { start: None } => sequencer.unordered_list_block_end(),
            MarkdownNode::Item => sequencer.list_item_end(),
            MarkdownNode::Paragraph => sequencer.paragraph_block_end(),
            MarkdownNode::Emph | MarkdownNode::Strong => sequencer.emphasis_content_end(),
            MarkdownNode::Link { .. } => sequencer.link_content_end(),
            MarkdownNode::Unsupported { kind, name } => {
                return Err(DispatchError::UnknownNode { kind, name })
            }
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::debug::DebugHandler;
    use crate::model::{Block, Content, Document, ListItem, ModelBuilder};
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> Document {
        CommonmarkDispatcher::new(source)
            .dispatch_to(ModelBuilder::new())
            .unwrap()
    }

    #[test]
    fn paragraph_with_inlines() {
        let doc = parse("Hello *big* **world** `x`\\\nnext");
        assert_eq!(
            doc.blocks,
            vec![Block::Paragraph {
                contents: vec![
                    Content::text("Hello "),
                    Content::Emphasis {
                        level: EmphasisLevel::Light,
                        contents: vec![Content::text("big")],
                    },
                    Content::text(" "),
                    Content::Emphasis {
                        level: EmphasisLevel::Strong,
                        contents: vec![Content::text("world")],
                    },
                    Content::text(" "),
                    Content::Code { code: "x".into() },
                    Content::LineBreak { hard: true },
                    Content::text("next"),
                ],
            }]
        );
    }

    #[test]
    fn blocks() {
        let doc = parse("# Title\n\n> quoted\n\n---\n\n```rust\nfn main() {}\n```\n\n3. a\n4. b\n");
        assert_eq!(
            doc.blocks,
            vec![
                Block::Heading {
                    level: 1,
                    contents: vec![Content::text("Title")],
                },
                Block::Quote {
                    blocks: vec![Block::paragraph("quoted")],
                },
                Block::Division,
                Block::Code {
                    code: "fn main() {}".into(),
                    hint: Some("rust".into()),
                },
                Block::OrderedList {
                    start_index: 3,
                    items: vec![
                        ListItem {
                            blocks: vec![Block::paragraph("a")],
                        },
                        ListItem {
                            blocks: vec![Block::paragraph("b")],
                        },
                    ],
                },
            ]
        );
    }

    #[test]
    fn code_keeps_inner_whitespace() {
        let doc = parse("```\n  indented\n\n```\n");
        assert_eq!(
            doc.blocks,
            vec![Block::Code {
                code: "  indented".into(),
                hint: None,
            }]
        );
    }

    #[test]
    fn links_and_images() {
        let doc = parse("[a](http://x \"T\") ![alt *text*](i.png)");
        assert_eq!(
            doc.blocks,
            vec![Block::Paragraph {
                contents: vec![
                    Content::Link {
                        uri: "http://x".into(),
                        title: Some("T".into()),
                        contents: vec![Content::text("a")],
                    },
                    Content::text(" "),
                    Content::Image {
                        uri: "i.png".into(),
                        title: None,
                        alternative: Some("alt text".into()),
                    },
                ],
            }]
        );
    }

    #[test]
    fn image_subtree_is_suppressed() {
        let trace = CommonmarkDispatcher::new("![see [here](http://a)](x.png)")
            .dispatch_to(DebugHandler::new())
            .unwrap();
        assert_eq!(trace.matches("on_image_content").count(), 1);
        assert!(trace.contains("on_image_content: x.png ~  ~ see here"));
        assert!(!trace.contains("on_link_content_begin"));
        assert!(!trace.contains("on_link_content_end"));
        assert!(!trace.contains("on_text_content"));
    }

    #[test]
    fn html_comments_become_comment_blocks() {
        let doc = parse("<!--  note  -->\n");
        assert_eq!(
            doc.blocks,
            vec![Block::Comment {
                comment: "note".into(),
            }]
        );
    }

    #[test]
    fn html_blocks_go_through_the_processor() {
        let doc = parse("<div>\n<b>Hi</b>\n</div>\n\nafter\n");
        assert_eq!(
            doc.blocks,
            vec![Block::paragraph("\nHi\n\n"), Block::paragraph("after")]
        );
    }

    #[test]
    fn unknown_nodes_abort() {
        let mut options = Options::default();
        options.extension.table = true;
        let err = CommonmarkDispatcher::new("| a |\n|---|\n| b |\n")
            .with_options(options)
            .dispatch_to(ModelBuilder::new())
            .unwrap_err();
        assert_eq!(
            err,
            DispatchError::UnknownNode {
                kind: NodeKind::Block,
                name: "Table".into(),
            }
        );
        assert_eq!(err.to_string(), "Block node Table is unknown");
    }

    #[test]
    fn comment_text_strips_delimiters() {
        assert_eq!(comment_text("<!-- a\nb -->\n"), "a\nb");
        assert_eq!(comment_text("<!-- open"), "open");
    }
}
