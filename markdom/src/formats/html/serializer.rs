//! HTML serialization (Markdom events → HTML fragment)
//!
//! Writes a body fragment, no document shell. Blocks are separated by newlines and
//! every list item or nested block sequence starts on its own line; the number of open
//! blocks decides whether a sequence end needs a closing newline.

use super::tags::{HtmlTagBuilder, Tag, TagBuilder, XhtmlTagBuilder};
use crate::handler::Handler;
use crate::types::{BlockType, EmphasisLevel};
use std::borrow::Cow;

const LINE_BREAK: &str = "\n";

#[derive(Debug, Clone)]
pub struct HtmlHandler<T: TagBuilder = HtmlTagBuilder> {
    tags: T,
    handle_comments: bool,
    escape_html: bool,
    break_soft_breaks: bool,
    output: String,
    /// Open blocks and list items.
    depth: usize,
}

/// HTML handler writing XHTML void elements.
pub type XhtmlHandler = HtmlHandler<XhtmlTagBuilder>;

impl HtmlHandler {
    pub fn new() -> Self {
        Self::with_tag_builder(HtmlTagBuilder)
    }
}

impl XhtmlHandler {
    pub fn xhtml() -> Self {
        Self::with_tag_builder(XhtmlTagBuilder)
    }
}

impl Default for HtmlHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TagBuilder> HtmlHandler<T> {
    pub fn with_tag_builder(tags: T) -> Self {
        Self {
            tags,
            handle_comments: true,
            escape_html: true,
            break_soft_breaks: false,
            output: String::new(),
            depth: 0,
        }
    }

    pub fn with_handle_comments(mut self, handle_comments: bool) -> Self {
        self.handle_comments = handle_comments;
        self
    }

    /// Escape text, code and attribute values (on by default).
    pub fn with_escape_html(mut self, escape_html: bool) -> Self {
        self.escape_html = escape_html;
        self
    }

    /// Write soft line breaks as `<br>` instead of a newline.
    pub fn with_break_soft_breaks(mut self, break_soft_breaks: bool) -> Self {
        self.break_soft_breaks = break_soft_breaks;
        self
    }

    fn text<'s>(&self, text: &'s str) -> Cow<'s, str> {
        if self.escape_html {
            html_escape::encode_text(text)
        } else {
            Cow::Borrowed(text)
        }
    }

    fn attribute<'s>(&self, value: Option<&'s str>) -> Option<Cow<'s, str>> {
        value.map(|value| {
            if self.escape_html {
                html_escape::encode_double_quoted_attribute(value)
            } else {
                Cow::Borrowed(value)
            }
        })
    }

    fn tag(&mut self, tag: Tag) {
        let markup = self.tags.build_tag(tag, "", &[]);
        self.output.push_str(&markup);
    }

    fn tag_with(&mut self, tag: Tag, value: &str, attributes: &[(&str, Option<&str>)]) {
        let markup = self.tags.build_tag(tag, value, attributes);
        self.output.push_str(&markup);
    }

    fn line_break_if_nested(&mut self) {
        if self.depth > 0 {
            self.output.push_str(LINE_BREAK);
        }
    }
}

impl<T: TagBuilder> Handler for HtmlHandler<T> {
    type Output = String;

    fn on_document_begin(&mut self) {
        self.output.clear();
        self.depth = 0;
    }

    fn on_block_begin(&mut self, _block_type: BlockType) {
        if !self.output.is_empty() {
            self.output.push_str(LINE_BREAK);
        }
        self.depth += 1;
    }

    fn on_code_block(&mut self, code: &str, hint: Option<&str>) {
        let code = self.text(code).into_owned();
        let hint = self.attribute(hint);
        self.tag_with(Tag::CodeBlock, &code, &[("class", hint.as_deref())]);
    }

    fn on_comment_block(&mut self, comment: &str) {
        if self.handle_comments {
            self.tag_with(Tag::Comment, comment, &[]);
        }
    }

    fn on_division_block(&mut self) {
        self.tag(Tag::Division);
    }

    fn on_heading_block_begin(&mut self, level: u8) {
        self.tag(Tag::HeadingBegin(level));
    }

    fn on_heading_block_end(&mut self, level: u8) {
        self.tag(Tag::HeadingEnd(level));
    }

    fn on_unordered_list_block_begin(&mut self) {
        self.tag(Tag::UnorderedListBegin);
    }

    fn on_ordered_list_block_begin(&mut self, start_index: u64) {
        let start = start_index.to_string();
        self.tag_with(Tag::OrderedListBegin, "", &[("start", Some(&start))]);
    }

    fn on_list_item_begin(&mut self) {
        self.output.push_str(LINE_BREAK);
        self.tag(Tag::ListItemBegin);
        self.depth += 1;
    }

    fn on_list_item_end(&mut self) {
        self.tag(Tag::ListItemEnd);
        self.depth = self.depth.saturating_sub(1);
    }

    fn on_list_items_end(&mut self) {
        self.line_break_if_nested();
    }

    fn on_unordered_list_block_end(&mut self) {
        self.tag(Tag::UnorderedListEnd);
    }

    fn on_ordered_list_block_end(&mut self, _start_index: u64) {
        self.tag(Tag::OrderedListEnd);
    }

    fn on_paragraph_block_begin(&mut self) {
        self.tag(Tag::ParagraphBegin);
    }

    fn on_paragraph_block_end(&mut self) {
        self.tag(Tag::ParagraphEnd);
    }

    fn on_quote_block_begin(&mut self) {
        self.tag(Tag::QuoteBegin);
    }

    fn on_quote_block_end(&mut self) {
        self.tag(Tag::QuoteEnd);
    }

    fn on_block_end(&mut self, _block_type: BlockType) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn on_blocks_end(&mut self) {
        self.line_break_if_nested();
    }

    fn on_code_content(&mut self, code: &str) {
        let code = self.text(code).into_owned();
        self.tag_with(Tag::CodeInline, &code, &[]);
    }

    fn on_emphasis_content_begin(&mut self, level: EmphasisLevel) {
        self.tag(match level {
            EmphasisLevel::Light => Tag::EmphasisLightBegin,
            EmphasisLevel::Strong => Tag::EmphasisStrongBegin,
        });
    }

    fn on_emphasis_content_end(&mut self, level: EmphasisLevel) {
        self.tag(match level {
            EmphasisLevel::Light => Tag::EmphasisLightEnd,
            EmphasisLevel::Strong => Tag::EmphasisStrongEnd,
        });
    }

    fn on_image_content(&mut self, uri: &str, title: Option<&str>, alternative: Option<&str>) {
        let src = self.attribute(Some(uri));
        let title = self.attribute(title);
        let alt = self.attribute(alternative);
        self.tag_with(
            Tag::Image,
            "",
            &[
                ("src", src.as_deref()),
                ("title", title.as_deref()),
                ("alt", alt.as_deref()),
            ],
        );
    }

    fn on_line_break_content(&mut self, hard: bool) {
        if hard || self.break_soft_breaks {
            self.tag(Tag::LineBreak);
        } else {
            self.output.push_str(LINE_BREAK);
        }
    }

    fn on_link_content_begin(&mut self, uri: &str, title: Option<&str>) {
        let href = self.attribute(Some(uri));
        let title = self.attribute(title);
        self.tag_with(
            Tag::LinkBegin,
            "",
            &[("href", href.as_deref()), ("title", title.as_deref())],
        );
    }

    fn on_link_content_end(&mut self, _uri: &str, _title: Option<&str>) {
        self.tag(Tag::LinkEnd);
    }

    fn on_text_content(&mut self, text: &str) {
        let text = self.text(text).into_owned();
        self.output.push_str(&text);
    }

    fn result(&self) -> String {
        self.output.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, Content, Document, ListItem};
    use pretty_assertions::assert_eq;

    fn render(blocks: Vec<Block>) -> String {
        Document::new(blocks).render(HtmlHandler::new())
    }

    #[test]
    fn single_paragraph_has_no_trailing_newline() {
        assert_eq!(render(vec![Block::paragraph("Hi")]), "<p>Hi</p>");
    }

    #[test]
    fn empty_document() {
        assert_eq!(render(vec![]), "");
    }

    #[test]
    fn blocks_are_separated_by_newlines() {
        let out = render(vec![
            Block::Heading {
                level: 2,
                contents: vec![Content::text("T")],
            },
            Block::Division,
            Block::Code {
                code: "a < b".into(),
                hint: Some("rust".into()),
            },
        ]);
        assert_eq!(
            out,
            "<h2>T</h2>\n<hr>\n<pre><code class=\"rust\">a &lt; b</code></pre>"
        );
    }

    #[test]
    fn lists_put_items_on_their_own_lines() {
        let out = render(vec![Block::OrderedList {
            start_index: 1,
            items: vec![
                ListItem {
                    blocks: vec![Block::paragraph("a")],
                },
                ListItem { blocks: vec![] },
            ],
        }]);
        assert_eq!(
            out,
            "<ol start=\"1\">\n<li>\n<p>a</p>\n</li>\n<li>\n</li>\n</ol>"
        );
    }

    #[test]
    fn quotes_nest_blocks() {
        let out = render(vec![Block::Quote {
            blocks: vec![Block::paragraph("a"), Block::paragraph("b")],
        }]);
        assert_eq!(out, "<blockquote>\n<p>a</p>\n<p>b</p>\n</blockquote>");
    }

    #[test]
    fn inline_content() {
        let out = render(vec![Block::Paragraph {
            contents: vec![
                Content::Emphasis {
                    level: EmphasisLevel::Strong,
                    contents: vec![Content::text("b")],
                },
                Content::LineBreak { hard: false },
                Content::Link {
                    uri: "http://x?a=1&b=2".into(),
                    title: Some(" ".into()),
                    contents: vec![Content::text("x & y")],
                },
                Content::LineBreak { hard: true },
                Content::Image {
                    uri: "i.png".into(),
                    title: None,
                    alternative: Some("\"alt\"".into()),
                },
                Content::Code { code: "<tag>".into() },
            ],
        }]);
        assert_eq!(
            out,
            "<p><strong>b</strong>\n<a href=\"http://x?a=1&amp;b=2\">x &amp; y</a><br>\
             <img src=\"i.png\" alt=\"&quot;alt&quot;\"><code>&lt;tag&gt;</code></p>"
        );
    }

    #[test]
    fn options() {
        let doc = Document::new(vec![
            Block::Comment {
                comment: "c".into(),
            },
            Block::Paragraph {
                contents: vec![
                    Content::text("<b>"),
                    Content::LineBreak { hard: false },
                    Content::text("x"),
                ],
            },
        ]);
        assert_eq!(
            doc.render(HtmlHandler::new()),
            "<!-- c -->\n<p>&lt;b&gt;\nx</p>"
        );
        let out = doc.render(
            HtmlHandler::new()
                .with_handle_comments(false)
                .with_escape_html(false)
                .with_break_soft_breaks(true),
        );
        assert_eq!(out, "<p><b><br>x</p>");
    }

    #[test]
    fn xhtml_self_closes() {
        let doc = Document::new(vec![
            Block::Division,
            Block::Paragraph {
                contents: vec![Content::LineBreak { hard: true }],
            },
        ]);
        assert_eq!(doc.render(XhtmlHandler::xhtml()), "<hr />\n<p><br /></p>");
    }
}
