//! Raw HTML inside Markdown source
//!
//! Embedded HTML has no Markdom counterpart, so the CommonMark dispatcher hands every
//! HTML block and inline HTML fragment to an [`HtmlProcessor`]. The processor answers
//! with model nodes which the dispatcher replays at the current position.

use crate::model::{Block, Content};
use once_cell::sync::Lazy;
use regex::Regex;

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

/// Strategy for HTML found in CommonMark source. Comment blocks never reach it.
pub trait HtmlProcessor: Send + Sync {
    /// Blocks replacing an HTML block. `html` is the raw block, line breaks included.
    fn process_block(&self, html: &str) -> Vec<Block>;

    /// Contents replacing an inline HTML fragment such as `<span>`.
    fn process_inline(&self, html: &str) -> Vec<Content>;
}

/// Strips tags from HTML blocks and keeps what is left as one paragraph of text.
/// Inline HTML is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlTextProcessor;

impl HtmlProcessor for HtmlTextProcessor {
    fn process_block(&self, html: &str) -> Vec<Block> {
        // Whitespace around the stripped text, trailing newline included, is kept as is.
        vec![Block::paragraph(TAG.replace_all(html, ""))]
    }

    fn process_inline(&self, _html: &str) -> Vec<Content> {
        Vec::new()
    }
}
