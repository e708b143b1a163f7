//! Normalizing event sequencer
//!
//!     Producers (the dispatchers) only know the semantic shape of what they walk: "a
//!     heading starts", "some text", "the heading ends". The [`Handler`] grammar is more
//!     verbose: every block sequence is wrapped in `blocks` events, every content sequence
//!     in `contents` events, and siblings are separated by `next` markers. The sequencer
//!     sits between the two and expands each semantic call into the full grammar.
//!
//! The Algorithm
//!
//!     1. Entering a block, list or content container pushes `false` on the matching
//!        has-child stack and emits the container's begin event.
//!     2. Each sibling begin looks at the top of the stack. When it is already `true` the
//!        matching `next` event is emitted first. The top is then set to `true`.
//!     3. Leaving a container pops the flag and emits the container's end event.
//!     4. Parameters that the grammar repeats on the end event (heading level, ordered
//!        list start index, emphasis level, link uri and title) are pushed on value stacks
//!        at begin and popped at the matching end, so producers supply them once.
//!
//!     This guarantees that no `next` event precedes the first sibling or follows the
//!     last, and that an empty sibling run still receives its bracketing begin/end pair
//!     (renderers use it to detect empty containers).
//!
//!     Calls must be balanced: every `*_begin` needs its `*_end`. An unbalanced end falls
//!     back to neutral parameter values instead of panicking.

use crate::handler::Handler;
use crate::types::{BlockType, ContentType, EmphasisLevel};

/// Wraps a [`Handler`] and feeds it a well formed event stream.
#[derive(Debug)]
pub struct Sequencer<H: Handler> {
    handler: H,
    blocks_has_child: Vec<bool>,
    list_has_child: Vec<bool>,
    contents_has_child: Vec<bool>,
    heading_levels: Vec<u8>,
    start_indices: Vec<u64>,
    emphasis_levels: Vec<EmphasisLevel>,
    links: Vec<(String, Option<String>)>,
}

impl<H: Handler> Sequencer<H> {
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            blocks_has_child: Vec::new(),
            list_has_child: Vec::new(),
            contents_has_child: Vec::new(),
            heading_levels: Vec::new(),
            start_indices: Vec::new(),
            emphasis_levels: Vec::new(),
            links: Vec::new(),
        }
    }

    /// Borrow the wrapped handler.
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Release the wrapped handler, typically to read its result.
    pub fn into_inner(self) -> H {
        self.handler
    }

    pub fn document_begin(&mut self) {
        self.handler.on_document_begin();
        self.blocks_begin();
    }

    pub fn document_end(&mut self) {
        self.blocks_end();
        self.handler.on_document_end();
    }

    pub fn code_block(&mut self, code: &str, hint: Option<&str>) {
        self.block_begin(BlockType::Code);
        self.handler.on_code_block(code, hint);
        self.block_end(BlockType::Code);
    }

    pub fn comment_block(&mut self, comment: &str) {
        self.block_begin(BlockType::Comment);
        self.handler.on_comment_block(comment);
        self.block_end(BlockType::Comment);
    }

    pub fn division_block(&mut self) {
        self.block_begin(BlockType::Division);
        self.handler.on_division_block();
        self.block_end(BlockType::Division);
    }

    pub fn heading_block_begin(&mut self, level: u8) {
        self.block_begin(BlockType::Heading);
        self.handler.on_heading_block_begin(level);
        self.contents_begin();
        self.heading_levels.push(level);
    }

    pub fn heading_block_end(&mut self) {
        self.contents_end();
        let level = self.heading_levels.pop().unwrap_or(1);
        self.handler.on_heading_block_end(level);
        self.block_end(BlockType::Heading);
    }

    pub fn unordered_list_block_begin(&mut self) {
        self.block_begin(BlockType::UnorderedList);
        self.handler.on_unordered_list_block_begin();
        self.handler.on_list_items_begin();
        self.list_has_child.push(false);
    }

    pub fn unordered_list_block_end(&mut self) {
        self.list_has_child.pop();
        self.handler.on_list_items_end();
        self.handler.on_unordered_list_block_end();
        self.block_end(BlockType::UnorderedList);
    }

    pub fn ordered_list_block_begin(&mut self, start_index: u64) {
        self.block_begin(BlockType::OrderedList);
        self.handler.on_ordered_list_block_begin(start_index);
        self.handler.on_list_items_begin();
        self.start_indices.push(start_index);
        self.list_has_child.push(false);
    }

    pub fn ordered_list_block_end(&mut self) {
        self.list_has_child.pop();
        self.handler.on_list_items_end();
        let start_index = self.start_indices.pop().unwrap_or(0);
        self.handler.on_ordered_list_block_end(start_index);
        self.block_end(BlockType::OrderedList);
    }

    pub fn list_item_begin(&mut self) {
        if mark_child(&mut self.list_has_child) {
            self.handler.on_next_list_item();
        }
        self.handler.on_list_item_begin();
        self.blocks_begin();
    }

    pub fn list_item_end(&mut self) {
        self.blocks_end();
        self.handler.on_list_item_end();
    }

    pub fn paragraph_block_begin(&mut self) {
        self.block_begin(BlockType::Paragraph);
        self.handler.on_paragraph_block_begin();
        self.contents_begin();
    }

    pub fn paragraph_block_end(&mut self) {
        self.contents_end();
        self.handler.on_paragraph_block_end();
        self.block_end(BlockType::Paragraph);
    }

    pub fn quote_block_begin(&mut self) {
        self.block_begin(BlockType::Quote);
        self.handler.on_quote_block_begin();
        self.blocks_begin();
    }

    pub fn quote_block_end(&mut self) {
        self.blocks_end();
        self.handler.on_quote_block_end();
        self.block_end(BlockType::Quote);
    }

    pub fn code_content(&mut self, code: &str) {
        self.content_begin(ContentType::Code);
        self.handler.on_code_content(code);
        self.content_end(ContentType::Code);
    }

    pub fn emphasis_content_begin(&mut self, level: EmphasisLevel) {
        self.content_begin(ContentType::Emphasis);
        self.handler.on_emphasis_content_begin(level);
        self.contents_begin();
        self.emphasis_levels.push(level);
    }

    pub fn emphasis_content_end(&mut self) {
        self.contents_end();
        let level = self.emphasis_levels.pop().unwrap_or(EmphasisLevel::Light);
        self.handler.on_emphasis_content_end(level);
        self.content_end(ContentType::Emphasis);
    }

    pub fn image_content(&mut self, uri: &str, title: Option<&str>, alternative: Option<&str>) {
        self.content_begin(ContentType::Image);
        self.handler.on_image_content(uri, title, alternative);
        self.content_end(ContentType::Image);
    }

    pub fn line_break_content(&mut self, hard: bool) {
        self.content_begin(ContentType::LineBreak);
        self.handler.on_line_break_content(hard);
        self.content_end(ContentType::LineBreak);
    }

    pub fn link_content_begin(&mut self, uri: &str, title: Option<&str>) {
        self.content_begin(ContentType::Link);
        self.handler.on_link_content_begin(uri, title);
        self.contents_begin();
        self.links.push((uri.to_string(), title.map(str::to_string)));
    }

    pub fn link_content_end(&mut self) {
        self.contents_end();
        let (uri, title) = self.links.pop().unwrap_or_default();
        self.handler.on_link_content_end(&uri, title.as_deref());
        self.content_end(ContentType::Link);
    }

    pub fn text_content(&mut self, text: &str) {
        self.content_begin(ContentType::Text);
        self.handler.on_text_content(text);
        self.content_end(ContentType::Text);
    }

    fn blocks_begin(&mut self) {
        self.handler.on_blocks_begin();
        self.blocks_has_child.push(false);
    }

    fn blocks_end(&mut self) {
        self.blocks_has_child.pop();
        self.handler.on_blocks_end();
    }

    fn block_begin(&mut self, block_type: BlockType) {
        if mark_child(&mut self.blocks_has_child) {
            self.handler.on_next_block();
        }
        self.handler.on_block_begin(block_type);
    }

    fn block_end(&mut self, block_type: BlockType) {
        self.handler.on_block_end(block_type);
    }

    fn contents_begin(&mut self) {
        self.handler.on_contents_begin();
        self.contents_has_child.push(false);
    }

    fn contents_end(&mut self) {
        self.contents_has_child.pop();
        self.handler.on_contents_end();
    }

    fn content_begin(&mut self, content_type: ContentType) {
        if mark_child(&mut self.contents_has_child) {
            self.handler.on_next_content();
        }
        self.handler.on_content_begin(content_type);
    }

    fn content_end(&mut self, content_type: ContentType) {
        self.handler.on_content_end(content_type);
    }
}

/// Flags the innermost container as non-empty and reports whether it already was.
fn mark_child(stack: &mut [bool]) -> bool {
    match stack.last_mut() {
        Some(has_child) => std::mem::replace(has_child, true),
        None => false,
    }
}
