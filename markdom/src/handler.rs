//! The Markdom event grammar
//!
//!     A handler consumes the canonical event stream and renders it into some target
//!     representation. Events arrive strictly nested:
//!
//!     document
//!     └── blocks                  on_blocks_begin / on_blocks_end
//!         └── block               on_block_begin(type) / on_block_end(type), on_next_block between siblings
//!             ├── code, comment, division leaves
//!             ├── heading, paragraph  + contents
//!             ├── lists           on_list_items_begin / end
//!             │   └── list item   on_list_item_begin / end, on_next_list_item between siblings
//!             │       └── blocks
//!             └── quote           + blocks
//!     contents                    on_contents_begin / on_contents_end
//!     └── content                 on_content_begin(type) / on_content_end(type), on_next_content between siblings
//!         ├── code, image, line break, text leaves
//!         └── emphasis, link      + contents
//!
//!     Every begin has a matching end and the `next` markers appear only between two
//!     siblings. Handlers do not check the grammar: feeding an out-of-protocol sequence
//!     gives undefined rendering. Producers go through the [`crate::sequencer::Sequencer`],
//!     which is the one place that guarantees a well formed stream.
//!
//!     All callbacks default to no-ops so a handler only spells out the events it renders.

use crate::types::{BlockType, ContentType, EmphasisLevel};

/// Consumer of Markdom events.
#[allow(unused_variables)]
pub trait Handler {
    /// Value produced once the document has been fully received.
    type Output;

    fn on_document_begin(&mut self) {}
    fn on_document_end(&mut self) {}

    fn on_blocks_begin(&mut self) {}
    fn on_block_begin(&mut self, block_type: BlockType) {}
    fn on_code_block(&mut self, code: &str, hint: Option<&str>) {}
    fn on_comment_block(&mut self, comment: &str) {}
    fn on_division_block(&mut self) {}
    fn on_heading_block_begin(&mut self, level: u8) {}
    fn on_heading_block_end(&mut self, level: u8) {}
    fn on_unordered_list_block_begin(&mut self) {}
    fn on_ordered_list_block_begin(&mut self, start_index: u64) {}
    fn on_list_items_begin(&mut self) {}
    fn on_list_item_begin(&mut self) {}
    fn on_list_item_end(&mut self) {}
    fn on_next_list_item(&mut self) {}
    fn on_list_items_end(&mut self) {}
    fn on_unordered_list_block_end(&mut self) {}
    fn on_ordered_list_block_end(&mut self, start_index: u64) {}
    fn on_paragraph_block_begin(&mut self) {}
    fn on_paragraph_block_end(&mut self) {}
    fn on_quote_block_begin(&mut self) {}
    fn on_quote_block_end(&mut self) {}
    fn on_block_end(&mut self, block_type: BlockType) {}
    fn on_next_block(&mut self) {}
    fn on_blocks_end(&mut self) {}

    fn on_contents_begin(&mut self) {}
    fn on_content_begin(&mut self, content_type: ContentType) {}
    fn on_code_content(&mut self, code: &str) {}
    fn on_emphasis_content_begin(&mut self, level: EmphasisLevel) {}
    fn on_emphasis_content_end(&mut self, level: EmphasisLevel) {}
    fn on_image_content(&mut self, uri: &str, title: Option<&str>, alternative: Option<&str>) {}
    fn on_line_break_content(&mut self, hard: bool) {}
    fn on_link_content_begin(&mut self, uri: &str, title: Option<&str>) {}
    fn on_link_content_end(&mut self, uri: &str, title: Option<&str>) {}
    fn on_text_content(&mut self, text: &str) {}
    fn on_content_end(&mut self, content_type: ContentType) {}
    fn on_next_content(&mut self) {}
    fn on_contents_end(&mut self) {}

    /// The rendered result. Only meaningful after `on_document_end`.
    fn result(&self) -> Self::Output;
}

/// Lets callers keep ownership of a handler while a dispatcher drives it.
impl<H: Handler + ?Sized> Handler for &mut H {
    type Output = H::Output;

    fn on_document_begin(&mut self) {
        (**self).on_document_begin()
    }
    fn on_document_end(&mut self) {
        (**self).on_document_end()
    }
    fn on_blocks_begin(&mut self) {
        (**self).on_blocks_begin()
    }
    fn on_block_begin(&mut self, block_type: BlockType) {
        (**self).on_block_begin(block_type)
    }
    fn on_code_block(&mut self, code: &str, hint: Option<&str>) {
        (**self).on_code_block(code, hint)
    }
    fn on_comment_block(&mut self, comment: &str) {
        (**self).on_comment_block(comment)
    }
    fn on_division_block(&mut self) {
        (**self).on_division_block()
    }
    fn on_heading_block_begin(&mut self, level: u8) {
        (**self).on_heading_block_begin(level)
    }
    fn on_heading_block_end(&mut self, level: u8) {
        (**self).on_heading_block_end(level)
    }
    fn on_unordered_list_block_begin(&mut self) {
        (**self).on_unordered_list_block_begin()
    }
    fn on_ordered_list_block_begin(&mut self, start_index: u64) {
        (**self).on_ordered_list_block_begin(start_index)
    }
    fn on_list_items_begin(&mut self) {
        (**self).on_list_items_begin()
    }
    fn on_list_item_begin(&mut self) {
        (**self).on_list_item_begin()
    }
    fn on_list_item_end(&mut self) {
        (**self).on_list_item_end()
    }
    fn on_next_list_item(&mut self) {
        (**self).on_next_list_item()
    }
    fn on_list_items_end(&mut self) {
        (**self).on_list_items_end()
    }
    fn on_unordered_list_block_end(&mut self) {
        (**self).on_unordered_list_block_end()
    }
    fn on_ordered_list_block_end(&mut self, start_index: u64) {
        (**self).on_ordered_list_block_end(start_index)
    }
    fn on_paragraph_block_begin(&mut self) {
        (**self).on_paragraph_block_begin()
    }
    fn on_paragraph_block_end(&mut self) {
        (**self).on_paragraph_block_end()
    }
    fn on_quote_block_begin(&mut self) {
        (**self).on_quote_block_begin()
    }
    fn on_quote_block_end(&mut self) {
        (**self).on_quote_block_end()
    }
    fn on_block_end(&mut self, block_type: BlockType) {
        (**self).on_block_end(block_type)
    }
    fn on_next_block(&mut self) {
        (**self).on_next_block()
    }
    fn on_blocks_end(&mut self) {
        (**self).on_blocks_end()
    }
    fn on_contents_begin(&mut self) {
        (**self).on_contents_begin()
    }
    fn on_content_begin(&mut self, content_type: ContentType) {
        (**self).on_content_begin(content_type)
    }
    fn on_code_content(&mut self, code: &str) {
        (**self).on_code_content(code)
    }
    fn on_emphasis_content_begin(&mut self, level: EmphasisLevel) {
        (**self).on_emphasis_content_begin(level)
    }
    fn on_emphasis_content_end(&mut self, level: EmphasisLevel) {
        (**self).on_emphasis_content_end(level)
    }
    fn on_image_content(&mut self, uri: &str, title: Option<&str>, alternative: Option<&str>) {
        (**self).on_image_content(uri, title, alternative)
    }
    fn on_line_break_content(&mut self, hard: bool) {
        (**self).on_line_break_content(hard)
    }
    fn on_link_content_begin(&mut self, uri: &str, title: Option<&str>) {
        (**self).on_link_content_begin(uri, title)
    }
    fn on_link_content_end(&mut self, uri: &str, title: Option<&str>) {
        (**self).on_link_content_end(uri, title)
    }
    fn on_text_content(&mut self, text: &str) {
        (**self).on_text_content(text)
    }
    fn on_content_end(&mut self, content_type: ContentType) {
        (**self).on_content_end(content_type)
    }
    fn on_next_content(&mut self) {
        (**self).on_next_content()
    }
    fn on_contents_end(&mut self) {
        (**self).on_contents_end()
    }

    fn result(&self) -> Self::Output {
        (**self).result()
    }
}
