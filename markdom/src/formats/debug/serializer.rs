//! Debug trace handler

use crate::handler::Handler;
use crate::types::{BlockType, ContentType, EmphasisLevel};

const INDENT: &str = "    ";

#[derive(Debug, Clone)]
pub struct DebugHandler {
    handle_comments: bool,
    depth: usize,
    lines: Vec<String>,
}

impl DebugHandler {
    pub fn new() -> Self {
        Self {
            handle_comments: true,
            depth: 0,
            lines: Vec::new(),
        }
    }

    pub fn with_handle_comments(mut self, handle_comments: bool) -> Self {
        self.handle_comments = handle_comments;
        self
    }

    fn line(&mut self, event: &str) {
        self.lines.push(format!("{}{event}", INDENT.repeat(self.depth)));
    }

    fn line_with(&mut self, event: &str, args: &str) {
        self.lines
            .push(format!("{}{event}: {args}", INDENT.repeat(self.depth)));
    }

    fn open(&mut self, event: &str) {
        self.line(event);
        self.depth += 1;
    }

    fn open_with(&mut self, event: &str, args: &str) {
        self.line_with(event, args);
        self.depth += 1;
    }

    fn close(&mut self, event: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.line(event);
    }

    fn close_with(&mut self, event: &str, args: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.line_with(event, args);
    }
}

impl Default for DebugHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for DebugHandler {
    type Output = String;

    fn on_document_begin(&mut self) {
        self.lines.clear();
        self.depth = 0;
        self.open("on_document_begin");
    }

    fn on_document_end(&mut self) {
        self.close("on_document_end");
    }

    fn on_blocks_begin(&mut self) {
        self.open("on_blocks_begin");
    }

    fn on_block_begin(&mut self, block_type: BlockType) {
        self.open_with("on_block_begin", block_type.name());
    }

    fn on_code_block(&mut self, code: &str, hint: Option<&str>) {
        self.line_with(
            "on_code_block",
            &format!("{} ~ {code}", hint.unwrap_or_default()),
        );
    }

    fn on_comment_block(&mut self, comment: &str) {
        if self.handle_comments {
            self.line_with("on_comment_block", comment);
        }
    }

    fn on_division_block(&mut self) {
        self.line("on_division_block");
    }

    fn on_heading_block_begin(&mut self, level: u8) {
        self.line_with("on_heading_block_begin", &level.to_string());
    }

    fn on_heading_block_end(&mut self, level: u8) {
        self.line_with("on_heading_block_end", &level.to_string());
    }

    fn on_unordered_list_block_begin(&mut self) {
        self.line("on_unordered_list_block_begin");
    }

    fn on_ordered_list_block_begin(&mut self, start_index: u64) {
        self.line_with("on_ordered_list_block_begin", &start_index.to_string());
    }

    fn on_list_items_begin(&mut self) {
        self.line("on_list_items_begin");
    }

    fn on_list_item_begin(&mut self) {
        self.line("on_list_item_begin");
    }

    fn on_list_item_end(&mut self) {
        self.line("on_list_item_end");
    }

    fn on_next_list_item(&mut self) {
        self.line("on_next_list_item");
    }

    fn on_list_items_end(&mut self) {
        self.line("on_list_items_end");
    }

    fn on_unordered_list_block_end(&mut self) {
        self.line("on_unordered_list_block_end");
    }

    fn on_ordered_list_block_end(&mut self, start_index: u64) {
        self.line_with("on_ordered_list_block_end", &start_index.to_string());
    }

    fn on_paragraph_block_begin(&mut self) {
        self.line("on_paragraph_block_begin");
    }

    fn on_paragraph_block_end(&mut self) {
        self.line("on_paragraph_block_end");
    }

    fn on_quote_block_begin(&mut self) {
        self.line("on_quote_block_begin");
    }

    fn on_quote_block_end(&mut self) {
        self.line("on_quote_block_end");
    }

    fn on_block_end(&mut self, block_type: BlockType) {
        self.close_with("on_block_end", block_type.name());
    }

    fn on_next_block(&mut self) {
        self.line("on_next_block");
    }

    fn on_blocks_end(&mut self) {
        self.close("on_blocks_end");
    }

    fn on_contents_begin(&mut self) {
        self.open("on_contents_begin");
    }

    fn on_content_begin(&mut self, content_type: ContentType) {
        self.open_with("on_content_begin", content_type.name());
    }

    fn on_code_content(&mut self, code: &str) {
        self.line_with("on_code_content", code);
    }

    fn on_emphasis_content_begin(&mut self, level: EmphasisLevel) {
        self.line_with("on_emphasis_content_begin", &level.to_string());
    }

    fn on_emphasis_content_end(&mut self, level: EmphasisLevel) {
        self.line_with("on_emphasis_content_end", &level.to_string());
    }

    fn on_image_content(&mut self, uri: &str, title: Option<&str>, alternative: Option<&str>) {
        self.line_with(
            "on_image_content",
            &format!(
                "{uri} ~ {} ~ {}",
                title.unwrap_or_default(),
                alternative.unwrap_or_default()
            ),
        );
    }

    fn on_line_break_content(&mut self, hard: bool) {
        self.line_with("on_line_break_content", &hard.to_string());
    }

    fn on_link_content_begin(&mut self, uri: &str, title: Option<&str>) {
        self.line_with(
            "on_link_content_begin",
            &format!("{uri} ~ {}", title.unwrap_or_default()),
        );
    }

    fn on_link_content_end(&mut self, uri: &str, title: Option<&str>) {
        self.line_with(
            "on_link_content_end",
            &format!("{uri} ~ {}", title.unwrap_or_default()),
        );
    }

    fn on_text_content(&mut self, text: &str) {
        self.line_with("on_text_content", text);
    }

    fn on_content_end(&mut self, content_type: ContentType) {
        self.close_with("on_content_end", content_type.name());
    }

    fn on_next_content(&mut self) {
        self.line("on_next_content");
    }

    fn on_contents_end(&mut self) {
        self.close("on_contents_end");
    }

    fn result(&self) -> String {
        self.lines.join("\n")
    }
}
