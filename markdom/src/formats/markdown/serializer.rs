//! Markdown serialization (Markdom events → CommonMark text)
//!
//! Renders incrementally into one owned buffer. The renderer tracks enough left
//! context to keep the output unambiguous when it is parsed again:
//!
//! - `line_starts`: prefixes written at the start of every physical line (`> ` for
//!   quotes, marker-wide indentation for list items).
//! - `delimiters`: one [`Delimiter`] per open heading, paragraph, emphasis or link.
//!   Opening markers are written only when the span receives visible content.
//! - `lists`: marker style and next numeral of every open list.
//! - `line_started`, `only_digits_in_line`, `pending_space`: drive escaping. Spaces are
//!   deferred so they never precede a closing marker, and a `.` following only digits
//!   is escaped so text never turns into an ordered list item.

use super::delimiter::Delimiter;
use crate::handler::Handler;
use crate::types::{BlockType, EmphasisLevel};

pub const DEFAULT_ESCAPE_CHARACTERS: &str = "\\`*_[]";
pub const DEFAULT_ESCAPE_LINE_START_CHARACTERS: &str = "#+-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListMarker {
    Bullet,
    Numbered(u64),
}

#[derive(Debug, Clone)]
pub struct MarkdownHandler {
    handle_comments: bool,
    escape_characters: Vec<char>,
    escape_line_start_characters: Vec<char>,
    output: String,
    blocks_are_empty: bool,
    lists: Vec<ListMarker>,
    line_starts: Vec<String>,
    delimiters: Vec<Delimiter>,
    line_started: bool,
    only_digits_in_line: bool,
    pending_space: bool,
    in_paragraph: bool,
    last_ended_block: Option<BlockType>,
}

impl MarkdownHandler {
    pub fn new() -> Self {
        Self {
            handle_comments: true,
            escape_characters: DEFAULT_ESCAPE_CHARACTERS.chars().collect(),
            escape_line_start_characters: DEFAULT_ESCAPE_LINE_START_CHARACTERS.chars().collect(),
            output: String::new(),
            blocks_are_empty: false,
            lists: Vec::new(),
            line_starts: Vec::new(),
            delimiters: Vec::new(),
            line_started: false,
            only_digits_in_line: false,
            pending_space: false,
            in_paragraph: false,
            last_ended_block: None,
        }
    }

    pub fn with_handle_comments(mut self, handle_comments: bool) -> Self {
        self.handle_comments = handle_comments;
        self
    }

    /// Characters that are backslash-escaped wherever they appear in text.
    pub fn with_escape_characters(mut self, characters: &str) -> Self {
        self.escape_characters = characters.chars().collect();
        self
    }

    /// Characters that are escaped at the start of a paragraph line when followed by
    /// a space or tab.
    pub fn with_escape_line_start_characters(mut self, characters: &str) -> Self {
        self.escape_line_start_characters = characters.chars().collect();
        self
    }

    fn start_line(&mut self) {
        for prefix in &self.line_starts {
            self.output.push_str(prefix);
        }
    }

    fn terminate_line(&mut self) {
        self.output.push('\n');
    }

    fn reset_line_state(&mut self) {
        self.line_started = false;
        self.only_digits_in_line = true;
        self.pending_space = false;
    }

    /// Write the deferred space and every uncommitted opening marker, outermost first.
    fn flush_pending(&mut self) {
        if self.pending_space {
            self.output.push(' ');
        }
        self.pending_space = false;
        self.line_started = true;
        for delimiter in &mut self.delimiters {
            if !delimiter.is_committed() {
                self.output.push_str(delimiter.literal());
                delimiter.commit();
                self.only_digits_in_line = false;
            }
        }
    }

    /// Markdown merges two adjacent lists into one, so a thematic break goes between them.
    fn displace_adjacent_lists(&mut self) {
        if self.last_ended_block.is_some_and(BlockType::is_list) {
            self.on_block_begin(BlockType::Division);
            self.on_division_block();
            self.on_block_end(BlockType::Division);
        }
    }

    fn escapes_at_line_start(&self, character: char, next: Option<char>) -> bool {
        !self.line_started
            && self.in_paragraph
            && self.escape_line_start_characters.contains(&character)
            && matches!(next, Some(' ' | '\t'))
    }

    fn begin_list(&mut self, marker: ListMarker) {
        self.displace_adjacent_lists();
        self.lists.push(marker);
    }
}

impl Default for MarkdownHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Length of the longest run of consecutive backticks.
fn longest_backtick_run(code: &str) -> usize {
    code.split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0)
}

impl Handler for MarkdownHandler {
    type Output = String;

    fn on_document_begin(&mut self) {
        self.output.clear();
        self.lists.clear();
        self.line_starts.clear();
        self.delimiters.clear();
        self.blocks_are_empty = false;
        self.in_paragraph = false;
        self.last_ended_block = None;
    }

    fn on_blocks_begin(&mut self) {
        self.blocks_are_empty = true;
    }

    fn on_block_begin(&mut self, _block_type: BlockType) {
        self.blocks_are_empty = false;
    }

    fn on_code_block(&mut self, code: &str, hint: Option<&str>) {
        let fence = "`".repeat((longest_backtick_run(code) + 1).max(3));
        self.start_line();
        self.output.push_str(&fence);
        self.output.push_str(hint.unwrap_or_default());
        self.terminate_line();
        for line in code.split('\n') {
            self.start_line();
            self.output.push_str(line);
            self.terminate_line();
        }
        self.start_line();
        self.output.push_str(&fence);
        self.terminate_line();
    }

    fn on_comment_block(&mut self, comment: &str) {
        if !self.handle_comments {
            return;
        }
        if comment.contains('\n') {
            self.start_line();
            self.output.push_str("<!--");
            self.terminate_line();
            for line in comment.split('\n') {
                self.start_line();
                self.output.push_str(line);
                self.terminate_line();
            }
            self.start_line();
            self.output.push_str("-->");
            self.terminate_line();
        } else {
            self.start_line();
            self.output.push_str("<!-- ");
            self.output.push_str(comment);
            self.output.push_str(" -->");
            self.terminate_line();
        }
    }

    fn on_division_block(&mut self) {
        self.start_line();
        self.output.push_str("---");
        self.terminate_line();
    }

    fn on_heading_block_begin(&mut self, level: u8) {
        self.start_line();
        self.output.push_str(&"#".repeat(usize::from(level)));
        self.output.push(' ');
        self.reset_line_state();
        self.delimiters.push(Delimiter::nothing());
    }

    fn on_heading_block_end(&mut self, _level: u8) {
        self.terminate_line();
        self.delimiters.pop();
    }

    fn on_unordered_list_block_begin(&mut self) {
        self.begin_list(ListMarker::Bullet);
    }

    fn on_ordered_list_block_begin(&mut self, start_index: u64) {
        self.begin_list(ListMarker::Numbered(start_index));
    }

    fn on_list_item_begin(&mut self) {
        let marker = match self.lists.last_mut() {
            Some(ListMarker::Numbered(index)) => {
                let marker = format!("{index}. ");
                *index += 1;
                marker
            }
            _ => "* ".to_string(),
        };
        let indent = " ".repeat(marker.chars().count());
        self.line_starts.push(marker);
        self.start_line();
        self.terminate_line();
        if let Some(top) = self.line_starts.last_mut() {
            *top = indent;
        }
        self.last_ended_block = None;
    }

    fn on_list_item_end(&mut self) {
        self.line_starts.pop();
    }

    fn on_unordered_list_block_end(&mut self) {
        self.lists.pop();
    }

    fn on_ordered_list_block_end(&mut self, _start_index: u64) {
        self.lists.pop();
    }

    fn on_paragraph_block_begin(&mut self) {
        self.start_line();
        self.in_paragraph = true;
        self.reset_line_state();
        self.delimiters.push(Delimiter::nothing());
    }

    fn on_paragraph_block_end(&mut self) {
        self.in_paragraph = false;
        self.delimiters.pop();
        self.terminate_line();
    }

    fn on_quote_block_begin(&mut self) {
        self.line_starts.push("> ".to_string());
    }

    fn on_quote_block_end(&mut self) {
        self.line_starts.pop();
    }

    fn on_block_end(&mut self, block_type: BlockType) {
        self.last_ended_block = Some(block_type);
    }

    fn on_next_block(&mut self) {
        self.start_line();
        self.terminate_line();
    }

    fn on_blocks_end(&mut self) {
        if self.blocks_are_empty {
            self.start_line();
            self.terminate_line();
        }
        self.blocks_are_empty = false;
    }

    fn on_code_content(&mut self, code: &str) {
        self.flush_pending();
        self.output.push('`');
        let run = longest_backtick_run(code);
        if code.is_empty() {
            self.output.push(' ');
        } else if run == 0 {
            let padded = code.len() > 1
                && code.starts_with(' ')
                && code.ends_with(' ')
                && !code.trim().is_empty();
            if padded {
                self.output.push(' ');
            }
            self.output.push_str(code);
            if padded {
                self.output.push(' ');
            }
        } else {
            let fence = "`".repeat(run);
            self.output.push_str(&fence);
            self.output.push(' ');
            self.output.push_str(code);
            self.output.push(' ');
            self.output.push_str(&fence);
        }
        self.output.push('`');
        self.line_started = true;
        self.only_digits_in_line = false;
    }

    fn on_emphasis_content_begin(&mut self, level: EmphasisLevel) {
        let literal = match level {
            EmphasisLevel::Light => "*",
            EmphasisLevel::Strong => "**",
        };
        self.delimiters.push(Delimiter::new(literal));
    }

    fn on_emphasis_content_end(&mut self, _level: EmphasisLevel) {
        if let Some(delimiter) = self.delimiters.pop() {
            if delimiter.is_committed() {
                self.output.push_str(delimiter.literal());
            }
        }
    }

    fn on_image_content(&mut self, uri: &str, title: Option<&str>, alternative: Option<&str>) {
        self.flush_pending();
        self.output.push_str("![");
        self.output.push_str(alternative.unwrap_or_default());
        self.output.push_str("](");
        self.output.push_str(uri);
        if let Some(title) = title {
            self.output.push_str(" \"");
            self.output.push_str(title);
            self.output.push('"');
        }
        self.output.push(')');
        self.line_started = true;
        self.only_digits_in_line = false;
    }

    fn on_line_break_content(&mut self, hard: bool) {
        if !self.in_paragraph {
            self.pending_space = self.line_started;
            return;
        }
        if hard {
            self.output.push_str("  ");
        }
        self.terminate_line();
        self.start_line();
        self.reset_line_state();
    }

    fn on_link_content_begin(&mut self, _uri: &str, _title: Option<&str>) {
        self.delimiters.push(Delimiter::new("["));
    }

    fn on_link_content_end(&mut self, uri: &str, title: Option<&str>) {
        let title = title.map(|title| format!(" \"{title}\"")).unwrap_or_default();
        let empty = self
            .delimiters
            .last()
            .is_some_and(|delimiter| !delimiter.is_committed());
        if empty {
            self.on_text_content(&format!("{uri}{title}"));
        }
        // A link without visible text still needs its opening bracket.
        if self.delimiters.last().is_some_and(|d| !d.is_committed()) {
            self.flush_pending();
        }
        self.delimiters.pop();
        self.output.push_str("](");
        self.output.push_str(uri);
        self.output.push_str(&title);
        self.output.push(')');
    }

    fn on_text_content(&mut self, text: &str) {
        let mut characters = text.chars().peekable();
        while let Some(character) = characters.next() {
            let next = characters.peek().copied();
            if character == '\t' {
                self.pending_space = self.line_started;
            } else if character.is_control() {
                // dropped
            } else if self.escapes_at_line_start(character, next)
                || self.escape_characters.contains(&character)
                || (character == '.' && self.only_digits_in_line)
            {
                self.flush_pending();
                self.output.push('\\');
                self.output.push(character);
            } else if character == ' ' {
                self.pending_space = self.line_started;
            } else {
                self.flush_pending();
                self.output.push(character);
            }
            self.only_digits_in_line = self.only_digits_in_line && character.is_ascii_digit();
        }
    }

    fn result(&self) -> String {
        self.output.clone()
    }
}
