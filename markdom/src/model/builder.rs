//! Structured-object handler: collects an event stream into a [`Document`].
//!
//! Nodes live in an arena and are addressed by index. Three index stacks track the
//! current insertion points: the node receiving blocks (document, quote or list item),
//! the open list receiving items, and the node receiving contents (paragraph, heading,
//! emphasis or link). The arena is frozen into an owned tree by [`Handler::result`].

use super::{Block, Content, Document, ListItem};
use crate::handler::Handler;
use crate::types::EmphasisLevel;

#[derive(Debug, Clone)]
enum Slot {
    Root,
    CodeBlock { code: String, hint: Option<String> },
    Comment { comment: String },
    Division,
    Heading { level: u8 },
    UnorderedList,
    OrderedList { start_index: u64 },
    ListItem,
    Paragraph,
    Quote,
    CodeContent { code: String },
    Emphasis { level: EmphasisLevel },
    Image { uri: String, title: Option<String>, alternative: Option<String> },
    LineBreak { hard: bool },
    Link { uri: String, title: Option<String> },
    Text { text: String },
}

#[derive(Debug, Clone)]
struct Node {
    slot: Slot,
    children: Vec<usize>,
}

const ROOT: usize = 0;

#[derive(Debug, Clone)]
pub struct ModelBuilder {
    handle_comments: bool,
    nodes: Vec<Node>,
    block_parents: Vec<usize>,
    list_blocks: Vec<usize>,
    content_parents: Vec<usize>,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self {
            handle_comments: true,
            nodes: Vec::new(),
            block_parents: Vec::new(),
            list_blocks: Vec::new(),
            content_parents: Vec::new(),
        }
    }

    /// Keep or drop comment blocks (kept by default).
    pub fn with_handle_comments(mut self, handle_comments: bool) -> Self {
        self.handle_comments = handle_comments;
        self
    }

    fn push(&mut self, parent: Option<usize>, slot: Slot) -> usize {
        let index = self.nodes.len();
        self.nodes.push(Node {
            slot,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.nodes[parent].children.push(index);
        }
        index
    }

    fn add_block(&mut self, slot: Slot) -> usize {
        let parent = self.block_parents.last().copied();
        self.push(parent, slot)
    }

    fn add_content(&mut self, slot: Slot) -> usize {
        let parent = self.content_parents.last().copied();
        self.push(parent, slot)
    }

    fn freeze_blocks(&self, index: usize) -> Vec<Block> {
        self.nodes[index]
            .children
            .iter()
            .filter_map(|&child| self.freeze_block(child))
            .collect()
    }

    fn freeze_block(&self, index: usize) -> Option<Block> {
        let block = match &self.nodes[index].slot {
            Slot::CodeBlock { code, hint } => Block::Code {
                code: code.clone(),
                hint: hint.clone(),
            },
            Slot::Comment { comment } => Block::Comment {
                comment: comment.clone(),
            },
            Slot::Division => Block::Division,
            Slot::Heading { level } => Block::Heading {
                level: *level,
                contents: self.freeze_contents(index),
            },
            Slot::UnorderedList => Block::UnorderedList {
                items: self.freeze_items(index),
            },
            Slot::OrderedList { start_index } => Block::OrderedList {
                start_index: *start_index,
                items: self.freeze_items(index),
            },
            Slot::Paragraph => Block::Paragraph {
                contents: self.freeze_contents(index),
            },
            Slot::Quote => Block::Quote {
                blocks: self.freeze_blocks(index),
            },
            _ => return None,
        };
        Some(block)
    }

    fn freeze_items(&self, index: usize) -> Vec<ListItem> {
        self.nodes[index]
            .children
            .iter()
            .map(|&child| ListItem {
                blocks: self.freeze_blocks(child),
            })
            .collect()
    }

    fn freeze_contents(&self, index: usize) -> Vec<Content> {
        self.nodes[index]
            .children
            .iter()
            .filter_map(|&child| self.freeze_content(child))
            .collect()
    }

    fn freeze_content(&self, index: usize) -> Option<Content> {
        let content = match &self.nodes[index].slot {
            Slot::CodeContent { code } => Content::Code { code: code.clone() },
            Slot::Emphasis { level } => Content::Emphasis {
                level: *level,
                contents: self.freeze_contents(index),
            },
            Slot::Image {
                uri,
                title,
                alternative,
            } => Content::Image {
                uri: uri.clone(),
                title: title.clone(),
                alternative: alternative.clone(),
            },
            Slot::LineBreak { hard } => Content::LineBreak { hard: *hard },
            Slot::Link { uri, title } => Content::Link {
                uri: uri.clone(),
                title: title.clone(),
                contents: self.freeze_contents(index),
            },
            Slot::Text { text } => Content::Text { text: text.clone() },
            _ => return None,
        };
        Some(content)
    }
}

impl Default for ModelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for ModelBuilder {
    type Output = Document;

    fn on_document_begin(&mut self) {
        self.nodes.clear();
        self.block_parents.clear();
        self.list_blocks.clear();
        self.content_parents.clear();
        let root = self.push(None, Slot::Root);
        self.block_parents.push(root);
    }

    fn on_document_end(&mut self) {
        self.block_parents.pop();
    }

    fn on_code_block(&mut self, code: &str, hint: Option<&str>) {
        self.add_block(Slot::CodeBlock {
            code: code.to_string(),
            hint: hint.map(str::to_string),
        });
    }

    fn on_comment_block(&mut self, comment: &str) {
        if self.handle_comments {
            self.add_block(Slot::Comment {
                comment: comment.to_string(),
            });
        }
    }

    fn on_division_block(&mut self) {
        self.add_block(Slot::Division);
    }

    fn on_heading_block_begin(&mut self, level: u8) {
        let heading = self.add_block(Slot::Heading { level });
        self.content_parents.push(heading);
    }

    fn on_heading_block_end(&mut self, _level: u8) {
        self.content_parents.pop();
    }

    fn on_unordered_list_block_begin(&mut self) {
        let list = self.add_block(Slot::UnorderedList);
        self.list_blocks.push(list);
    }

    fn on_ordered_list_block_begin(&mut self, start_index: u64) {
        let list = self.add_block(Slot::OrderedList { start_index });
        self.list_blocks.push(list);
    }

    fn on_list_item_begin(&mut self) {
        let list = self.list_blocks.last().copied();
        let item = self.push(list, Slot::ListItem);
        self.block_parents.push(item);
    }

    fn on_list_item_end(&mut self) {
        self.block_parents.pop();
    }

    fn on_unordered_list_block_end(&mut self) {
        self.list_blocks.pop();
    }

    fn on_ordered_list_block_end(&mut self, _start_index: u64) {
        self.list_blocks.pop();
    }

    fn on_paragraph_block_begin(&mut self) {
        let paragraph = self.add_block(Slot::Paragraph);
        self.content_parents.push(paragraph);
    }

    fn on_paragraph_block_end(&mut self) {
        self.content_parents.pop();
    }

    fn on_quote_block_begin(&mut self) {
        let quote = self.add_block(Slot::Quote);
        self.block_parents.push(quote);
    }

    fn on_quote_block_end(&mut self) {
        self.block_parents.pop();
    }

    fn on_code_content(&mut self, code: &str) {
        self.add_content(Slot::CodeContent {
            code: code.to_string(),
        });
    }

    fn on_emphasis_content_begin(&mut self, level: EmphasisLevel) {
        let emphasis = self.add_content(Slot::Emphasis { level });
        self.content_parents.push(emphasis);
    }

    fn on_emphasis_content_end(&mut self, _level: EmphasisLevel) {
        self.content_parents.pop();
    }

    fn on_image_content(&mut self, uri: &str, title: Option<&str>, alternative: Option<&str>) {
        self.add_content(Slot::Image {
            uri: uri.to_string(),
            title: title.map(str::to_string),
            alternative: alternative.map(str::to_string),
        });
    }

    fn on_line_break_content(&mut self, hard: bool) {
        self.add_content(Slot::LineBreak { hard });
    }

    fn on_link_content_begin(&mut self, uri: &str, title: Option<&str>) {
        let link = self.add_content(Slot::Link {
            uri: uri.to_string(),
            title: title.map(str::to_string),
        });
        self.content_parents.push(link);
    }

    fn on_link_content_end(&mut self, _uri: &str, _title: Option<&str>) {
        self.content_parents.pop();
    }

    fn on_text_content(&mut self, text: &str) {
        self.add_content(Slot::Text {
            text: text.to_string(),
        });
    }

    fn result(&self) -> Document {
        if self.nodes.is_empty() {
            return Document::default();
        }
        Document::new(self.freeze_blocks(ROOT))
    }
}
