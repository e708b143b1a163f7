//! Replays a frozen model as an event stream.

use super::{Block, Content, Document, ListItem};
use crate::dispatcher::Dispatcher;
use crate::error::DispatchError;
use crate::handler::Handler;
use crate::sequencer::Sequencer;

impl Dispatcher for Document {
    fn dispatch_to<H: Handler>(&self, handler: H) -> Result<H::Output, DispatchError> {
        Ok(self.render(handler))
    }
}

impl Document {
    /// Render the document with `handler`. Replaying a model cannot fail.
    pub fn render<H: Handler>(&self, handler: H) -> H::Output {
        let mut sequencer = Sequencer::new(handler);
        sequencer.document_begin();
        walk_blocks(&self.blocks, &mut sequencer);
        sequencer.document_end();
        sequencer.into_inner().result()
    }
}

pub(crate) fn walk_blocks<H: Handler>(blocks: &[Block], sequencer: &mut Sequencer<H>) {
    for block in blocks {
        walk_block(block, sequencer);
    }
}

fn walk_block<H: Handler>(block: &Block, sequencer: &mut Sequencer<H>) {
    match block {
        Block::Code { code, hint } => sequencer.code_block(code, hint.as_deref()),
        Block::Comment { comment } => sequencer.comment_block(comment),
        Block::Division => sequencer.division_block(),
        Block::Heading { level, contents } => {
            sequencer.heading_block_begin(*level);
            walk_contents(contents, sequencer);
            sequencer.heading_block_end();
        }
        Block::UnorderedList { items } => {
            sequencer.unordered_list_block_begin();
            walk_items(items, sequencer);
            sequencer.unordered_list_block_end();
        }
        Block::OrderedList { start_index, items } => {
            sequencer.ordered_list_block_begin(*start_index);
            walk_items(items, sequencer);
            sequencer.ordered_list_block_end();
        }
        Block::Paragraph { contents } => {
            sequencer.paragraph_block_begin();
            walk_contents(contents, sequencer);
            sequencer.paragraph_block_end();
        }
        Block::Quote { blocks } => {
            sequencer.quote_block_begin();
            walk_blocks(blocks, sequencer);
            sequencer.quote_block_end();
        }
    }
}

fn walk_items<H: Handler>(items: &[ListItem], sequencer: &mut Sequencer<H>) {
    for item in items {
        sequencer.list_item_begin();
        walk_blocks(&item.blocks, sequencer);
        sequencer.list_item_end();
    }
}

pub(crate) fn walk_contents<H: Handler>(contents: &[Content], sequencer: &mut Sequencer<H>) {
    for content in contents {
        match content {
            Content::Code { code } => sequencer.code_content(code),
            Content::Emphasis { level, contents } => {
                sequencer.emphasis_content_begin(*level);
                walk_contents(contents, sequencer);
                sequencer.emphasis_content_end();
            }
            Content::Image {
                uri,
                title,
                alternative,
            } => sequencer.image_content(uri, title.as_deref(), alternative.as_deref()),
            Content::LineBreak { hard } => sequencer.line_break_content(*hard),
            Content::Link {
                uri,
                title,
                contents,
            } => {
                sequencer.link_content_begin(uri, title.as_deref());
                walk_contents(contents, sequencer);
                sequencer.link_content_end();
            }
            Content::Text { text } => sequencer.text_content(text),
        }
    }
}
