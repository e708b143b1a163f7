//! XML parsing (Markdom XML → Markdom events)
//!
//! Element names are the node types, scalar fields are attributes, and the bodies of
//! `Code`, `Comment` and `Text` elements are their text content (CDATA included).
//! Whitespace between elements is ignored.

use crate::dispatcher::Dispatcher;
use crate::error::DispatchError;
use crate::handler::Handler;
use crate::sequencer::Sequencer;
use crate::types::{BlockType, ContentType, EmphasisLevel, MAX_HEADING_LEVEL};
use roxmltree::Node;

type Result<T> = std::result::Result<T, DispatchError>;

/// Dispatches a Markdom XML document.
#[derive(Debug, Clone)]
pub struct XmlDispatcher {
    source: String,
}

impl XmlDispatcher {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

impl Dispatcher for XmlDispatcher {
    fn dispatch_to<H: Handler>(&self, handler: H) -> Result<H::Output> {
        let document = roxmltree::Document::parse(&self.source)
            .map_err(|e| DispatchError::Parse(e.to_string()))?;
        let root = document.root_element();
        validate_root(root)?;
        tracing::debug!(bytes = self.source.len(), "dispatching xml");

        let mut sequencer = Sequencer::new(handler);
        sequencer.document_begin();
        walk_blocks(root, &mut sequencer)?;
        sequencer.document_end();
        Ok(sequencer.into_inner().result())
    }
}

fn validate_root(root: Node<'_, '_>) -> Result<()> {
    if root.tag_name().name() != "Document" {
        return Err(DispatchError::invalid(format!(
            "root node {} is no Document.",
            root.tag_name().name()
        )));
    }
    let version = root
        .attribute("version")
        .ok_or_else(|| DispatchError::invalid("no document version specified."))?;
    match version.trim().parse::<f64>() {
        Ok(version) if version == 1.0 => Ok(()),
        _ => Err(DispatchError::invalid(
            "version mismatch Expected version 1.0.",
        )),
    }
}

fn elements<'a, 'input>(node: Node<'a, 'input>) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(Node::is_element)
}

/// Concatenated text of all descendants.
fn text_content(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(Node::is_text)
        .filter_map(|text| text.text())
        .collect()
}

fn walk_blocks<H: Handler>(parent: Node<'_, '_>, sequencer: &mut Sequencer<H>) -> Result<()> {
    for node in elements(parent) {
        let name = node.tag_name().name();
        let block_type = BlockType::from_name(name).ok_or_else(|| {
            DispatchError::invalid(format!(
                "block node {name} is invalid in {}.",
                parent.tag_name().name()
            ))
        })?;
        let element = Element { node };
        match block_type {
            BlockType::Code => sequencer.code_block(&text_content(node), node.attribute("hint")),
            BlockType::Comment => sequencer.comment_block(&text_content(node)),
            BlockType::Division => sequencer.division_block(),
            BlockType::Heading => {
                sequencer.heading_block_begin(element.heading_level()?);
                walk_contents(node, sequencer)?;
                sequencer.heading_block_end();
            }
            BlockType::UnorderedList => {
                sequencer.unordered_list_block_begin();
                walk_items(node, sequencer)?;
                sequencer.unordered_list_block_end();
            }
            BlockType::OrderedList => {
                sequencer.ordered_list_block_begin(element.unsigned("startIndex")?);
                walk_items(node, sequencer)?;
                sequencer.ordered_list_block_end();
            }
            BlockType::Paragraph => {
                sequencer.paragraph_block_begin();
                walk_contents(node, sequencer)?;
                sequencer.paragraph_block_end();
            }
            BlockType::Quote => {
                sequencer.quote_block_begin();
                walk_blocks(node, sequencer)?;
                sequencer.quote_block_end();
            }
        }
    }
    Ok(())
}

fn walk_items<H: Handler>(list: Node<'_, '_>, sequencer: &mut Sequencer<H>) -> Result<()> {
    for item in elements(list) {
        if item.tag_name().name() != "ListItem" {
            return Err(DispatchError::invalid(format!(
                "list item node {} is invalid in {}.",
                item.tag_name().name(),
                list.tag_name().name()
            )));
        }
        sequencer.list_item_begin();
        walk_blocks(item, sequencer)?;
        sequencer.list_item_end();
    }
    Ok(())
}

fn walk_contents<H: Handler>(parent: Node<'_, '_>, sequencer: &mut Sequencer<H>) -> Result<()> {
    for node in elements(parent) {
        let name = node.tag_name().name();
        let content_type = ContentType::from_name(name).ok_or_else(|| {
            DispatchError::invalid(format!(
                "content node type {name} is invalid in {}.",
                parent.tag_name().name()
            ))
        })?;
        let element = Element { node };
        match content_type {
            ContentType::Code => sequencer.code_content(&text_content(node)),
            ContentType::Emphasis => {
                let level = element.unsigned("level")?;
                let level = EmphasisLevel::from_level(level).ok_or_else(|| {
                    DispatchError::invalid(format!("emphasis level {level} is invalid."))
                })?;
                sequencer.emphasis_content_begin(level);
                walk_contents(node, sequencer)?;
                sequencer.emphasis_content_end();
            }
            ContentType::Image => sequencer.image_content(
                element.content_attribute(content_type, "uri")?,
                node.attribute("title"),
                node.attribute("alternative"),
            ),
            ContentType::LineBreak => {
                let hard = node
                    .attribute("hard")
                    .is_some_and(|hard| hard.eq_ignore_ascii_case("true"));
                sequencer.line_break_content(hard);
            }
            ContentType::Link => {
                sequencer.link_content_begin(
                    element.content_attribute(content_type, "uri")?,
                    node.attribute("title"),
                );
                walk_contents(node, sequencer)?;
                sequencer.link_content_end();
            }
            ContentType::Text => sequencer.text_content(&text_content(node)),
        }
    }
    Ok(())
}

struct Element<'a, 'input> {
    node: Node<'a, 'input>,
}

impl<'a> Element<'a, '_> {
    fn missing(type_name: &str, key: &str) -> DispatchError {
        DispatchError::invalid(format!("{type_name} node has no valid {key}."))
    }

    fn unsigned(&self, key: &str) -> Result<u64> {
        let type_name = self.node.tag_name().name();
        self.node
            .attribute(key)
            .and_then(|value| value.trim().parse().ok())
            .ok_or_else(|| Self::missing(type_name, key))
    }

    fn heading_level(&self) -> Result<u8> {
        let level = self.unsigned("level")?;
        match u8::try_from(level) {
            Ok(level) if (1..=MAX_HEADING_LEVEL).contains(&level) => Ok(level),
            _ => Err(DispatchError::invalid(format!(
                "heading level {level} is invalid."
            ))),
        }
    }

    fn content_attribute(&self, content_type: ContentType, key: &str) -> Result<&'a str> {
        self.node
            .attribute(key)
            .ok_or_else(|| Self::missing(content_type.name(), key))
    }
}
