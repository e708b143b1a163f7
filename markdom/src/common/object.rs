//! Structured-object dispatcher
//!
//!     Walks a generic attributed tree, the shape shared by the JSON and YAML formats
//!     once their libraries have parsed the text:
//!
//!     {
//!       "version": {"major": 1, "minor": 0},
//!       "blocks": [ {"type": "Paragraph", "contents": [ {"type": "Text", "text": "Hi"} ]} ]
//!     }
//!
//!     The root is validated completely before the first event is emitted, so a version
//!     mismatch never reaches the handler. Nodes below the root are validated as they are
//!     walked. Optional attributes (`hint`, `title`, `alternative`) are absent when the key
//!     is missing or `null`.

use crate::dispatcher::Dispatcher;
use crate::error::DispatchError;
use crate::handler::Handler;
use crate::sequencer::Sequencer;
use crate::types::{BlockType, ContentType, EmphasisLevel, MAX_HEADING_LEVEL};
use serde_json::{Map, Value};

type Result<T> = std::result::Result<T, DispatchError>;

/// Dispatches a document held as a [`serde_json::Value`] tree.
#[derive(Debug, Clone)]
pub struct ObjectDispatcher {
    document: Value,
}

impl ObjectDispatcher {
    pub fn new(document: Value) -> Self {
        Self { document }
    }

    /// Check the root node and return its block list.
    fn validate_root(&self) -> Result<&Vec<Value>> {
        let root = self
            .document
            .as_object()
            .ok_or_else(|| DispatchError::invalid("root node is no object."))?;
        let version = root
            .get("version")
            .and_then(Value::as_object)
            .ok_or_else(|| DispatchError::invalid("no document version specified."))?;
        let major = version.get("major").and_then(Value::as_u64);
        let minor = version.get("minor").and_then(Value::as_u64);
        match (major, minor) {
            (Some(1), Some(0)) => {}
            (Some(_), Some(_)) => {
                return Err(DispatchError::invalid(
                    "version mismatch Expected version 1.0.",
                ))
            }
            _ => {
                return Err(DispatchError::invalid(
                    "no document valid version specified.",
                ))
            }
        }
        root.get("blocks")
            .and_then(Value::as_array)
            .ok_or_else(|| DispatchError::invalid("document has no valid blocks."))
    }
}

impl Dispatcher for ObjectDispatcher {
    fn dispatch_to<H: Handler>(&self, handler: H) -> Result<H::Output> {
        let blocks = self.validate_root()?;
        tracing::debug!(blocks = blocks.len(), "dispatching structured object");
        let mut sequencer = Sequencer::new(handler);
        sequencer.document_begin();
        walk_blocks(blocks, &mut sequencer)?;
        sequencer.document_end();
        Ok(sequencer.into_inner().result())
    }
}

fn walk_blocks<H: Handler>(blocks: &[Value], sequencer: &mut Sequencer<H>) -> Result<()> {
    for node in blocks {
        let node = node
            .as_object()
            .ok_or_else(|| DispatchError::invalid("block node is no object."))?;
        let type_name = node
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| DispatchError::invalid("block node has no type."))?;
        let block_type = BlockType::from_name(type_name).ok_or_else(|| {
            DispatchError::invalid(format!("block node type {type_name} is invalid."))
        })?;
        let attrs = Attributes {
            node,
            type_name: block_type.name(),
        };
        match block_type {
            BlockType::Code => sequencer.code_block(attrs.string("code")?, attrs.optional("hint")?),
            BlockType::Comment => sequencer.comment_block(attrs.string("comment")?),
            BlockType::Division => sequencer.division_block(),
            BlockType::Heading => {
                sequencer.heading_block_begin(attrs.heading_level()?);
                walk_contents(attrs.array("contents")?, sequencer)?;
                sequencer.heading_block_end();
            }
            BlockType::UnorderedList => {
                sequencer.unordered_list_block_begin();
                walk_items(attrs.array("items")?, sequencer)?;
                sequencer.unordered_list_block_end();
            }
            BlockType::OrderedList => {
                sequencer.ordered_list_block_begin(attrs.unsigned("startIndex")?);
                walk_items(attrs.array("items")?, sequencer)?;
                sequencer.ordered_list_block_end();
            }
            BlockType::Paragraph => {
                sequencer.paragraph_block_begin();
                walk_contents(attrs.array("contents")?, sequencer)?;
                sequencer.paragraph_block_end();
            }
            BlockType::Quote => {
                sequencer.quote_block_begin();
                walk_blocks(attrs.array("blocks")?, sequencer)?;
                sequencer.quote_block_end();
            }
        }
    }
    Ok(())
}

fn walk_items<H: Handler>(items: &[Value], sequencer: &mut Sequencer<H>) -> Result<()> {
    for node in items {
        let node = node
            .as_object()
            .ok_or_else(|| DispatchError::invalid("list item node is no object."))?;
        let attrs = Attributes {
            node,
            type_name: "ListItem",
        };
        sequencer.list_item_begin();
        walk_blocks(attrs.array("blocks")?, sequencer)?;
        sequencer.list_item_end();
    }
    Ok(())
}

fn walk_contents<H: Handler>(contents: &[Value], sequencer: &mut Sequencer<H>) -> Result<()> {
    for node in contents {
        let node = node
            .as_object()
            .ok_or_else(|| DispatchError::invalid("content node is no object."))?;
        let type_name = node
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| DispatchError::invalid("content node has no type."))?;
        let content_type = ContentType::from_name(type_name).ok_or_else(|| {
            DispatchError::invalid(format!("content node type {type_name} is invalid."))
        })?;
        let attrs = Attributes {
            node,
            type_name: content_type.name(),
        };
        match content_type {
            ContentType::Code => sequencer.code_content(attrs.string("code")?),
            ContentType::Emphasis => {
                sequencer.emphasis_content_begin(attrs.emphasis_level()?);
                walk_contents(attrs.array("contents")?, sequencer)?;
                sequencer.emphasis_content_end();
            }
            ContentType::Image => sequencer.image_content(
                attrs.string("uri")?,
                attrs.optional("title")?,
                attrs.optional("alternative")?,
            ),
            ContentType::LineBreak => sequencer.line_break_content(attrs.boolean("hard")?),
            ContentType::Link => {
                sequencer.link_content_begin(attrs.string("uri")?, attrs.optional("title")?);
                walk_contents(attrs.array("contents")?, sequencer)?;
                sequencer.link_content_end();
            }
            ContentType::Text => sequencer.text_content(attrs.string("text")?),
        }
    }
    Ok(())
}

/// Typed attribute access with error messages naming the node type.
struct Attributes<'a> {
    node: &'a Map<String, Value>,
    type_name: &'static str,
}

impl<'a> Attributes<'a> {
    fn missing(&self, key: &str) -> DispatchError {
        DispatchError::invalid(format!("{} node has no valid {key}.", self.type_name))
    }

    fn string(&self, key: &str) -> Result<&'a str> {
        self.node
            .get(key)
            .and_then(Value::as_str)
            .ok_or_else(|| self.missing(key))
    }

    fn optional(&self, key: &str) -> Result<Option<&'a str>> {
        match self.node.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(value)) => Ok(Some(value)),
            Some(_) => Err(self.missing(key)),
        }
    }

    fn array(&self, key: &str) -> Result<&'a Vec<Value>> {
        self.node
            .get(key)
            .and_then(Value::as_array)
            .ok_or_else(|| self.missing(key))
    }

    fn unsigned(&self, key: &str) -> Result<u64> {
        self.node
            .get(key)
            .and_then(Value::as_u64)
            .ok_or_else(|| self.missing(key))
    }

    fn boolean(&self, key: &str) -> Result<bool> {
        self.node
            .get(key)
            .and_then(Value::as_bool)
            .ok_or_else(|| self.missing(key))
    }

    fn heading_level(&self) -> Result<u8> {
        let level = self.unsigned("level")?;
        u8::try_from(level)
            .ok()
            .filter(|level| (1..=MAX_HEADING_LEVEL).contains(level))
            .ok_or_else(|| DispatchError::invalid(format!("heading level {level} is invalid.")))
    }

    fn emphasis_level(&self) -> Result<EmphasisLevel> {
        let level = self.unsigned("level")?;
        EmphasisLevel::from_level(level)
            .ok_or_else(|| DispatchError::invalid(format!("emphasis level {level} is invalid.")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::debug::DebugHandler;
    use crate::model::{Block, Content, Document, ModelBuilder};
    use serde_json::json;

    fn dispatch(value: Value) -> Result<Document> {
        ObjectDispatcher::new(value).dispatch_to(ModelBuilder::new())
    }

    fn message(value: Value) -> String {
        dispatch(value).unwrap_err().to_string()
    }

    #[test]
    fn walks_a_paragraph() {
        let doc = dispatch(json!({
            "version": {"major": 1, "minor": 0},
            "blocks": [{"type": "Paragraph", "contents": [{"type": "Text", "text": "Hi"}]}]
        }))
        .unwrap();
        assert_eq!(doc, Document::new(vec![Block::paragraph("Hi")]));
    }

    #[test]
    fn optional_attributes_default_to_absent() {
        let doc = dispatch(json!({
            "version": {"major": 1, "minor": 0},
            "blocks": [
                {"type": "Code", "code": "x"},
                {"type": "Paragraph", "contents": [
                    {"type": "Image", "uri": "a.png", "title": null},
                    {"type": "Link", "uri": "u", "title": "", "contents": []}
                ]}
            ]
        }))
        .unwrap();
        assert_eq!(
            doc.blocks,
            vec![
                Block::Code {
                    code: "x".into(),
                    hint: None
                },
                Block::Paragraph {
                    contents: vec![
                        Content::Image {
                            uri: "a.png".into(),
                            title: None,
                            alternative: None
                        },
                        Content::Link {
                            uri: "u".into(),
                            title: Some(String::new()),
                            contents: vec![]
                        },
                    ]
                }
            ]
        );
    }

    #[test]
    fn rejects_bad_roots() {
        assert_eq!(message(json!([])), "Markdom invalid: root node is no object.");
        assert_eq!(
            message(json!({"blocks": []})),
            "Markdom invalid: no document version specified."
        );
        assert_eq!(
            message(json!({"version": {"major": 1}, "blocks": []})),
            "Markdom invalid: no document valid version specified."
        );
        assert_eq!(
            message(json!({"version": {"major": 1, "minor": 1}, "blocks": []})),
            "Markdom invalid: version mismatch Expected version 1.0."
        );
    }

    #[test]
    fn version_is_checked_before_any_event() {
        let mut handler = DebugHandler::new();
        let result = ObjectDispatcher::new(json!({
            "version": {"major": 2, "minor": 0},
            "blocks": [{"type": "Division"}]
        }))
        .dispatch_to(&mut handler);
        assert!(matches!(result, Err(DispatchError::Invalid(_))));
        assert_eq!(handler.result(), "");
    }

    #[test]
    fn rejects_bad_nodes() {
        let doc = |blocks: Value| json!({"version": {"major": 1, "minor": 0}, "blocks": blocks});
        assert_eq!(
            message(doc(json!([1]))),
            "Markdom invalid: block node is no object."
        );
        assert_eq!(
            message(doc(json!([{}]))),
            "Markdom invalid: block node has no type."
        );
        assert_eq!(
            message(doc(json!([{"type": "Table"}]))),
            "Markdom invalid: block node type Table is invalid."
        );
        assert_eq!(
            message(doc(json!([{"type": "UnorderedList", "items": ["x"]}]))),
            "Markdom invalid: list item node is no object."
        );
        assert_eq!(
            message(doc(json!([{"type": "Paragraph", "contents": [null]}]))),
            "Markdom invalid: content node is no object."
        );
        assert_eq!(
            message(doc(json!([{"type": "Paragraph", "contents": [{"text": "a"}]}]))),
            "Markdom invalid: content node has no type."
        );
        assert_eq!(
            message(doc(json!([{"type": "Paragraph", "contents": [{"type": "Strike"}]}]))),
            "Markdom invalid: content node type Strike is invalid."
        );
        assert_eq!(
            message(doc(json!([{"type": "Code"}]))),
            "Markdom invalid: Code node has no valid code."
        );
        assert_eq!(
            message(doc(json!([{"type": "Heading", "level": 7, "contents": []}]))),
            "Markdom invalid: heading level 7 is invalid."
        );
    }
}
