//! Typed Markdom document model
//!
//!     The model is an ordered tree with two node universes: blocks (siblings under the
//!     document, a quote or a list item) and contents (siblings inside a paragraph,
//!     heading, emphasis or link). Ownership is exclusive and top-down.
//!
//!     The serde shape of these types is the structured-object format itself: `type`
//!     tags, camel case field names, and optional fields written as `null` so that an
//!     absent title stays distinguishable from an empty one.
//!
//!     Handlers never hold a model while rendering. The model exists for callers that
//!     want a frozen tree: [`ModelBuilder`] collects one from any event stream, and a
//!     [`Document`] is itself a [`crate::dispatcher::Dispatcher`] that replays it.

mod builder;
mod walk;

pub use builder::ModelBuilder;
pub(crate) use walk::{walk_blocks, walk_contents};

use crate::types::EmphasisLevel;
use serde::{Deserialize, Serialize};

/// Schema version every Markdom document carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
}

impl Version {
    pub const CURRENT: Version = Version { major: 1, minor: 0 };
}

impl Default for Version {
    fn default() -> Self {
        Self::CURRENT
    }
}

/// Root of a Markdom tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub version: Version,
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self {
            version: Version::CURRENT,
            blocks,
        }
    }
}

/// Block level node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Block {
    Code {
        code: String,
        hint: Option<String>,
    },
    Comment {
        comment: String,
    },
    Division,
    Heading {
        level: u8,
        contents: Vec<Content>,
    },
    UnorderedList {
        items: Vec<ListItem>,
    },
    #[serde(rename_all = "camelCase")]
    OrderedList {
        start_index: u64,
        items: Vec<ListItem>,
    },
    Paragraph {
        contents: Vec<Content>,
    },
    Quote {
        blocks: Vec<Block>,
    },
}

/// Entry of an ordered or unordered list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    pub blocks: Vec<Block>,
}

/// Inline node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Content {
    Code {
        code: String,
    },
    Emphasis {
        level: EmphasisLevel,
        contents: Vec<Content>,
    },
    Image {
        uri: String,
        title: Option<String>,
        alternative: Option<String>,
    },
    LineBreak {
        hard: bool,
    },
    Link {
        uri: String,
        title: Option<String>,
        contents: Vec<Content>,
    },
    Text {
        text: String,
    },
}

impl Content {
    pub fn text(text: impl Into<String>) -> Self {
        Content::Text { text: text.into() }
    }
}

impl Block {
    /// A paragraph holding a single text run.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph {
            contents: vec![Content::text(text)],
        }
    }
}
