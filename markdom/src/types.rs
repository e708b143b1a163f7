//! Node type tags shared by the event grammar and the typed model.
//!
//! The string names are part of the wire formats: they are the `type` values
//! of the structured-object format and the element names of the XML format.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a block node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockType {
    Code,
    Comment,
    Division,
    Heading,
    UnorderedList,
    OrderedList,
    Paragraph,
    Quote,
}

impl BlockType {
    pub const ALL: [BlockType; 8] = [
        BlockType::Code,
        BlockType::Comment,
        BlockType::Division,
        BlockType::Heading,
        BlockType::UnorderedList,
        BlockType::OrderedList,
        BlockType::Paragraph,
        BlockType::Quote,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BlockType::Code => "Code",
            BlockType::Comment => "Comment",
            BlockType::Division => "Division",
            BlockType::Heading => "Heading",
            BlockType::UnorderedList => "UnorderedList",
            BlockType::OrderedList => "OrderedList",
            BlockType::Paragraph => "Paragraph",
            BlockType::Quote => "Quote",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.name() == name)
    }

    pub fn is_list(self) -> bool {
        matches!(self, BlockType::UnorderedList | BlockType::OrderedList)
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kind of a content (inline) node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    Code,
    Emphasis,
    Image,
    LineBreak,
    Link,
    Text,
}

impl ContentType {
    pub const ALL: [ContentType; 6] = [
        ContentType::Code,
        ContentType::Emphasis,
        ContentType::Image,
        ContentType::LineBreak,
        ContentType::Link,
        ContentType::Text,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ContentType::Code => "Code",
            ContentType::Emphasis => "Emphasis",
            ContentType::Image => "Image",
            ContentType::LineBreak => "LineBreak",
            ContentType::Link => "Link",
            ContentType::Text => "Text",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.name() == name)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Strength of an emphasis span: level 1 is light (italic), level 2 is strong (bold).
///
/// Serialized as its numeric level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum EmphasisLevel {
    Light,
    Strong,
}

impl EmphasisLevel {
    pub fn level(self) -> u8 {
        match self {
            EmphasisLevel::Light => 1,
            EmphasisLevel::Strong => 2,
        }
    }

    pub fn from_level(level: u64) -> Option<Self> {
        match level {
            1 => Some(EmphasisLevel::Light),
            2 => Some(EmphasisLevel::Strong),
            _ => None,
        }
    }
}

impl From<EmphasisLevel> for u8 {
    fn from(level: EmphasisLevel) -> Self {
        level.level()
    }
}

impl TryFrom<u8> for EmphasisLevel {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::from_level(u64::from(level)).ok_or_else(|| format!("emphasis level {level} is invalid"))
    }
}

impl fmt::Display for EmphasisLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.level())
    }
}

/// Highest heading level a Markdom document may carry.
pub const MAX_HEADING_LEVEL: u8 = 6;
