//! Shared helpers and generators for the format tests.

use markdom::format::Format;
use markdom::formats::DebugFormat;
use markdom::types::EmphasisLevel;
use markdom::{Block, Content, Document, FormatRegistry, ListItem};
use proptest::collection::vec;
use proptest::option;
use proptest::prelude::*;
use std::collections::HashMap;

/// Convert with the default registry and no options.
pub fn convert(source: &str, from: &str, to: &str) -> String {
    FormatRegistry::with_defaults()
        .convert(source, from, to, &HashMap::new())
        .unwrap()
}

/// Debug trace of a document.
pub fn trace(doc: &Document) -> String {
    DebugFormat.serialize(doc).unwrap()
}

/// Number of trace lines for one event name.
pub fn count(trace: &str, event: &str) -> usize {
    trace
        .lines()
        .map(str::trim_start)
        .filter(|line| *line == event || line.starts_with(&format!("{event}:")))
        .count()
}

/// Body text that every text format can carry verbatim.
fn body() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 <>&\"'\n]{0,12}"
}

/// Attribute text (no line breaks, which XML attribute normalization would turn into spaces).
fn attribute() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 <>&\"'./:]{0,12}"
}

fn emphasis_level() -> impl Strategy<Value = EmphasisLevel> {
    prop_oneof![Just(EmphasisLevel::Light), Just(EmphasisLevel::Strong)]
}

pub fn arb_content() -> impl Strategy<Value = Content> {
    let leaf = prop_oneof![
        body().prop_map(|code| Content::Code { code }),
        (attribute(), option::of(attribute()), option::of(attribute())).prop_map(
            |(uri, title, alternative)| Content::Image {
                uri,
                title,
                alternative
            }
        ),
        any::<bool>().prop_map(|hard| Content::LineBreak { hard }),
        body().prop_map(Content::text),
    ];
    leaf.prop_recursive(3, 16, 4, |inner| {
        prop_oneof![
            (emphasis_level(), vec(inner.clone(), 0..4))
                .prop_map(|(level, contents)| Content::Emphasis { level, contents }),
            (attribute(), option::of(attribute()), vec(inner, 0..4)).prop_map(
                |(uri, title, contents)| Content::Link {
                    uri,
                    title,
                    contents
                }
            ),
        ]
    })
}

pub fn arb_block() -> impl Strategy<Value = Block> {
    let leaf = prop_oneof![
        (body(), option::of(attribute())).prop_map(|(code, hint)| Block::Code { code, hint }),
        body().prop_map(|comment| Block::Comment { comment }),
        Just(Block::Division),
        (1u8..=6, vec(arb_content(), 0..4))
            .prop_map(|(level, contents)| Block::Heading { level, contents }),
        vec(arb_content(), 0..4).prop_map(|contents| Block::Paragraph { contents }),
    ];
    leaf.prop_recursive(3, 24, 3, |inner| {
        let items = vec(vec(inner.clone(), 0..3).prop_map(|blocks| ListItem { blocks }), 0..3);
        prop_oneof![
            items.clone().prop_map(|items| Block::UnorderedList { items }),
            (0u64..1000, items)
                .prop_map(|(start_index, items)| Block::OrderedList { start_index, items }),
            vec(inner, 0..3).prop_map(|blocks| Block::Quote { blocks }),
        ]
    })
}

pub fn arb_document() -> impl Strategy<Value = Document> {
    vec(arb_block(), 0..5).prop_map(Document::new)
}

/// Options map from literal pairs.
pub fn options(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}
