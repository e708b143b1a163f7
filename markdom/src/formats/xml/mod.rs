//! Markdom XML format implementation
//!
//! The XML form is the schema-bound rendition of the model: one element per node,
//! named after its type, rooted in a versioned `Document` element.
//!
//! # Library Choice
//!
//! `roxmltree` reads (read-only DOM, CDATA folded into text), `quick-xml` writes
//! (streaming writer with optional indentation).
//!
//! # Element Mapping Table
//!
//! | Markdom Element  | XML                                            |
//! |------------------|------------------------------------------------|
//! | Document         | `<Document version="1.0" xmlns="...">`         |
//! | Code             | `<Code hint="...">code</Code>`                 |
//! | Comment          | `<Comment>comment</Comment>`                   |
//! | Division         | `<Division/>`                                  |
//! | Heading          | `<Heading level="N">contents</Heading>`        |
//! | UnorderedList    | `<UnorderedList><ListItem>..</UnorderedList>`  |
//! | OrderedList      | `<OrderedList startIndex="N">..</OrderedList>` |
//! | Paragraph        | `<Paragraph>contents</Paragraph>`              |
//! | Quote            | `<Quote>blocks</Quote>`                        |
//! | Contents:        |                                                |
//! |   Code           | `<Code>code</Code>`                            |
//! |   Emphasis       | `<Emphasis level="1|2">`                       |
//! |   Image          | `<Image uri title alternative/>`               |
//! |   LineBreak      | `<LineBreak hard="true|false"/>`               |
//! |   Link           | `<Link uri title>contents</Link>`              |
//! |   Text           | `<Text>text</Text>`                            |

mod parser;
mod serializer;

pub use parser::XmlDispatcher;
pub use serializer::{XmlHandler, NAMESPACE};

use crate::dispatcher::Dispatcher;
use crate::error::FormatError;
use crate::format::{Format, FormatOptions, Source};
use std::collections::HashMap;

/// Format implementation for Markdom XML
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlFormat;

impl Format for XmlFormat {
    fn name(&self) -> &str {
        "xml"
    }

    fn description(&self) -> &str {
        "Markdom XML document"
    }

    fn file_extensions(&self) -> &[&str] {
        &["xml"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn option_keys(&self) -> &[&str] {
        &["handle_comments", "pretty_print"]
    }

    fn source<'a>(&self, text: &'a str) -> Result<Source<'a>, FormatError> {
        Ok(Source::Xml(XmlDispatcher::new(text)))
    }

    fn render(
        &self,
        source: &Source<'_>,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let options = FormatOptions::new(self.name(), options, self.option_keys())?;
        let handler = XmlHandler::new()
            .with_handle_comments(options.flag("handle_comments", true)?)
            .with_pretty_print(options.flag("pretty_print", false)?);
        source.dispatch_to(handler)?
    }
}
