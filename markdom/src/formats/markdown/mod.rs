//! Markdown format implementation
//!
//! This module implements bidirectional conversion between Markdom and CommonMark Markdown.
//!
//! # Library Choice
//!
//! We use the `comrak` crate for Markdown parsing. Serialization is hand written: the
//! output has to stay unambiguous for any text the model may hold, which needs the
//! escaping state kept by [`MarkdownHandler`].
//!
//! # Element Mapping Table
//!
//! | Markdom Element  | Markdown Equivalent        | Export Notes                          | Import Notes                          |
//! |------------------|----------------------------|---------------------------------------|---------------------------------------|
//! | Code             | Fenced code (```)          | Fence grows past inner backtick runs  | Fenced and indented, info → hint      |
//! | Comment          | `<!-- ... -->`             | Multi-line comments get own lines     | Comment HTML blocks only              |
//! | Division         | `---`                      | Also separates adjacent lists         | Thematic break                        |
//! | Heading          | `#` .. `######`            | ATX only                              | ATX and setext                        |
//! | UnorderedList    | `* item`                   | Marker on its own line                | Any bullet                            |
//! | OrderedList      | `N. item`                  | Counts up from start index            | Start index preserved                 |
//! | Paragraph        | Paragraph                  | Direct mapping                        | Direct mapping                        |
//! | Quote            | `> `                       | Prefix on every line                  | Direct mapping                        |
//! | Contents:        |                            |                                       |                                       |
//! |   Code           | `` `code` ``               | Backtick runs padded                  | Direct                                |
//! |   Emphasis       | `*light*`, `**strong**`    | Empty emphasis vanishes               | `_` and `*` forms                     |
//! |   Image          | `![alt](uri "title")`      | Direct                                | Alt text flattened to plain text      |
//! |   LineBreak      | Two trailing spaces / `\n` | Soft breaks become spaces in headings | Hard and soft breaks                  |
//! |   Link           | `[text](uri "title")`      | Empty link shows its uri              | Direct                                |
//! |   Text           | Plain text                 | Markup characters escaped             | Direct                                |
//!
//! # Lossy Conversions
//!
//! - Raw HTML blocks → one paragraph of tag-stripped text (see [`HtmlProcessor`])
//! - Inline HTML → dropped by the default processor
//! - Formatting inside image descriptions → plain alt text
//! - Whitespace runs in text → single spaces

mod delimiter;
mod html_processor;
mod parser;
mod plaintext;
mod serializer;

pub use html_processor::{HtmlProcessor, HtmlTextProcessor};
pub use parser::CommonmarkDispatcher;
pub use serializer::{
    MarkdownHandler, DEFAULT_ESCAPE_CHARACTERS, DEFAULT_ESCAPE_LINE_START_CHARACTERS,
};

use crate::dispatcher::Dispatcher;
use crate::error::FormatError;
use crate::format::{Format, FormatOptions, Source};
use std::collections::HashMap;

/// Format implementation for CommonMark Markdown
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "CommonMark Markdown"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn option_keys(&self) -> &[&str] {
        &[
            "handle_comments",
            "escape_characters",
            "escape_line_start_characters",
        ]
    }

    fn source<'a>(&self, text: &'a str) -> Result<Source<'a>, FormatError> {
        Ok(Source::Commonmark(CommonmarkDispatcher::new(text)))
    }

    fn render(
        &self,
        source: &Source<'_>,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let options = FormatOptions::new(self.name(), options, self.option_keys())?;
        let mut handler =
            MarkdownHandler::new().with_handle_comments(options.flag("handle_comments", true)?);
        if let Some(characters) = options.string("escape_characters") {
            handler = handler.with_escape_characters(characters);
        }
        if let Some(characters) = options.string("escape_line_start_characters") {
            handler = handler.with_escape_line_start_characters(characters);
        }
        Ok(source.dispatch_to(handler)?)
    }
}
