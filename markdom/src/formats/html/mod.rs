//! HTML and XHTML format implementation
//!
//! Serialization only: Markdom renders to an HTML body fragment.
//!
//! # Library Choice
//!
//! Markup is written directly from a tag table ([`tags`]); the `html-escape` crate
//! escapes text, code and attribute values.
//!
//! # Element Mapping Table
//!
//! | Markdom Element  | HTML                                   | Notes                                  |
//! |------------------|----------------------------------------|----------------------------------------|
//! | Code             | `<pre><code class="hint">`             | Hint omitted when absent               |
//! | Comment          | `<!-- comment -->`                     | Skipped without `handle_comments`      |
//! | Division         | `<hr>` / `<hr />`                      |                                        |
//! | Heading          | `<h1>` .. `<h6>`                       |                                        |
//! | UnorderedList    | `<ul>`                                 |                                        |
//! | OrderedList      | `<ol start="N">`                       | Start always written                   |
//! | Paragraph        | `<p>`                                  |                                        |
//! | Quote            | `<blockquote>`                         |                                        |
//! | Contents:        |                                        |                                        |
//! |   Code           | `<code>`                               |                                        |
//! |   Emphasis       | `<em>` / `<strong>`                    |                                        |
//! |   Image          | `<img src title alt>`                  | Empty attributes omitted               |
//! |   LineBreak      | `<br>` (hard) / newline (soft)         | `break_soft_breaks` forces `<br>`      |
//! |   Link           | `<a href title>`                       |                                        |
//! |   Text           | Escaped text                           | `escape_html` toggles escaping         |

mod serializer;
pub mod tags;

pub use serializer::{HtmlHandler, XhtmlHandler};

use crate::dispatcher::Dispatcher;
use crate::error::FormatError;
use crate::format::{Format, FormatOptions, Source};
use std::collections::HashMap;
use tags::TagBuilder;

const OPTION_KEYS: &[&str] = &["handle_comments", "escape_html", "break_soft_breaks"];

fn render_with<T: TagBuilder>(
    handler: HtmlHandler<T>,
    format: &str,
    source: &Source<'_>,
    options: &HashMap<String, String>,
) -> Result<String, FormatError> {
    let options = FormatOptions::new(format, options, OPTION_KEYS)?;
    let handler = handler
        .with_handle_comments(options.flag("handle_comments", true)?)
        .with_escape_html(options.flag("escape_html", true)?)
        .with_break_soft_breaks(options.flag("break_soft_breaks", false)?);
    Ok(source.dispatch_to(handler)?)
}

/// Format implementation for HTML fragments
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlFormat;

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "HTML fragment"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn option_keys(&self) -> &[&str] {
        OPTION_KEYS
    }

    fn render(
        &self,
        source: &Source<'_>,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        render_with(HtmlHandler::new(), self.name(), source, options)
    }
}

/// Format implementation for XHTML fragments
#[derive(Debug, Clone, Copy, Default)]
pub struct XhtmlFormat;

impl Format for XhtmlFormat {
    fn name(&self) -> &str {
        "xhtml"
    }

    fn description(&self) -> &str {
        "XHTML fragment"
    }

    fn file_extensions(&self) -> &[&str] {
        &["xhtml"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn option_keys(&self) -> &[&str] {
        OPTION_KEYS
    }

    fn render(
        &self,
        source: &Source<'_>,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        render_with(XhtmlHandler::xhtml(), self.name(), source, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, Document};

    #[test]
    fn html_is_serialization_only() {
        assert!(HtmlFormat.parse("<p>x</p>").is_err());
        let doc = Document::new(vec![Block::Division]);
        assert_eq!(HtmlFormat.serialize(&doc).unwrap(), "<hr>");
        assert_eq!(XhtmlFormat.serialize(&doc).unwrap(), "<hr />");
    }

    #[test]
    fn options_reach_the_handler() {
        let doc = Document::new(vec![Block::paragraph("<b>")]);
        let options = HashMap::from([("escape_html".to_string(), "false".to_string())]);
        let out = HtmlFormat.serialize_with_options(&doc, &options).unwrap();
        assert_eq!(out, "<p><b></p>");
    }
}
