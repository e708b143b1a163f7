//! Format trait definition
//!
//! This module defines the Format trait that every format implementation provides.
//! A source format turns text into a [`Source`], a dispatcher ready to be walked. A
//! target format renders any [`Source`] with its handler. Conversions therefore stream
//! events straight from the source into the target handler; [`Format::parse`] and
//! [`Format::serialize`] are the same two halves with a [`Document`] in the middle.

use crate::common::object::ObjectDispatcher;
use crate::dispatcher::Dispatcher;
use crate::error::{DispatchError, FormatError};
use crate::formats::markdown::CommonmarkDispatcher;
use crate::formats::xml::XmlDispatcher;
use crate::handler::Handler;
use crate::model::{Document, ModelBuilder};
use std::collections::HashMap;

/// A parsed source of any format, dispatchable to any handler.
pub enum Source<'a> {
    Model(&'a Document),
    Commonmark(CommonmarkDispatcher),
    Object(ObjectDispatcher),
    Xml(XmlDispatcher),
}

impl Dispatcher for Source<'_> {
    fn dispatch_to<H: Handler>(&self, handler: H) -> Result<H::Output, DispatchError> {
        match self {
            Source::Model(document) => document.dispatch_to(handler),
            Source::Commonmark(dispatcher) => dispatcher.dispatch_to(handler),
            Source::Object(dispatcher) => dispatcher.dispatch_to(handler),
            Source::Xml(dispatcher) => dispatcher.dispatch_to(handler),
        }
    }
}

/// Trait for document formats
///
/// Formats can support parsing, serialization, or both.
///
/// # Examples
///
/// ```ignore
/// struct MyFormat;
///
/// impl Format for MyFormat {
///     fn name(&self) -> &str {
///         "my-format"
///     }
///
///     fn supports_serialization(&self) -> bool {
///         true
///     }
///
///     fn render(
///         &self,
///         source: &Source<'_>,
///         _options: &HashMap<String, String>,
///     ) -> Result<String, FormatError> {
///         Ok(source.dispatch_to(MyHandler::new())?)
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "markdown", "html")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format (e.g., ["md", "markdown"])
    ///
    /// Returns a slice of file extensions without the leading dot.
    /// Used for automatic format detection from filenames.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Whether this format supports parsing (source → Document)
    fn supports_parsing(&self) -> bool {
        false
    }

    /// Whether this format supports serialization (Document → source)
    fn supports_serialization(&self) -> bool {
        false
    }

    /// Option keys accepted by [`Format::render`].
    fn option_keys(&self) -> &[&str] {
        &[]
    }

    /// Read source text into a dispatchable [`Source`].
    ///
    /// Default implementation returns NotSupported error.
    fn source<'a>(&self, _text: &'a str) -> Result<Source<'a>, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Render a source with this format's handler, configured from string options
    /// (e.g. `pretty_print=true`).
    ///
    /// Default implementation returns NotSupported error. Formats that support
    /// serialization override this method and validate their options with
    /// [`FormatOptions`].
    fn render(
        &self,
        _source: &Source<'_>,
        _options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }

    /// Parse source text into a Document
    fn parse(&self, text: &str) -> Result<Document, FormatError> {
        Ok(self.source(text)?.dispatch_to(ModelBuilder::new())?)
    }

    /// Serialize a Document into target text with default options.
    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        self.serialize_with_options(doc, &HashMap::new())
    }

    /// Serialize a Document using string options.
    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        self.render(&Source::Model(doc), options)
    }
}

/// Typed view over the string options handed to a format.
#[derive(Debug, Clone, Copy)]
pub struct FormatOptions<'a> {
    format: &'a str,
    options: &'a HashMap<String, String>,
}

impl<'a> FormatOptions<'a> {
    /// Wrap `options`, rejecting any key outside `known`.
    pub fn new(
        format: &'a str,
        options: &'a HashMap<String, String>,
        known: &[&str],
    ) -> Result<Self, FormatError> {
        let mut unknown: Vec<&str> = options
            .keys()
            .map(String::as_str)
            .filter(|key| !known.contains(key))
            .collect();
        if !unknown.is_empty() {
            unknown.sort_unstable();
            return Err(FormatError::NotSupported(format!(
                "Format '{format}' does not support option(s): {}",
                unknown.join(", ")
            )));
        }
        Ok(Self { format, options })
    }

    /// Boolean option: `true`/`false`, `yes`/`no`, `on`/`off`, `1`/`0`, or empty for true.
    pub fn flag(&self, key: &str, default: bool) -> Result<bool, FormatError> {
        let Some(raw) = self.options.get(key) else {
            return Ok(default);
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "true" | "yes" | "on" | "1" => Ok(true),
            "false" | "no" | "off" | "0" => Ok(false),
            other => Err(FormatError::NotSupported(format!(
                "Format '{}' expects a boolean for '{key}', got '{other}'",
                self.format
            ))),
        }
    }

    /// String option.
    pub fn string(&self, key: &str) -> Option<&'a str> {
        self.options.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn parses_flags() {
        let raw = options(&[("a", "TRUE"), ("b", "off"), ("c", "")]);
        let opts = FormatOptions::new("test", &raw, &["a", "b", "c", "d"]).unwrap();
        assert!(opts.flag("a", false).unwrap());
        assert!(!opts.flag("b", true).unwrap());
        assert!(opts.flag("c", false).unwrap());
        assert!(opts.flag("d", true).unwrap());
    }

    #[test]
    fn rejects_unknown_keys_and_bad_values() {
        let raw = options(&[("zeta", "1"), ("alpha", "1")]);
        let err = FormatOptions::new("test", &raw, &[]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Operation not supported: Format 'test' does not support option(s): alpha, zeta"
        );

        let raw = options(&[("a", "maybe")]);
        let opts = FormatOptions::new("test", &raw, &["a"]).unwrap();
        assert!(opts.flag("a", false).is_err());
    }
}
