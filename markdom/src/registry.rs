//! Format registry for format discovery and selection
//!
//! This module provides a centralized registry for all available formats.
//! Formats can be registered and retrieved by name, and any source format can be
//! converted into any target format without building an intermediate [`Document`].

use crate::error::FormatError;
use crate::format::Format;
use crate::model::Document;
use std::collections::HashMap;

/// Registry of document formats
///
/// # Examples
///
/// ```ignore
/// let registry = FormatRegistry::with_defaults();
/// let html = registry.convert("# Hi", "markdown", "html", &HashMap::new())?;
/// assert_eq!(html, "<h1>Hi</h1>");
/// ```
pub struct FormatRegistry {
    formats: HashMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formats: HashMap::new(),
        }
    }

    /// Register a format
    ///
    /// If a format with the same name already exists, it will be replaced.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    /// Get a format by name
    pub fn get(&self, name: &str) -> Result<&dyn Format, FormatError> {
        self.formats
            .get(name)
            .map(|f| f.as_ref())
            .ok_or_else(|| FormatError::FormatNotFound(name.to_string()))
    }

    /// Check if a format exists
    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formats.keys().cloned().collect();
        names.sort();
        names
    }

    /// All registered formats, sorted by name
    pub fn formats(&self) -> Vec<&dyn Format> {
        let mut formats: Vec<&dyn Format> = self.formats.values().map(|f| f.as_ref()).collect();
        formats.sort_by(|a, b| a.name().cmp(b.name()));
        formats
    }

    /// Detect format from filename based on file extension
    ///
    /// Returns the format name if a matching extension is found, or None otherwise.
    /// Extensions are compared case-insensitively.
    pub fn detect_format_from_filename(&self, filename: &str) -> Option<String> {
        let extension = std::path::Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())?
            .to_ascii_lowercase();

        self.formats()
            .into_iter()
            .find(|format| format.file_extensions().contains(&extension.as_str()))
            .map(|format| format.name().to_string())
    }

    fn source_format(&self, format: &str) -> Result<&dyn Format, FormatError> {
        let fmt = self.get(format)?;
        if !fmt.supports_parsing() {
            return Err(FormatError::NotSupported(format!(
                "Format '{format}' does not support parsing"
            )));
        }
        Ok(fmt)
    }

    fn target_format(&self, format: &str) -> Result<&dyn Format, FormatError> {
        let fmt = self.get(format)?;
        if !fmt.supports_serialization() {
            return Err(FormatError::NotSupported(format!(
                "Format '{format}' does not support serialization"
            )));
        }
        Ok(fmt)
    }

    /// Parse source text using the specified format
    pub fn parse(&self, source: &str, format: &str) -> Result<Document, FormatError> {
        self.source_format(format)?.parse(source)
    }

    /// Serialize a document using the specified format
    pub fn serialize(&self, doc: &Document, format: &str) -> Result<String, FormatError> {
        self.serialize_with_options(doc, format, &HashMap::new())
    }

    /// Serialize a document using the specified format and options
    pub fn serialize_with_options(
        &self,
        doc: &Document,
        format: &str,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        self.target_format(format)?
            .serialize_with_options(doc, options)
    }

    /// Convert text from one format into another.
    ///
    /// The source dispatcher drives the target handler directly; options belong to
    /// the target format.
    pub fn convert(
        &self,
        source: &str,
        from: &str,
        to: &str,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let source_format = self.source_format(from)?;
        let target_format = self.target_format(to)?;
        tracing::debug!(from, to, bytes = source.len(), "converting");
        let dispatcher = source_format.source(source)?;
        target_format.render(&dispatcher, options)
    }

    /// Create a registry with default formats
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(crate::formats::markdown::MarkdownFormat);
        registry.register(crate::formats::html::HtmlFormat);
        registry.register(crate::formats::html::XhtmlFormat);
        registry.register(crate::formats::json::JsonFormat);
        registry.register(crate::formats::yaml::YamlFormat);
        registry.register(crate::formats::xml::XmlFormat);
        registry.register(crate::formats::debug::DebugFormat);

        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
