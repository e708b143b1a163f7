//! JSON serialization (Markdom document → JSON text)

use crate::error::FormatError;
use crate::model::Document;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer {
    pretty_print: bool,
    escape_unicode: bool,
}

impl JsonSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indent nested values by four spaces.
    pub fn with_pretty_print(mut self, pretty_print: bool) -> Self {
        self.pretty_print = pretty_print;
        self
    }

    /// Write non-ASCII characters as `\uXXXX` escapes.
    pub fn with_escape_unicode(mut self, escape_unicode: bool) -> Self {
        self.escape_unicode = escape_unicode;
        self
    }

    pub fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        let json = if self.pretty_print {
            let mut buffer = Vec::new();
            let formatter = PrettyFormatter::with_indent(b"    ");
            let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
            doc.serialize(&mut serializer)
                .map_err(|e| FormatError::SerializationError(e.to_string()))?;
            String::from_utf8(buffer).map_err(|e| FormatError::SerializationError(e.to_string()))?
        } else {
            serde_json::to_string(doc).map_err(|e| FormatError::SerializationError(e.to_string()))?
        };
        Ok(if self.escape_unicode {
            escape_non_ascii(&json)
        } else {
            json
        })
    }
}

/// Non-ASCII characters only occur inside JSON strings, where `\uXXXX` is always valid.
fn escape_non_ascii(json: &str) -> String {
    let mut escaped = String::with_capacity(json.len());
    for character in json.chars() {
        if character.is_ascii() {
            escaped.push(character);
        } else {
            let mut units = [0u16; 2];
            for unit in character.encode_utf16(&mut units) {
                escaped.push_str(&format!("\\u{unit:04x}"));
            }
        }
    }
    escaped
}
