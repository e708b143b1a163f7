//! YAML serialization (Markdom document → YAML text)
//!
//! Block-style emitter over the document's JSON value tree. Mapping entries keep
//! their declaration order, sequence items of mappings start on the dash line, and
//! scalars are quoted by `serde_yaml` whenever plain style would change their meaning.

use crate::error::FormatError;
use crate::model::Document;
use serde_json::{Map, Value};

const WRAP_WIDTH: usize = 40;

#[derive(Debug, Clone, Copy, Default)]
pub struct YamlSerializer {
    pretty_print: bool,
    word_wrap: bool,
}

impl YamlSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indent nested nodes by four spaces instead of two.
    pub fn with_pretty_print(mut self, pretty_print: bool) -> Self {
        self.pretty_print = pretty_print;
        self
    }

    /// Fold long single-line text into `>-` block scalars.
    pub fn with_word_wrap(mut self, word_wrap: bool) -> Self {
        self.word_wrap = word_wrap;
        self
    }

    pub fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        let value =
            serde_json::to_value(doc).map_err(|e| FormatError::SerializationError(e.to_string()))?;
        let mut emitter = Emitter {
            step: if self.pretty_print { 4 } else { 2 },
            word_wrap: self.word_wrap,
            output: String::new(),
        };
        match &value {
            Value::Object(map) if !map.is_empty() => emitter.entries(map, 0, false)?,
            other => {
                let scalar = emitter.scalar(other, 0)?;
                emitter.output.push_str(&scalar);
                emitter.output.push('\n');
            }
        }
        Ok(emitter.output)
    }
}

struct Emitter {
    step: usize,
    word_wrap: bool,
    output: String,
}

impl Emitter {
    fn pad(&mut self, indent: usize) {
        self.output.extend(std::iter::repeat(' ').take(indent));
    }

    /// `inline_first`: the first key continues a `- ` already written.
    fn entries(
        &mut self,
        map: &Map<String, Value>,
        indent: usize,
        inline_first: bool,
    ) -> Result<(), FormatError> {
        for (position, (key, value)) in map.iter().enumerate() {
            if position > 0 || !inline_first {
                self.pad(indent);
            }
            let key = plain_or_quoted(key)?;
            self.output.push_str(&key);
            self.output.push(':');
            self.nested(value, indent + self.step)?;
        }
        Ok(())
    }

    fn items(&mut self, items: &[Value], indent: usize) -> Result<(), FormatError> {
        for item in items {
            self.pad(indent);
            self.output.push('-');
            match item {
                Value::Object(map) if !map.is_empty() => {
                    self.output.push(' ');
                    self.entries(map, indent + 2, true)?;
                }
                other => self.nested(other, indent + 2)?,
            }
        }
        Ok(())
    }

    /// Value after a `key:` or a bare `-`.
    fn nested(&mut self, value: &Value, indent: usize) -> Result<(), FormatError> {
        match value {
            Value::Object(map) if !map.is_empty() => {
                self.output.push('\n');
                self.entries(map, indent, false)
            }
            Value::Array(items) if !items.is_empty() => {
                self.output.push('\n');
                self.items(items, indent)
            }
            scalar => {
                let scalar = self.scalar(scalar, indent)?;
                self.output.push(' ');
                self.output.push_str(&scalar);
                self.output.push('\n');
                Ok(())
            }
        }
    }

    fn scalar(&self, value: &Value, indent: usize) -> Result<String, FormatError> {
        Ok(match value {
            Value::Null => "null".to_string(),
            Value::Bool(flag) => flag.to_string(),
            Value::Number(number) => number.to_string(),
            Value::String(text) if self.word_wrap && foldable(text) => {
                let padding = " ".repeat(indent);
                let mut folded = String::from(">-");
                for line in fold(text) {
                    folded.push('\n');
                    folded.push_str(&padding);
                    folded.push_str(&line);
                }
                folded
            }
            Value::String(text) => plain_or_quoted(text)?,
            Value::Array(_) => "[]".to_string(),
            Value::Object(_) => "{}".to_string(),
        })
    }
}

/// Single-line scalar as `serde_yaml` writes it, or a double-quoted one when it would
/// need a block scalar.
fn plain_or_quoted(text: &str) -> Result<String, FormatError> {
    let yaml =
        serde_yaml::to_string(text).map_err(|e| FormatError::SerializationError(e.to_string()))?;
    let yaml = yaml.trim_end_matches('\n');
    if yaml.contains('\n') {
        serde_json::to_string(text).map_err(|e| FormatError::SerializationError(e.to_string()))
    } else {
        Ok(yaml.to_string())
    }
}

/// Text that survives folding unchanged: long, one line, single spaces only.
///
/// YAML reads U+2028 and U+2029 as line breaks, so text holding them is never folded.
fn foldable(text: &str) -> bool {
    text.chars().count() > WRAP_WIDTH
        && text.contains(' ')
        && text.trim() == text
        && !text.contains("  ")
        && !text
            .chars()
            .any(|c| c.is_control() || matches!(c, '\u{2028}' | '\u{2029}'))
}

fn fold(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split(' ') {
        if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > WRAP_WIDTH {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    lines.push(line);
    lines
}
