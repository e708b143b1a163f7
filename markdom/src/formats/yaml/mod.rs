//! YAML format implementation
//!
//! Same tree as the JSON format. `serde_yaml` reads YAML into a generic value for the
//! structured-object dispatcher; output comes from a small block-style emitter so that
//! indentation width and folding can be controlled.

mod parser;
mod serializer;

pub use parser::parse_yaml;
pub use serializer::YamlSerializer;

use crate::dispatcher::Dispatcher;
use crate::error::FormatError;
use crate::format::{Format, FormatOptions, Source};
use crate::model::ModelBuilder;
use std::collections::HashMap;

/// Format implementation for Markdom YAML
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlFormat;

impl Format for YamlFormat {
    fn name(&self) -> &str {
        "yaml"
    }

    fn description(&self) -> &str {
        "Markdom YAML document"
    }

    fn file_extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn option_keys(&self) -> &[&str] {
        &["pretty_print", "word_wrap"]
    }

    fn source<'a>(&self, text: &'a str) -> Result<Source<'a>, FormatError> {
        Ok(Source::Object(parse_yaml(text)?))
    }

    fn render(
        &self,
        source: &Source<'_>,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let options = FormatOptions::new(self.name(), options, self.option_keys())?;
        let serializer = YamlSerializer::new()
            .with_pretty_print(options.flag("pretty_print", false)?)
            .with_word_wrap(options.flag("word_wrap", false)?);
        let doc = source.dispatch_to(ModelBuilder::new())?;
        serializer.serialize(&doc)
    }
}
