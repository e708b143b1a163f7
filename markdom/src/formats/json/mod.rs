//! JSON format implementation
//!
//! The JSON shape is the structured-object format: a `version` object and a `blocks`
//! array of `type`-tagged nodes. Parsing goes through `serde_json` into a generic value
//! walked by [`ObjectDispatcher`](crate::common::object::ObjectDispatcher); serializing
//! collects the model and writes it with `serde_json`.

mod parser;
mod serializer;

pub use parser::parse_json;
pub use serializer::JsonSerializer;

use crate::dispatcher::Dispatcher;
use crate::error::FormatError;
use crate::format::{Format, FormatOptions, Source};
use crate::model::ModelBuilder;
use std::collections::HashMap;

/// Format implementation for Markdom JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat;

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Markdom JSON document"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn option_keys(&self) -> &[&str] {
        &["pretty_print", "escape_unicode"]
    }

    fn source<'a>(&self, text: &'a str) -> Result<Source<'a>, FormatError> {
        Ok(Source::Object(parse_json(text)?))
    }

    fn render(
        &self,
        source: &Source<'_>,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let options = FormatOptions::new(self.name(), options, self.option_keys())?;
        let serializer = JsonSerializer::new()
            .with_pretty_print(options.flag("pretty_print", false)?)
            .with_escape_unicode(options.flag("escape_unicode", false)?);
        let doc = source.dispatch_to(ModelBuilder::new())?;
        serializer.serialize(&doc)
    }
}
