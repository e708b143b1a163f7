//! Debug trace format
//!
//! Renders one line per handler call, indented by container depth. It ignores the
//! meaning of the events and exists to make the full call sequence visible, which is
//! how dispatchers are checked against the event grammar.
//!
//! ## Example
//!
//! ```text
//! on_document_begin
//!     on_blocks_begin
//!         on_block_begin: Paragraph
//!             on_paragraph_block_begin
//!             on_contents_begin
//!                 on_content_begin: Text
//!                     on_text_content: Hi
//!                 on_content_end: Text
//!             on_contents_end
//!             on_paragraph_block_end
//!         on_block_end: Paragraph
//!     on_blocks_end
//! on_document_end
//! ```

mod serializer;

pub use serializer::DebugHandler;

use crate::dispatcher::Dispatcher;
use crate::error::FormatError;
use crate::format::{Format, FormatOptions, Source};
use std::collections::HashMap;

const OPTION_KEYS: &[&str] = &["handle_comments"];

/// Format implementation for the debug trace (serialization only)
#[derive(Debug, Clone, Copy, Default)]
pub struct DebugFormat;

impl Format for DebugFormat {
    fn name(&self) -> &str {
        "debug"
    }

    fn description(&self) -> &str {
        "Indented trace of every Markdom event"
    }

    fn file_extensions(&self) -> &[&str] {
        &["trace"]
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
        let options = FormatOptions::new(self.name(), options, OPTION_KEYS)?;
        let handler =
            DebugHandler::new().with_handle_comments(options.flag("handle_comments", true)?);
        Ok(source.dispatch_to(handler)?)
    }
}
