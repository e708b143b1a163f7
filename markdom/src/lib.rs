//! Event based conversion between Markdom document representations
//!
//!     Markdom is a small document model (code, comments, divisions, headings, lists,
//!     paragraphs and quotes holding code, emphasis, images, line breaks, links and text).
//!     This crate reads it from CommonMark, JSON, YAML and XML, and writes it as Markdown,
//!     HTML, XHTML, JSON, YAML, XML or a debug trace.
//!
//! Architecture
//!
//!     There is no shared tree in the middle. Every source is a [`Dispatcher`]: it walks
//!     its own representation and calls a [`Handler`] once per event. Every target is a
//!     handler. Converting is therefore a single walk, source straight into target:
//!
//!         CommonMark AST ─┐                    ┌─ MarkdownHandler
//!         JSON / YAML    ─┤── Sequencer ─────>─┼─ HtmlHandler / XhtmlHandler
//!         Markdom XML    ─┤   (event grammar)  ├─ XmlHandler, DebugHandler
//!         model Document ─┘                    └─ ModelBuilder → JSON / YAML
//!
//!     Dispatchers never call handlers directly. They go through the [`Sequencer`],
//!     which emits the bracketing events (`blocks_begin`, `block_begin`, `contents_end`,
//!     ...) so that every handler sees the same well formed grammar no matter which
//!     source produced it.
//!
//!     The file structure :
//!     .
//!     ├── handler.rs              # Handler trait, the event grammar
//!     ├── dispatcher.rs           # Dispatcher trait
//!     ├── sequencer.rs            # Normalizing event sequencer
//!     ├── types.rs                # Block/content type names, emphasis levels
//!     ├── model                   # Typed Document, ModelBuilder, model dispatcher
//!     ├── common
//!     │   └── object.rs           # Structured object (JSON/YAML value) dispatcher
//!     ├── format.rs               # Format trait, Source
//!     ├── registry.rs             # FormatRegistry for discovery and conversion
//!     ├── formats
//!     │   ├── <format>
//!     │   │   ├── parser.rs       # Dispatcher for the format, when it has one
//!     │   │   ├── serializer.rs   # Handler for the format
//!     │   │   └── mod.rs          # Format implementation
//!     └── error.rs
//!
//! Testing
//!
//!     Unit tests live beside the code. Cross-format behaviour lives under tests/, one
//!     module per format, with insta snapshots for debug traces.
//!
//! Formats
//!
//!     | Format   | Parse | Serialize | Library                   |
//!     |----------|-------|-----------|---------------------------|
//!     | markdown | yes   | yes       | comrak (parse only)       |
//!     | html     |       | yes       | html-escape               |
//!     | xhtml    |       | yes       | html-escape               |
//!     | json     | yes   | yes       | serde_json                |
//!     | yaml     | yes   | yes       | serde_yaml                |
//!     | xml      | yes   | yes       | roxmltree / quick-xml     |
//!     | debug    |       | yes       |                           |
//!
//!     This is a pure lib: no code here assumes a shell environment (stdout, env vars).

pub mod common;
pub mod dispatcher;
pub mod error;
pub mod format;
pub mod formats;
pub mod handler;
pub mod model;
pub mod registry;
pub mod sequencer;
pub mod types;

pub use dispatcher::Dispatcher;
pub use error::{DispatchError, FormatError, NodeKind};
pub use format::{Format, FormatOptions, Source};
pub use handler::Handler;
pub use model::{Block, Content, Document, ListItem, ModelBuilder, Version};
pub use registry::FormatRegistry;
pub use sequencer::Sequencer;
pub use types::{BlockType, ContentType, EmphasisLevel};
