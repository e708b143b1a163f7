//! Format implementations
//!
//! Each format pairs a dispatcher (text → events) with a handler (events → text), or
//! provides only one half of the pair.

pub mod debug;
pub mod html;
pub mod json;
pub mod markdown;
pub mod xml;
pub mod yaml;

pub use debug::DebugFormat;
pub use html::{HtmlFormat, XhtmlFormat};
pub use json::JsonFormat;
pub use markdown::MarkdownFormat;
pub use xml::XmlFormat;
pub use yaml::YamlFormat;
