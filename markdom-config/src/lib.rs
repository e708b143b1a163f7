//! Shared configuration loader for the markdom toolchain.
//!
//! `defaults/markdom.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`MarkdomConfig`].
//! [`MarkdomConfig::format_options`] turns a section into the string option map
//! accepted by `Format::render` and `Format::serialize_with_options`.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/markdom.default.toml");

/// Top-level configuration consumed by markdom applications.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkdomConfig {
    pub markdown: MarkdownConfig,
    pub html: HtmlConfig,
    pub json: JsonConfig,
    pub yaml: YamlConfig,
    pub xml: XmlConfig,
    pub debug: DebugConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarkdownConfig {
    pub handle_comments: bool,
    pub escape_characters: String,
    pub escape_line_start_characters: String,
}

/// Used by both the `html` and the `xhtml` target.
#[derive(Debug, Clone, Deserialize)]
pub struct HtmlConfig {
    pub handle_comments: bool,
    pub escape_html: bool,
    pub break_soft_breaks: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonConfig {
    pub pretty_print: bool,
    pub escape_unicode: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct YamlConfig {
    pub pretty_print: bool,
    pub word_wrap: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct XmlConfig {
    pub handle_comments: bool,
    pub pretty_print: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DebugConfig {
    pub handle_comments: bool,
}

fn options<const N: usize>(pairs: [(&str, String); N]) -> HashMap<String, String> {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

impl MarkdomConfig {
    /// Option map for a target format. Unknown formats get no options.
    pub fn format_options(&self, format: &str) -> HashMap<String, String> {
        match format {
            "markdown" => options([
                ("handle_comments", self.markdown.handle_comments.to_string()),
                ("escape_characters", self.markdown.escape_characters.clone()),
                (
                    "escape_line_start_characters",
                    self.markdown.escape_line_start_characters.clone(),
                ),
            ]),
            "html" | "xhtml" => options([
                ("handle_comments", self.html.handle_comments.to_string()),
                ("escape_html", self.html.escape_html.to_string()),
                ("break_soft_breaks", self.html.break_soft_breaks.to_string()),
            ]),
            "json" => options([
                ("pretty_print", self.json.pretty_print.to_string()),
                ("escape_unicode", self.json.escape_unicode.to_string()),
            ]),
            "yaml" => options([
                ("pretty_print", self.yaml.pretty_print.to_string()),
                ("word_wrap", self.yaml.word_wrap.to_string()),
            ]),
            "xml" => options([
                ("handle_comments", self.xml.handle_comments.to_string()),
                ("pretty_print", self.xml.pretty_print.to_string()),
            ]),
            "debug" => options([("handle_comments", self.debug.handle_comments.to_string())]),
            _ => HashMap::new(),
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override, e.g. `json.pretty_print`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<MarkdomConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<MarkdomConfig, ConfigError> {
    Loader::new().build()
}
