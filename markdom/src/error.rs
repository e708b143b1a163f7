//! Error types for dispatch and format operations

use thiserror::Error;

/// Errors raised while walking a source representation.
///
/// Every variant is fatal: the walk unwinds and any partial handler output is
/// meant to be discarded by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The source violates the Markdom document shape (version, node types,
    /// required attributes).
    #[error("Markdom invalid: {0}")]
    Invalid(String),

    /// The CommonMark tree contains a node kind outside the Markdom taxonomy.
    #[error("{kind} node {name} is unknown")]
    UnknownNode { kind: NodeKind, name: String },

    /// The underlying JSON, YAML or XML library rejected the input text.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DispatchError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        DispatchError::Invalid(message.into())
    }
}

/// Coarse classification of a source node, used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Block,
    Inline,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKind::Block => f.write_str("Block"),
            NodeKind::Inline => f.write_str("Inline"),
        }
    }
}

/// Errors that can occur during format operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),

    /// The source could not be turned into a Markdom event stream
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// Error during serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Format does not support the requested operation or option
    #[error("Operation not supported: {0}")]
    NotSupported(String),
}
