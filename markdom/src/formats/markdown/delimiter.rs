//! Deferred opening markers for the Markdown renderer.

/// An opening marker (`*`, `**`, `[`) that is only written once the span it opens
/// receives its first visible character. Until then it is uncommitted, and a span that
/// stays empty leaves no trace in the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiter {
    literal: &'static str,
    committed: bool,
}

impl Delimiter {
    pub fn new(literal: &'static str) -> Self {
        Self {
            literal,
            committed: false,
        }
    }

    /// A delimiter that never writes anything. Pushed by headings and paragraphs so
    /// every nesting depth owns a stack entry.
    pub fn nothing() -> Self {
        Self {
            literal: "",
            committed: true,
        }
    }

    pub fn literal(&self) -> &'static str {
        self.literal
    }

    pub fn is_committed(&self) -> bool {
        self.committed
    }

    /// Mark as written. Idempotent.
    pub fn commit(&mut self) {
        self.committed = true;
    }
}
