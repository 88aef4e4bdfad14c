//! Generation options

use std::io;
use std::path::Path;

/// Text placed before the generated declarations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Preamble {
    /// A short `@generated` header naming the runtime crate
    #[default]
    Default,
    /// Nothing
    None,
    /// Caller-provided text, emitted verbatim
    Custom(String),
}

/// Options for the Rust emitter
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Path under which the runtime crate is reachable from generated code
    pub runtime_path: String,
    pub preamble: Preamble,
    /// Emit doc comments on generated items
    pub emit_docs: bool,
    /// Number of spaces per indentation level (or tab width if using tabs)
    pub tab_size: usize,
    /// Use spaces for indentation (false = use tabs)
    pub insert_spaces: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            runtime_path: "::astkit".to_string(),
            preamble: Preamble::Default,
            emit_docs: true,
            tab_size: 4,
            insert_spaces: true,
        }
    }
}

impl GenerateOptions {
    /// Generate indentation string for the given level
    pub fn indent(&self, level: usize) -> String {
        if self.insert_spaces {
            " ".repeat(self.tab_size * level)
        } else {
            "\t".repeat(level)
        }
    }

    pub fn with_runtime_path(mut self, path: impl Into<String>) -> Self {
        self.runtime_path = path.into();
        self
    }

    pub fn with_preamble(mut self, text: impl Into<String>) -> Self {
        self.preamble = Preamble::Custom(text.into());
        self
    }

    pub fn without_preamble(mut self) -> Self {
        self.preamble = Preamble::None;
        self
    }

    /// Use the contents of a file as the preamble.
    pub fn with_preamble_file(self, path: impl AsRef<Path>) -> io::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(self.with_preamble(text))
    }

    pub fn with_docs(mut self, emit_docs: bool) -> Self {
        self.emit_docs = emit_docs;
        self
    }

    pub fn with_indent(mut self, tab_size: usize, insert_spaces: bool) -> Self {
        self.tab_size = tab_size;
        self.insert_spaces = insert_spaces;
        self
    }
}
