//! Schema error type
//!
//! A [`SchemaError`] is either a leaf diagnostic (code, offset, message) or
//! a context wrapper around another error. Wrappers nest outermost first, so
//! an error inside a constructor's field list reads
//! `in type definition of 'stmt': in constructor of 'Expr': E0108: expected field`.

use smol_str::SmolStr;
use text_size::{TextRange, TextSize};
use thiserror::Error;

use super::codes::ErrorCode;
use super::context::ParseContext;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A leaf diagnostic at a byte offset into the schema text
    #[error("{code}: {message}")]
    Syntax {
        code: ErrorCode,
        message: String,
        offset: TextSize,
    },

    /// `source` happened while parsing the construct `name`
    #[error("{} '{name}'", .context.description())]
    Context {
        context: ParseContext,
        name: SmolStr,
        #[source]
        source: Box<SchemaError>,
    },
}

impl SchemaError {
    /// Create a leaf error with the code's default message
    pub fn new(code: ErrorCode, offset: TextSize) -> Self {
        Self::with_message(code, code.default_message(), offset)
    }

    pub fn with_message(code: ErrorCode, message: impl Into<String>, offset: TextSize) -> Self {
        Self::Syntax {
            code,
            message: message.into(),
            offset,
        }
    }

    /// Wrap this error in a context
    pub fn in_context(self, context: ParseContext, name: impl Into<SmolStr>) -> Self {
        Self::Context {
            context,
            name: name.into(),
            source: Box::new(self),
        }
    }

    /// The innermost (leaf) error
    pub fn root_cause(&self) -> &SchemaError {
        let mut current = self;
        while let Self::Context { source, .. } = current {
            current = source;
        }
        current
    }

    fn leaf(&self) -> (ErrorCode, TextSize) {
        let mut current = self;
        loop {
            match current {
                Self::Syntax { code, offset, .. } => return (*code, *offset),
                Self::Context { source, .. } => current = source,
            }
        }
    }

    /// Error code of the leaf diagnostic
    pub fn code(&self) -> ErrorCode {
        self.leaf().0
    }

    /// Byte offset of the leaf diagnostic
    pub fn offset(&self) -> TextSize {
        self.leaf().1
    }

    pub fn range(&self) -> TextRange {
        TextRange::empty(self.offset())
    }

    /// Contexts from outermost to innermost
    pub fn contexts(&self) -> Vec<(ParseContext, &str)> {
        let mut contexts = Vec::new();
        let mut current = self;
        while let Self::Context {
            context,
            name,
            source,
        } = current
        {
            contexts.push((*context, name.as_str()));
            current = source;
        }
        contexts
    }

    /// Every error in the chain, outermost first
    pub fn chain(&self) -> impl Iterator<Item = &SchemaError> {
        std::iter::successors(Some(self), |error| match error {
            Self::Context { source, .. } => Some(source.as_ref()),
            Self::Syntax { .. } => None,
        })
    }

    /// Render the full chain on one line, outermost first
    pub fn report(&self) -> String {
        self.chain()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(": ")
    }

    /// 1-based line and 0-based character column of the leaf offset
    pub fn line_col(&self, source: &str) -> (usize, usize) {
        let offset = usize::from(self.offset()).min(source.len());
        let before = source.get(..offset).unwrap_or(source);
        let line = before.matches('\n').count() + 1;
        let column = before
            .rsplit('\n')
            .next()
            .map_or(0, |last| last.chars().count());
        (line, column)
    }
}
