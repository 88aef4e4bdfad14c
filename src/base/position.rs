//! Position tracking for AST nodes
//!
//! Nodes carry their source location as four independent optional
//! coordinates. Lines are 1-based, columns are 0-based character offsets
//! within their line.

/// A fully known position in source code
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// A span between two fully known positions (end column inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Create a span from line/column coordinates
    pub fn from_coords(
        start_line: usize,
        start_col: usize,
        end_line: usize,
        end_col: usize,
    ) -> Self {
        Self {
            start: Position::new(start_line, start_col),
            end: Position::new(end_line, end_col),
        }
    }

    /// Check if a position falls within this span
    pub fn contains(&self, position: Position) -> bool {
        if position.line < self.start.line || position.line > self.end.line {
            return false;
        }
        if position.line == self.start.line && position.column < self.start.column {
            return false;
        }
        if position.line == self.end.line && position.column > self.end.column {
            return false;
        }
        true
    }
}

/// The location quadruple stored on every node.
///
/// Each coordinate is set or unset on its own. A partially set location is a
/// transient state that [`crate::ast::fix_missing_locations`] resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Location {
    pub lineno: Option<usize>,
    pub col_offset: Option<usize>,
    pub end_lineno: Option<usize>,
    pub end_col_offset: Option<usize>,
}

impl Location {
    /// A location with every coordinate set.
    pub fn new(lineno: usize, col_offset: usize, end_lineno: usize, end_col_offset: usize) -> Self {
        Self {
            lineno: Some(lineno),
            col_offset: Some(col_offset),
            end_lineno: Some(end_lineno),
            end_col_offset: Some(end_col_offset),
        }
    }

    /// A location with every coordinate unset.
    pub const fn unset() -> Self {
        Self {
            lineno: None,
            col_offset: None,
            end_lineno: None,
            end_col_offset: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.span().is_some()
    }

    pub fn is_unset(&self) -> bool {
        *self == Self::unset()
    }

    /// The span covered by this location, if all four coordinates are set.
    pub fn span(&self) -> Option<Span> {
        Some(Span::from_coords(
            self.lineno?,
            self.col_offset?,
            self.end_lineno?,
            self.end_col_offset?,
        ))
    }
}

impl From<Span> for Location {
    fn from(span: Span) -> Self {
        Self::new(span.start.line, span.start.column, span.end.line, span.end.column)
    }
}
