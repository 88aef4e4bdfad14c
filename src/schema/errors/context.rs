//! Parse contexts used to wrap errors with where they occurred.

/// A schema construct an error can be attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseContext {
    /// The body of a `<name> = ...` definition
    TypeDefinition,
    /// A sum type constructor and its field list
    Constructor,
}

impl ParseContext {
    /// Get a human-readable prefix for error messages, completed by a name
    pub fn description(&self) -> &'static str {
        match self {
            Self::TypeDefinition => "in type definition of",
            Self::Constructor => "in constructor of",
        }
    }
}
