//! Error code definitions for schema diagnostics
//!
//! Error codes follow a naming convention: E{category}{number}
//! - E01xx: Syntax errors (malformed schema text)
//! - E02xx: Semantic errors (well-formed text, invalid definitions)

use std::fmt;

/// Error codes for schema diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // E01xx: Syntax errors
    // =========================================================================
    /// Input does not start with `module <name> {`
    E0101,
    /// Module body is not closed with `}`
    E0102,
    /// Non-whitespace text after the closing `}`
    E0103,
    /// Residue in the module body that is not a type definition
    E0104,
    /// Sum type alternative without a constructor name
    E0105,
    /// Field list does not open with `(`
    E0106,
    /// Field list does not close with `)`
    E0107,
    /// Malformed or missing field in a field list
    E0108,

    // =========================================================================
    // E02xx: Semantic errors
    // =========================================================================
    /// Type name defined twice in one module
    E0201,
    /// Type definition reuses a built-in or reserved name
    E0202,
    /// Constructor name does not start with an uppercase letter
    E0203,
    /// Field name repeated in one field list, or shared with an attribute
    E0204,
}

impl ErrorCode {
    /// Get the string representation of the error code (e.g., "E0201")
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::E0101 => "E0101",
            Self::E0102 => "E0102",
            Self::E0103 => "E0103",
            Self::E0104 => "E0104",
            Self::E0105 => "E0105",
            Self::E0106 => "E0106",
            Self::E0107 => "E0107",
            Self::E0108 => "E0108",
            Self::E0201 => "E0201",
            Self::E0202 => "E0202",
            Self::E0203 => "E0203",
            Self::E0204 => "E0204",
        }
    }

    /// Get a short description of the error category
    pub fn category_description(&self) -> &'static str {
        if self.is_semantic() {
            "semantic error"
        } else {
            "syntax error"
        }
    }

    /// Get the default message for this error code
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::E0101 => "expected 'module <name> {'",
            Self::E0102 => "unclosed module body, expected '}'",
            Self::E0103 => "unexpected text after module",
            Self::E0104 => "expected type definition",
            Self::E0105 => "expected constructor name",
            Self::E0106 => "expected '('",
            Self::E0107 => "expected ')'",
            Self::E0108 => "expected field",
            Self::E0201 => "duplicate type name",
            Self::E0202 => "cannot redefine built-in or reserved type",
            Self::E0203 => "constructor name must start with an uppercase letter",
            Self::E0204 => "duplicate field name",
        }
    }

    pub fn is_semantic(&self) -> bool {
        matches!(
            self,
            Self::E0201 | Self::E0202 | Self::E0203 | Self::E0204
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
