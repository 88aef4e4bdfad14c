//! # Schema
//!
//! The schema language describes a family of tree node types:
//!
//! ```text
//! module Calc {
//!     -- comments run to the end of the line
//!     expr = Num(int n)
//!          | BinOp(expr left, ident op, expr right)
//!          attributes (int lineno, int col_offset)
//!     pos = (int line, int column)
//! }
//! ```
//!
//! A definition whose body starts with `(` is a product type (one record);
//! anything else is a sum type (a set of constructors sharing attributes).
//! Field types are either built-ins (see [`Builtin`]) or names of other
//! definitions. Names are not checked for existence.
//!
//! [`parse`] turns schema text into a [`Module`]; values of the model are
//! immutable after parsing and compare structurally.

pub mod errors;
#[cfg(feature = "interchange")]
pub mod interchange;
mod parser;

use smol_str::SmolStr;

#[cfg(feature = "interchange")]
use serde::{Deserialize, Serialize};

pub use errors::{ErrorCode, ParseContext, SchemaError};
pub use parser::parse;

/// Names that no type definition may use besides the built-ins.
pub const RESERVED_NAMES: &[&str] = &["Node"];

/// Whether `name` is a built-in type name or otherwise reserved.
pub fn is_reserved(name: &str) -> bool {
    Builtin::from_name(name).is_some() || RESERVED_NAMES.contains(&name)
}

// ============================================================================
// MODEL
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "interchange", derive(Serialize, Deserialize))]
pub struct Module {
    pub name: SmolStr,
    pub typedefs: Vec<TypeDef>,
}

impl Module {
    pub fn new(name: impl Into<SmolStr>, typedefs: Vec<TypeDef>) -> Self {
        Self {
            name: name.into(),
            typedefs,
        }
    }

    pub fn get(&self, name: &str) -> Option<&TypeDef> {
        self.typedefs.iter().find(|typedef| typedef.name == name)
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.typedefs.iter().map(|typedef| typedef.name.as_str())
    }

    /// Find the sum type a constructor belongs to, with the constructor.
    pub fn constructor(&self, name: &str) -> Option<(&TypeDef, &Constructor)> {
        self.typedefs.iter().find_map(|typedef| match &typedef.ty {
            AbstractType::Sum(sum) => sum
                .constructors
                .iter()
                .find(|ctor| ctor.name == name)
                .map(|ctor| (typedef, ctor)),
            AbstractType::Product(_) => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "interchange", derive(Serialize, Deserialize))]
pub struct TypeDef {
    pub name: SmolStr,
    pub ty: AbstractType,
}

impl TypeDef {
    pub fn new(name: impl Into<SmolStr>, ty: AbstractType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "interchange", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "interchange", serde(tag = "kind", rename_all = "lowercase"))]
pub enum AbstractType {
    Product(ProductType),
    Sum(SumType),
}

/// A single record type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "interchange", derive(Serialize, Deserialize))]
pub struct ProductType {
    pub fields: Vec<Field>,
}

/// A set of constructors plus attributes shared by all of them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "interchange", derive(Serialize, Deserialize))]
pub struct SumType {
    pub constructors: Vec<Constructor>,
    pub attributes: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "interchange", derive(Serialize, Deserialize))]
pub struct Constructor {
    pub name: SmolStr,
    pub fields: Vec<Field>,
}

impl Constructor {
    pub fn new(name: impl Into<SmolStr>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }
}

/// A named, typed slot.
///
/// | suffix | `can_none` | `can_many` |
/// |--------|------------|------------|
/// | none   | false      | false      |
/// | `?`    | true       | false      |
/// | `*`    | true       | true       |
/// | `+`    | false      | true       |
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "interchange", derive(Serialize, Deserialize))]
pub struct Field {
    pub type_name: SmolStr,
    pub name: SmolStr,
    #[cfg_attr(feature = "interchange", serde(default))]
    pub can_none: bool,
    #[cfg_attr(feature = "interchange", serde(default))]
    pub can_many: bool,
}

impl Field {
    pub fn new(type_name: impl Into<SmolStr>, name: impl Into<SmolStr>) -> Self {
        Self {
            type_name: type_name.into(),
            name: name.into(),
            can_none: false,
            can_many: false,
        }
    }

    /// Apply a multiplicity suffix (`?`, `*` or `+`). Other characters are
    /// ignored.
    pub fn with_suffix(mut self, suffix: char) -> Self {
        self.can_none = matches!(suffix, '?' | '*');
        self.can_many = matches!(suffix, '*' | '+');
        self
    }

    /// The suffix this field was declared with, if any.
    pub fn suffix(&self) -> Option<char> {
        match (self.can_none, self.can_many) {
            (false, false) => None,
            (true, false) => Some('?'),
            (true, true) => Some('*'),
            (false, true) => Some('+'),
        }
    }

    pub fn builtin(&self) -> Option<Builtin> {
        Builtin::from_name(&self.type_name)
    }
}

// ============================================================================
// BUILT-IN TYPES
// ============================================================================

/// Primitive field types known to every schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    /// `ident`
    Ident,
    /// `int` or `char`
    Int,
    /// `string` or `str`
    String,
    /// `boolean` or `bool`
    Bool,
    /// `float`
    Float,
}

impl Builtin {
    /// Every accepted spelling, aliases included.
    pub const NAMES: &'static [&'static str] = &[
        "ident", "int", "char", "string", "str", "boolean", "bool", "float",
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ident" => Some(Self::Ident),
            "int" | "char" => Some(Self::Int),
            "string" | "str" => Some(Self::String),
            "boolean" | "bool" => Some(Self::Bool),
            "float" => Some(Self::Float),
            _ => None,
        }
    }

    /// Canonical schema spelling.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ident => "ident",
            Self::Int => "int",
            Self::String => "string",
            Self::Bool => "bool",
            Self::Float => "float",
        }
    }
}
