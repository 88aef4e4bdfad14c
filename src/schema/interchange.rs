//! JSON interchange for the schema model.
//!
//! ```json
//! {
//!   "name": "M",
//!   "typedefs": [
//!     {
//!       "name": "stmt",
//!       "ty": {
//!         "kind": "sum",
//!         "constructors": [{ "name": "Pass", "fields": [] }],
//!         "attributes": [{ "type_name": "int", "name": "lineno" }]
//!       }
//!     }
//!   ]
//! }
//! ```
//!
//! Loading re-checks the rules the parser enforces, so a loaded module is
//! indistinguishable from a parsed one.

use rustc_hash::FxHashSet;
use thiserror::Error;
use tracing::debug;

use super::{AbstractType, Field, Module, is_reserved};
use crate::base::ident::starts_uppercase;

/// Errors that can occur while exchanging schema modules.
#[derive(Debug, Error)]
pub enum InterchangeError {
    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// IO error during read/write.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Well-formed JSON describing an invalid module.
    #[error("Validation error: {0}")]
    Validation(String),
}

impl InterchangeError {
    pub fn json(message: impl Into<String>) -> Self {
        Self::Json(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// Serialize a module as pretty-printed JSON.
pub fn to_json(module: &Module) -> Result<String, InterchangeError> {
    serde_json::to_string_pretty(module)
        .map_err(|e| InterchangeError::json(format!("Serialization error: {e}")))
}

/// Deserialize and validate a module.
pub fn from_json(input: &str) -> Result<Module, InterchangeError> {
    let module: Module = serde_json::from_str(input)
        .map_err(|e| InterchangeError::json(format!("Parse error: {e}")))?;
    validate(&module)?;
    debug!(
        "[SCHEMA] loaded module '{}' with {} type definitions",
        module.name,
        module.typedefs.len()
    );
    Ok(module)
}

/// Read a module from a JSON file.
pub fn read_file(path: impl AsRef<std::path::Path>) -> Result<Module, InterchangeError> {
    let text = std::fs::read_to_string(path)?;
    from_json(&text)
}

/// Write a module to a JSON file.
pub fn write_file(module: &Module, path: impl AsRef<std::path::Path>) -> Result<(), InterchangeError> {
    std::fs::write(path, to_json(module)?)?;
    Ok(())
}

/// Name of the first field that repeats a name in `seen` or in itself.
fn repeated_field<'f>(seen: &[Field], fields: &'f [Field]) -> Option<&'f str> {
    fields.iter().enumerate().find_map(|(index, field)| {
        seen.iter()
            .chain(&fields[..index])
            .any(|other| other.name == field.name)
            .then_some(field.name.as_str())
    })
}

/// Check the invariants the schema parser guarantees.
pub fn validate(module: &Module) -> Result<(), InterchangeError> {
    let mut defined = FxHashSet::default();
    for typedef in &module.typedefs {
        if !defined.insert(typedef.name.as_str()) {
            return Err(InterchangeError::validation(format!(
                "cannot define type '{}' twice",
                typedef.name
            )));
        }
        if is_reserved(&typedef.name) {
            return Err(InterchangeError::validation(format!(
                "cannot redefine built-in or reserved type '{}'",
                typedef.name
            )));
        }
        let duplicate = match &typedef.ty {
            AbstractType::Product(product) => repeated_field(&[], &product.fields),
            AbstractType::Sum(sum) => repeated_field(&[], &sum.attributes).or_else(|| {
                sum.constructors
                    .iter()
                    .find_map(|ctor| repeated_field(&sum.attributes, &ctor.fields))
            }),
        };
        if let Some(field) = duplicate {
            return Err(InterchangeError::validation(format!(
                "field '{field}' declared twice in type '{}'",
                typedef.name
            )));
        }
        if let AbstractType::Sum(sum) = &typedef.ty {
            if sum.constructors.is_empty() {
                return Err(InterchangeError::validation(format!(
                    "sum type '{}' has no constructors",
                    typedef.name
                )));
            }
            if let Some(ctor) = sum
                .constructors
                .iter()
                .find(|ctor| !starts_uppercase(&ctor.name))
            {
                return Err(InterchangeError::validation(format!(
                    "constructor name '{}' must start with an uppercase letter",
                    ctor.name
                )));
            }
        }
    }
    Ok(())
}
