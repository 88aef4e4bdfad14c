//! Schema error handling module
//!
//! - Categorized error codes for filtering and documentation
//! - Context wrappers naming the type definition or constructor being parsed
//! - Byte offsets into the schema text for every leaf diagnostic

mod codes;
mod context;
mod error;

pub use codes::ErrorCode;
pub use context::ParseContext;
pub use error::SchemaError;
