//! # Type Generator
//!
//! Turns a schema [`Module`] into Rust source declaring one node type per
//! product type, sum type and constructor.
//!
//! ```text
//! Module ──lower──► Vec<TypeDecl> ──RustEmitter──► String
//!                        │
//!                        └──────────NodeFactory──► DynNode
//! ```
//!
//! Generation is a pure function of the module and the options. Field types
//! that name other node types become `Box<dyn Node>` handles, so output for
//! a schema that references undefined names still compiles.

mod factory;
mod ir;
mod options;
mod rust;

use tracing::debug;

use crate::schema::{self, Module, SchemaError};

pub use factory::{FactoryError, NodeFactory};
pub use ir::{DeclKind, Multiplicity, Param, TypeDecl, TypeRef, lower};
pub use options::{GenerateOptions, Preamble};
pub use rust::RustEmitter;

/// Generate Rust source for `module` with default options.
pub fn generate(module: &Module) -> String {
    generate_with(module, &GenerateOptions::default())
}

pub fn generate_with(module: &Module, options: &GenerateOptions) -> String {
    let decls = lower(module);
    debug!(
        "[CODEGEN] generating module '{}' ({} declarations)",
        module.name,
        decls.len()
    );
    RustEmitter::new(options).emit_module(&module.name, &decls)
}

/// Parse schema text and generate Rust source from it.
///
/// A parse failure is returned as-is; nothing is generated.
pub fn compile(text: &str, options: &GenerateOptions) -> Result<String, SchemaError> {
    let module = schema::parse(text)?;
    Ok(generate_with(&module, options))
}
