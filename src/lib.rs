//! # astkit-base
//!
//! Schema-driven AST toolkit: a parser for a small ASDL-style schema
//! language, a generator that turns schemas into Rust node types, and the
//! runtime those node types plug into (generic traversal, visitors,
//! transformers and location utilities).
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! codegen   → Lowering to declarations, Rust emitter, runtime node factory
//!   ↓
//! schema    → Schema model, recursive-descent parser, diagnostics
//!   ↓
//! ast       → Node trait, slot values, walk, visitor/transformer, locations
//!   ↓
//! base      → Primitives (Location, Span, SymbolRef, identifier helpers)
//! ```
//!
//! ## Example
//!
//! ```
//! use astkit::codegen::{GenerateOptions, compile};
//!
//! let source = compile(
//!     "module M { stmt = Expr(int value) | Pass attributes (int lineno) }",
//!     &GenerateOptions::default(),
//! )
//! .unwrap();
//! assert!(source.contains("pub struct Expr {"));
//! ```

// ============================================================================
// MODULES (dependency order: base → ast → schema → codegen)
// ============================================================================

/// Foundation types: Location, Span, SymbolRef, identifier helpers
pub mod base;

/// Node model and generic algorithms over nodes
pub mod ast;

/// Schema model, parser and diagnostics
pub mod schema;

/// Type generation from schemas
pub mod codegen;

// Re-export commonly needed items
pub use ast::{Node, NodeBase, NodeKind, Value};
pub use base::{Location, SymbolRef, TextRange, TextSize};

/// Generated code names identifier slots with this type.
pub use smol_str::SmolStr;
