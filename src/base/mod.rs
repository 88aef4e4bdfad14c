//! Foundation types for the astkit toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`Position`], [`Span`] - Line/column positions
//! - [`Location`] - The four optional location coordinates stored on nodes
//! - [`SymbolRef`] - Opaque symbol handles set by downstream consumers
//! - Identifier helpers shared by the schema parser and the generator
//!
//! This module has NO dependencies on other astkit modules.

pub mod ident;
mod position;
mod symbol;

pub use position::{Location, Position, Span};
pub use symbol::SymbolRef;

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
