//! # AST Node Model
//!
//! Runtime support for node types generated from a schema.
//!
//! Every node implements [`Node`] by exposing a [`NodeBase`], which holds
//! the node's [`NodeKind`], its slot values, an optional [`SymbolRef`] and
//! its [`Location`]. Child nodes live in slots as `Box<dyn Node>`, so any
//! node may be stored in any slot.
//!
//! On top of that model this module provides:
//! - slot and child iteration ([`iter_fields`], [`iter_child_nodes`], [`walk`])
//! - name-dispatched [`NodeVisitor`] and [`NodeTransformer`]
//! - location helpers ([`get_source_segment`], [`fix_missing_locations`], ...)
//!
//! [`SymbolRef`]: crate::base::SymbolRef
//! [`Location`]: crate::base::Location

mod dynamic;
mod location;
mod node;
mod value;
mod visitor;
mod walk;

pub use dynamic::DynNode;
pub use location::{copy_location, fix_missing_locations, get_source_segment, increment_lineno};
pub use node::{Names, Node, NodeBase, NodeKind};
pub use value::{ChildNodes, Value};
pub use visitor::{HandlerRegistry, NodeTransformer, NodeVisitor, TransformFn, VisitFn};
pub use walk::{
    Walk, iter_attribs, iter_child_nodes, iter_child_nodes_mut, iter_fields, walk, walk_mut,
};
