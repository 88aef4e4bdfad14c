//! Name-dispatched visitors and transformers.
//!
//! Dispatch is on the node's exact runtime type name. A handler registered
//! for a sum type name is never called for its constructors.

use std::fmt;

use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::trace;

use super::node::Node;
use super::value::Value;
use super::walk::iter_child_nodes;

/// Handler invoked by [`NodeVisitor::visit`] for one node type.
///
/// The node is only borrowed, so a visited tree is always left as it was.
/// Use a [`TransformFn`] to replace or delete nodes.
pub type VisitFn<V> = fn(&mut V, &dyn Node);

/// Handler invoked by [`NodeTransformer::visit`] for one node type.
///
/// Returning `None` deletes the node from its parent; returning a
/// [`Value::List`] splices the elements into a parent list.
pub type TransformFn<T> = fn(&mut T, Box<dyn Node>) -> Option<Value>;

/// Read-only visitor.
///
/// Implementors override [`NodeVisitor::handler`] to return a handler for
/// the type names they care about; every other node falls through to
/// [`NodeVisitor::generic_visit`], which visits the children. Visiting
/// returns nothing; results are collected in the visitor's own state.
pub trait NodeVisitor: Sized {
    fn handler(&self, _type_name: &str) -> Option<VisitFn<Self>> {
        None
    }

    fn visit(&mut self, node: &dyn Node) {
        match self.handler(node.type_name()) {
            Some(handler) => handler(self, node),
            None => self.generic_visit(node),
        }
    }

    fn generic_visit(&mut self, node: &dyn Node) {
        for child in iter_child_nodes(node) {
            self.visit(child);
        }
    }
}

/// Rewriting visitor. Takes ownership of each node it visits.
pub trait NodeTransformer: Sized {
    fn handler(&self, _type_name: &str) -> Option<TransformFn<Self>> {
        None
    }

    /// Transform `node`. The result replaces it in its parent.
    fn visit(&mut self, node: Box<dyn Node>) -> Option<Value> {
        match self.handler(node.type_name()) {
            Some(handler) => handler(self, node),
            None => Some(Value::Node(self.generic_visit(node))),
        }
    }

    /// Transform every child in place and return the node itself.
    ///
    /// In list slots a deleted element is dropped and a list result is
    /// spliced in. A single-node slot whose child is deleted becomes unset.
    fn generic_visit(&mut self, mut node: Box<dyn Node>) -> Box<dyn Node> {
        let names: Vec<SmolStr> = node
            .attributes()
            .iter()
            .chain(node.fields().iter())
            .map(SmolStr::new)
            .collect();

        for name in names {
            let previous = match node.base_mut().get_mut(&name) {
                Some(slot) => std::mem::replace(slot, Value::Null),
                None => continue,
            };
            match transform_value(self, previous) {
                Some(value) => {
                    node.base_mut().set(name, value);
                }
                None => {
                    trace!("[AST] {} lost child slot '{}'", node.type_name(), name);
                    node.base_mut().remove(&name);
                }
            }
        }
        node
    }
}

fn transform_value<T: NodeTransformer>(transformer: &mut T, value: Value) -> Option<Value> {
    match value {
        Value::Node(child) => transformer.visit(child),
        Value::List(items) => {
            let mut rewritten = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::Node(child) => match transformer.visit(child) {
                        None => {}
                        Some(Value::List(spliced)) => rewritten.extend(spliced),
                        Some(other) => rewritten.push(other),
                    },
                    other => rewritten.push(other),
                }
            }
            Some(Value::List(rewritten))
        }
        other => Some(other),
    }
}

/// A type-name to handler table, for visitors whose handlers are chosen at
/// runtime rather than in a `match`.
pub struct HandlerRegistry<F> {
    handlers: FxHashMap<SmolStr, F>,
}

impl<F: Copy> HandlerRegistry<F> {
    pub fn new() -> Self {
        Self {
            handlers: FxHashMap::default(),
        }
    }

    /// Builder form of [`HandlerRegistry::insert`].
    pub fn on(mut self, type_name: &str, handler: F) -> Self {
        self.insert(type_name, handler);
        self
    }

    pub fn insert(&mut self, type_name: &str, handler: F) -> Option<F> {
        self.handlers.insert(SmolStr::new(type_name), handler)
    }

    pub fn get(&self, type_name: &str) -> Option<F> {
        self.handlers.get(type_name).copied()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<F: Copy> Default for HandlerRegistry<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> fmt::Debug for HandlerRegistry<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.handlers.keys().map(SmolStr::as_str).collect();
        names.sort_unstable();
        f.debug_struct("HandlerRegistry").field("handlers", &names).finish()
    }
}
