//! Nodes whose kind is only known at runtime.

use std::any::Any;
use std::sync::Arc;

use smol_str::SmolStr;

use super::node::{Node, NodeBase, NodeKind};
use super::value::Value;

/// A node built from a runtime [`NodeKind`] rather than a generated struct.
///
/// Behaves like any generated node for traversal, visiting and location
/// utilities. Instances are normally produced by
/// [`crate::codegen::NodeFactory`].
#[derive(Debug)]
pub struct DynNode {
    base: NodeBase,
}

impl DynNode {
    pub fn new(kind: Arc<NodeKind>) -> Self {
        Self {
            base: NodeBase::shared(kind),
        }
    }

    pub fn with(mut self, name: impl Into<SmolStr>, value: impl Into<Value>) -> Self {
        self.base.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<SmolStr>, value: impl Into<Value>) -> Option<Value> {
        self.base.set(name, value)
    }
}

impl Node for DynNode {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
