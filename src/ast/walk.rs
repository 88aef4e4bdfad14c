//! Generic traversal over node slots and children.
//!
//! Child enumeration visits attributes first, then fields, each in declared
//! order. Unset slots are skipped.

use std::collections::VecDeque;

use super::node::{Names, Node, NodeBase};
use super::value::Value;

fn iter_slots<'a>(
    node: &'a dyn Node,
    names: &'a Names,
) -> impl Iterator<Item = (&'a str, &'a Value)> + 'a {
    names
        .iter()
        .filter_map(move |name| node.get(name).map(|value| (name, value)))
}

/// `(name, value)` for every declared field that is currently set.
pub fn iter_fields<'a>(node: &'a dyn Node) -> impl Iterator<Item = (&'a str, &'a Value)> + 'a {
    iter_slots(node, node.fields())
}

/// `(name, value)` for every declared attribute that is currently set.
pub fn iter_attribs<'a>(node: &'a dyn Node) -> impl Iterator<Item = (&'a str, &'a Value)> + 'a {
    iter_slots(node, node.attributes())
}

/// Direct child nodes: node-valued slots, and node elements of list slots.
pub fn iter_child_nodes<'a>(node: &'a dyn Node) -> impl Iterator<Item = &'a dyn Node> + 'a {
    iter_attribs(node)
        .chain(iter_fields(node))
        .flat_map(|(_, value)| value.child_nodes())
}

/// Mutable counterpart of [`iter_child_nodes`].
pub fn iter_child_nodes_mut<T: Node + ?Sized>(node: &mut T) -> impl Iterator<Item = &mut dyn Node> {
    node.base_mut().child_nodes_mut().into_iter()
}

/// Breadth-first iterator over a node and all of its descendants.
///
/// Yields the start node first. Nothing guards against cycles; trees built
/// from owned boxes cannot contain any.
pub struct Walk<'a> {
    todo: VecDeque<&'a dyn Node>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a dyn Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.todo.pop_front()?;
        self.todo.extend(iter_child_nodes(node));
        Some(node)
    }
}

pub fn walk(node: &dyn Node) -> Walk<'_> {
    Walk {
        todo: VecDeque::from([node]),
    }
}

/// Apply `f` to the storage of a node and every descendant, breadth-first.
pub fn walk_mut<T: Node + ?Sized>(node: &mut T, mut f: impl FnMut(&mut NodeBase)) {
    let mut todo: VecDeque<&mut NodeBase> = VecDeque::from([node.base_mut()]);
    while let Some(base) = todo.pop_front() {
        f(&mut *base);
        todo.extend(base.child_nodes_mut().into_iter().map(|child| child.base_mut()));
    }
}
