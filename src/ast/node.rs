//! The node capability shared by every generated (or dynamic) node type.

use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use indexmap::IndexMap;
use smol_str::SmolStr;

use super::value::Value;
use crate::base::{Location, SymbolRef};

// ============================================================================
// NODE KINDS
// ============================================================================

/// An ordered list of slot names (fields or attributes).
///
/// Generated node types use the `Static` form so their kinds can live in
/// `static` items; kinds built at runtime from a schema use `Owned`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Names {
    Static(&'static [&'static str]),
    Owned(Vec<SmolStr>),
}

impl Names {
    pub const fn empty() -> Self {
        Names::Static(&[])
    }

    pub fn len(&self) -> usize {
        match self {
            Names::Static(names) => names.len(),
            Names::Owned(names) => names.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        match self {
            Names::Static(names) => names.get(index).copied(),
            Names::Owned(names) => names.get(index).map(SmolStr::as_str),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        (0..self.len()).filter_map(move |index| self.get(index))
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.iter().position(|candidate| candidate == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn to_vec(&self) -> Vec<SmolStr> {
        self.iter().map(SmolStr::new).collect()
    }
}

impl From<Vec<SmolStr>> for Names {
    fn from(names: Vec<SmolStr>) -> Self {
        Names::Owned(names)
    }
}

/// Static description of a node type: its name, the sum type it belongs to
/// (if it is a constructor) and its declared field and attribute names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeKind {
    name: Cow<'static, str>,
    parent: Option<Cow<'static, str>>,
    fields: Names,
    attributes: Names,
}

impl NodeKind {
    /// Kind of a compiled node type. Usable in `static` items.
    pub const fn declared(
        name: &'static str,
        parent: Option<&'static str>,
        fields: &'static [&'static str],
        attributes: &'static [&'static str],
    ) -> Self {
        let parent = match parent {
            Some(parent) => Some(Cow::Borrowed(parent)),
            None => None,
        };
        Self {
            name: Cow::Borrowed(name),
            parent,
            fields: Names::Static(fields),
            attributes: Names::Static(attributes),
        }
    }

    /// Kind built at runtime (see [`crate::codegen::NodeFactory`]).
    pub fn new(
        name: &str,
        parent: Option<&str>,
        fields: Vec<SmolStr>,
        attributes: Vec<SmolStr>,
    ) -> Self {
        Self {
            name: Cow::Owned(name.to_string()),
            parent: parent.map(|p| Cow::Owned(p.to_string())),
            fields: Names::Owned(fields),
            attributes: Names::Owned(attributes),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the sum type this kind is a constructor of.
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn fields(&self) -> &Names {
        &self.fields
    }

    pub fn attributes(&self) -> &Names {
        &self.attributes
    }

    /// Position of a slot in child-enumeration order (attributes, then fields).
    pub fn slot_rank(&self, name: &str) -> Option<usize> {
        self.attributes.position(name).or_else(|| {
            self.fields
                .position(name)
                .map(|index| index + self.attributes.len())
        })
    }

    /// Whether `name` is a declared field or attribute.
    pub fn declares(&self, name: &str) -> bool {
        self.slot_rank(name).is_some()
    }
}

#[derive(Debug, Clone)]
enum KindRef {
    Static(&'static NodeKind),
    Shared(Arc<NodeKind>),
}

impl Deref for KindRef {
    type Target = NodeKind;

    fn deref(&self) -> &NodeKind {
        match self {
            KindRef::Static(kind) => kind,
            KindRef::Shared(kind) => kind,
        }
    }
}

// ============================================================================
// NODE STORAGE
// ============================================================================

/// Storage shared by every node: kind, slot values, symbol and location.
///
/// A slot that was never set (or was removed) is simply absent, which is how
/// partially constructed nodes are represented.
#[derive(Debug)]
pub struct NodeBase {
    kind: KindRef,
    slots: IndexMap<SmolStr, Value>,
    /// Reference into a downstream symbol table, never interpreted here.
    pub symref: Option<SymbolRef>,
    pub location: Location,
}

impl NodeBase {
    pub fn new(kind: &'static NodeKind) -> Self {
        Self::with_kind(KindRef::Static(kind))
    }

    pub fn shared(kind: Arc<NodeKind>) -> Self {
        Self::with_kind(KindRef::Shared(kind))
    }

    fn with_kind(kind: KindRef) -> Self {
        Self {
            kind,
            slots: IndexMap::new(),
            symref: None,
            location: Location::unset(),
        }
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Builder form of [`NodeBase::set`].
    pub fn with(mut self, name: impl Into<SmolStr>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.slots.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.slots.get_mut(name)
    }

    /// Set a slot, returning the previous value. Reassigning keeps the slot's
    /// position among the set slots.
    pub fn set(&mut self, name: impl Into<SmolStr>, value: impl Into<Value>) -> Option<Value> {
        self.slots.insert(name.into(), value.into())
    }

    /// Unset a slot entirely.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.slots.shift_remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    /// Every set slot, declared or not, in the order it was first set.
    pub fn slots(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.slots.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Mutable handles to the direct children, in child-enumeration order.
    ///
    /// Only declared slots are considered, attributes first, matching
    /// [`crate::ast::iter_child_nodes`].
    pub fn child_nodes_mut(&mut self) -> Vec<&mut dyn Node> {
        let kind: &NodeKind = &self.kind;
        let mut ranked: Vec<(usize, &mut Value)> = self
            .slots
            .iter_mut()
            .filter_map(|(name, value)| kind.slot_rank(name).map(|rank| (rank, value)))
            .collect();
        ranked.sort_by_key(|(rank, _)| *rank);

        let mut children = Vec::new();
        for (_, value) in ranked {
            value.push_child_nodes_mut(&mut children);
        }
        children
    }
}

// ============================================================================
// NODE TRAIT
// ============================================================================

/// The node capability.
///
/// Implementors only provide access to their [`NodeBase`] and to themselves
/// as [`Any`]; everything else is derived from the base.
pub trait Node: Any + fmt::Debug {
    fn base(&self) -> &NodeBase;
    fn base_mut(&mut self) -> &mut NodeBase;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn kind(&self) -> &NodeKind {
        self.base().kind()
    }

    /// Exact runtime type name, used for visitor dispatch.
    fn type_name(&self) -> &str {
        self.kind().name()
    }

    fn parent_type(&self) -> Option<&str> {
        self.kind().parent()
    }

    fn fields(&self) -> &Names {
        self.kind().fields()
    }

    fn attributes(&self) -> &Names {
        self.kind().attributes()
    }

    fn get(&self, name: &str) -> Option<&Value> {
        self.base().get(name)
    }

    fn location(&self) -> &Location {
        &self.base().location
    }

    fn location_mut(&mut self) -> &mut Location {
        &mut self.base_mut().location
    }

    fn symref(&self) -> Option<&SymbolRef> {
        self.base().symref.as_ref()
    }

    fn set_symref(&mut self, symref: Option<SymbolRef>) {
        self.base_mut().symref = symref;
    }
}

impl<'a> dyn Node + 'a {
    pub fn is<T: Node>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: Node>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Node>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}
