//! Slot values held by nodes.

use smol_str::SmolStr;

use super::node::Node;

/// The value of a field or attribute slot.
///
/// Child nodes are owned as `Box<dyn Node>` so that a node may hold any node
/// type in any slot; the schema's type references are documentation only.
#[derive(Debug)]
pub enum Value {
    /// An optional slot explicitly set to nothing.
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Ident(SmolStr),
    Node(Box<dyn Node>),
    List(Vec<Value>),
}

impl Value {
    /// Wrap a concrete node.
    pub fn node(node: impl Node) -> Self {
        Value::Node(Box::new(node))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_node(&self) -> bool {
        matches!(self, Value::Node(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Text of a `Str` or `Ident` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            Value::Ident(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&dyn Node> {
        match self {
            Value::Node(node) => Some(node.as_ref()),
            _ => None,
        }
    }

    pub fn as_node_mut(&mut self) -> Option<&mut dyn Node> {
        match self {
            Value::Node(node) => Some(node.as_mut()),
            _ => None,
        }
    }

    pub fn into_node(self) -> Option<Box<dyn Node>> {
        match self {
            Value::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Short name of the variant, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Ident(_) => "identifier",
            Value::Node(_) => "node",
            Value::List(_) => "list",
        }
    }

    /// Nodes directly reachable from this value.
    ///
    /// A node value yields itself; a list yields its node elements. Scalars,
    /// `Null` and lists nested inside lists yield nothing.
    pub fn child_nodes(&self) -> ChildNodes<'_> {
        let inner = match self {
            Value::Node(node) => Inner::One(Some(node.as_ref())),
            Value::List(items) => Inner::Many(items.iter()),
            _ => Inner::Empty,
        };
        ChildNodes { inner }
    }

    pub(crate) fn push_child_nodes_mut<'a>(&'a mut self, out: &mut Vec<&'a mut dyn Node>) {
        match self {
            Value::Node(node) => out.push(node.as_mut()),
            Value::List(items) => out.extend(items.iter_mut().filter_map(Value::as_node_mut)),
            _ => {}
        }
    }
}

/// Iterator returned by [`Value::child_nodes`].
pub struct ChildNodes<'a> {
    inner: Inner<'a>,
}

enum Inner<'a> {
    Empty,
    One(Option<&'a dyn Node>),
    Many(std::slice::Iter<'a, Value>),
}

impl<'a> Iterator for ChildNodes<'a> {
    type Item = &'a dyn Node;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            Inner::Empty => None,
            Inner::One(node) => node.take(),
            Inner::Many(items) => items.find_map(Value::as_node),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<SmolStr> for Value {
    fn from(value: SmolStr) -> Self {
        Value::Ident(value)
    }
}

impl From<Box<dyn Node>> for Value {
    fn from(value: Box<dyn Node>) -> Self {
        Value::Node(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::List(value.into_iter().map(Into::into).collect())
    }
}
