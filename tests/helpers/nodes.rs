//! Hand-written node types shaped like generator output.
//!
//! Mirrors the declarations produced for:
//!
//! ```text
//! module Test {
//!     program = (stmt* body)
//!     stmt = Expr(expr value) | Pass attributes (int lineno)
//!     expr = Num(int n) | BinOp(expr left, ident op, expr right) | Seq(expr* items)
//! }
//! ```

use astkit::ast::{Node, NodeBase, NodeKind, Value};
use astkit::{Location, SmolStr};

macro_rules! node_type {
    ($name:ident, $parent:expr, fields: [$($field:ident),*], attributes: [$($attr:ident),*]) => {
        #[derive(Debug)]
        #[allow(non_camel_case_types)]
        pub struct $name {
            base: NodeBase,
        }

        impl $name {
            pub fn node_kind() -> &'static NodeKind {
                static KIND: NodeKind = NodeKind::declared(
                    stringify!($name),
                    $parent,
                    &[$(stringify!($field)),*],
                    &[$(stringify!($attr)),*],
                );
                &KIND
            }

            #[allow(clippy::new_without_default)]
            pub fn new($($attr: impl Into<Value>,)* $($field: impl Into<Value>,)*) -> Self {
                Self {
                    base: NodeBase::new(Self::node_kind())
                        $(.with(stringify!($attr), $attr))*
                        $(.with(stringify!($field), $field))*,
                }
            }
        }

        impl Node for $name {
            fn base(&self) -> &NodeBase {
                &self.base
            }

            fn base_mut(&mut self) -> &mut NodeBase {
                &mut self.base
            }

            fn as_any(&self) -> &dyn std::any::Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
                self
            }
        }
    };
}

node_type!(program, None, fields: [body], attributes: []);
node_type!(stmt, None, fields: [], attributes: [lineno]);
node_type!(Expr, Some("stmt"), fields: [value], attributes: [lineno]);
node_type!(Pass, Some("stmt"), fields: [], attributes: [lineno]);
node_type!(expr, None, fields: [], attributes: []);
node_type!(Num, Some("expr"), fields: [n], attributes: []);
node_type!(BinOp, Some("expr"), fields: [left, op, right], attributes: []);
node_type!(Seq, Some("expr"), fields: [items], attributes: []);

pub fn num(n: i64) -> Value {
    Value::node(Num::new(n))
}

pub fn binop(left: Value, op: &str, right: Value) -> Value {
    Value::node(BinOp::new(left, SmolStr::new(op), right))
}

pub fn seq(items: Vec<Value>) -> Value {
    Value::node(Seq::new(items))
}

/// `Num` with a full location.
pub fn located_num(n: i64, location: Location) -> Value {
    let mut node = Num::new(n);
    *node.location_mut() = location;
    Value::node(node)
}

/// Type names of a node sequence, for order assertions.
pub fn type_names<'a>(nodes: impl Iterator<Item = &'a dyn Node>) -> Vec<String> {
    nodes.map(|node| node.type_name().to_string()).collect()
}

/// Integer payloads of `Num` nodes in a sequence, skipping everything else.
pub fn num_values<'a>(nodes: impl Iterator<Item = &'a dyn Node>) -> Vec<i64> {
    nodes
        .filter(|node| node.is::<Num>())
        .filter_map(|node| node.get("n").and_then(Value::as_int))
        .collect()
}
