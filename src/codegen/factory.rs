//! Runtime instantiation of schema node types.
//!
//! A [`NodeFactory`] builds [`DynNode`]s from the same declarations the Rust
//! emitter renders, so a dynamic node and its generated counterpart agree
//! on type name, parent, field and attribute order, and parameter order.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use thiserror::Error;
use tracing::{debug, trace};

use super::ir::{Multiplicity, Param, TypeDecl, TypeRef, lower};
use crate::ast::{DynNode, NodeKind, Value};
use crate::schema::{Builtin, Module};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FactoryError {
    #[error("unknown node type '{0}'")]
    UnknownType(SmolStr),

    #[error("'{type_name}' takes {expected} arguments, found {found}")]
    Arity {
        type_name: SmolStr,
        expected: usize,
        found: usize,
    },

    #[error("argument '{param}' of '{type_name}' expects `{expected}`, found {found}")]
    Mismatch {
        type_name: SmolStr,
        param: SmolStr,
        expected: SmolStr,
        found: &'static str,
    },
}

struct Entry {
    kind: Arc<NodeKind>,
    params: Vec<Param>,
}

/// Instantiates nodes of a schema's types by name.
pub struct NodeFactory {
    types: FxHashMap<SmolStr, Entry>,
}

impl NodeFactory {
    pub fn new(module: &Module) -> Self {
        debug!("[CODEGEN] building node factory for module '{}'", module.name);
        Self::from_decls(&lower(module))
    }

    /// Types are looked up by [`TypeDecl::key`], so a shadowed declaration
    /// is reachable under its alias. A later declaration with the same key
    /// replaces an earlier one.
    pub fn from_decls(decls: &[TypeDecl]) -> Self {
        let mut types = FxHashMap::default();
        for decl in decls {
            let kind = NodeKind::new(
                &decl.name,
                decl.parent.as_deref(),
                decl.field_names(),
                decl.attribute_names(),
            );
            let entry = Entry {
                kind: Arc::new(kind),
                params: decl.params().cloned().collect(),
            };
            if types.insert(SmolStr::new(decl.key()), entry).is_some() {
                trace!("[CODEGEN] node type '{}' declared twice, keeping the last", decl.key());
            }
        }
        Self { types }
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    pub fn kind(&self, type_name: &str) -> Option<&NodeKind> {
        self.types.get(type_name).map(|entry| entry.kind.as_ref())
    }

    /// Construction parameters in order: attributes, then fields.
    pub fn params(&self, type_name: &str) -> Option<&[Param]> {
        self.types.get(type_name).map(|entry| entry.params.as_slice())
    }

    /// A node with no slots set.
    pub fn empty(&self, type_name: &str) -> Result<DynNode, FactoryError> {
        let entry = self.entry(type_name)?;
        Ok(DynNode::new(Arc::clone(&entry.kind)))
    }

    /// Build a node from positional arguments in construction order.
    pub fn instantiate(&self, type_name: &str, args: Vec<Value>) -> Result<DynNode, FactoryError> {
        let entry = self.entry(type_name)?;
        if args.len() != entry.params.len() {
            return Err(FactoryError::Arity {
                type_name: SmolStr::new(type_name),
                expected: entry.params.len(),
                found: args.len(),
            });
        }

        let mut node = DynNode::new(Arc::clone(&entry.kind));
        for (param, value) in entry.params.iter().zip(args) {
            if !accepts(param, &value) {
                return Err(FactoryError::Mismatch {
                    type_name: SmolStr::new(type_name),
                    param: param.name.clone(),
                    expected: param.declared.clone(),
                    found: value.kind_name(),
                });
            }
            node.set(param.name.clone(), value);
        }
        Ok(node)
    }

    fn entry(&self, type_name: &str) -> Result<&Entry, FactoryError> {
        self.types
            .get(type_name)
            .ok_or_else(|| FactoryError::UnknownType(SmolStr::new(type_name)))
    }
}

fn accepts(param: &Param, value: &Value) -> bool {
    match param.multiplicity {
        Multiplicity::Many => value
            .as_list()
            .is_some_and(|items| items.iter().all(|item| accepts_one(&param.ty, item))),
        Multiplicity::Optional => value.is_null() || accepts_one(&param.ty, value),
        Multiplicity::One => accepts_one(&param.ty, value),
    }
}

fn accepts_one(ty: &TypeRef, value: &Value) -> bool {
    match (ty, value) {
        (TypeRef::Builtin(Builtin::Ident), Value::Ident(_)) => true,
        (TypeRef::Builtin(Builtin::Int), Value::Int(_)) => true,
        (TypeRef::Builtin(Builtin::String), Value::Str(_)) => true,
        (TypeRef::Builtin(Builtin::Bool), Value::Bool(_)) => true,
        (TypeRef::Builtin(Builtin::Float), Value::Float(_)) => true,
        (TypeRef::Named(_), Value::Node(_)) => true,
        _ => false,
    }
}
