//! Intermediate representation between the schema model and emitted code.
//!
//! Lowering flattens every type definition into a list of [`TypeDecl`]s:
//! one per product type, and one per sum type plus one per constructor.
//! Constructors inherit the sum type's attributes.
//!
//! Schema names may repeat across declarations (a constructor named like its
//! sum type, or the same constructor name in two sums). The last declaration
//! keeps the plain name; every earlier one gets an alias, so each declaration
//! has a distinct Rust name while its node kind keeps the schema spelling.

use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::{SmolStr, format_smolstr};
use tracing::trace;

use crate::base::ident::rust_ident;
use crate::schema::{AbstractType, Builtin, Field, Module};

/// How many values a slot holds.
///
/// Many wins over optional, so a `*` field is a (possibly empty) list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Multiplicity {
    One,
    Optional,
    Many,
}

impl Multiplicity {
    pub fn of(field: &Field) -> Self {
        if field.can_many {
            Self::Many
        } else if field.can_none {
            Self::Optional
        } else {
            Self::One
        }
    }
}

/// A field type: a built-in scalar or a node type referenced by name.
///
/// Named references are never resolved; the name need not be defined.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Builtin(Builtin),
    Named(SmolStr),
}

impl TypeRef {
    pub fn resolve(type_name: &str) -> Self {
        match Builtin::from_name(type_name) {
            Some(builtin) => Self::Builtin(builtin),
            None => Self::Named(SmolStr::new(type_name)),
        }
    }
}

/// One construction parameter, i.e. one attribute or field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Param {
    pub name: SmolStr,
    pub ty: TypeRef,
    pub multiplicity: Multiplicity,
    /// Type as written in the schema, suffix included (`expr*`, `char?`).
    pub declared: SmolStr,
}

impl Param {
    pub fn from_field(field: &Field) -> Self {
        Self {
            name: field.name.clone(),
            ty: TypeRef::resolve(&field.type_name),
            multiplicity: Multiplicity::of(field),
            declared: match field.suffix() {
                Some(suffix) => format_smolstr!("{}{}", field.type_name, suffix),
                None => field.type_name.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    /// A product type: fields only.
    Product,
    /// The shared base of a sum type: attributes only.
    SumBase,
    /// A constructor of a sum type: inherited attributes plus its fields.
    Constructor,
}

/// One node type to emit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: SmolStr,
    pub kind: DeclKind,
    /// The sum type a constructor belongs to.
    pub parent: Option<SmolStr>,
    pub attributes: Vec<Param>,
    pub fields: Vec<Param>,
    /// Constructor names, for a sum base.
    pub variants: Vec<SmolStr>,
    /// Replacement name when a later declaration shares this one's name.
    pub alias: Option<SmolStr>,
}

impl TypeDecl {
    /// Unique name of this declaration within its module.
    pub fn key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    /// Rust identifier of the emitted type.
    pub fn ident(&self) -> String {
        rust_ident(self.key())
    }

    /// Parameters in construction order: attributes, then fields.
    pub fn params(&self) -> impl Iterator<Item = &Param> {
        self.attributes.iter().chain(self.fields.iter())
    }

    pub fn field_names(&self) -> Vec<SmolStr> {
        self.fields.iter().map(|param| param.name.clone()).collect()
    }

    pub fn attribute_names(&self) -> Vec<SmolStr> {
        self.attributes.iter().map(|param| param.name.clone()).collect()
    }

    /// Node type names referenced by this declaration, first use first.
    pub fn referenced_types(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for param in self.params() {
            if let TypeRef::Named(name) = &param.ty {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
        }
        names
    }
}

/// Lower a module into declarations, preserving definition order.
pub fn lower(module: &Module) -> Vec<TypeDecl> {
    let mut decls = Vec::new();
    for typedef in &module.typedefs {
        match &typedef.ty {
            AbstractType::Product(product) => {
                decls.push(TypeDecl {
                    name: typedef.name.clone(),
                    kind: DeclKind::Product,
                    parent: None,
                    attributes: Vec::new(),
                    fields: product.fields.iter().map(Param::from_field).collect(),
                    variants: Vec::new(),
                    alias: None,
                });
            }
            AbstractType::Sum(sum) => {
                let attributes: Vec<Param> = sum.attributes.iter().map(Param::from_field).collect();
                decls.push(TypeDecl {
                    name: typedef.name.clone(),
                    kind: DeclKind::SumBase,
                    parent: None,
                    attributes: attributes.clone(),
                    fields: Vec::new(),
                    variants: sum.constructors.iter().map(|ctor| ctor.name.clone()).collect(),
                    alias: None,
                });
                for ctor in &sum.constructors {
                    decls.push(TypeDecl {
                        name: ctor.name.clone(),
                        kind: DeclKind::Constructor,
                        parent: Some(typedef.name.clone()),
                        attributes: attributes.clone(),
                        fields: ctor.fields.iter().map(Param::from_field).collect(),
                        variants: Vec::new(),
                        alias: None,
                    });
                }
            }
        }
        trace!("[CODEGEN] lowered type definition '{}'", typedef.name);
    }
    assign_aliases(&mut decls);
    decls
}

/// Alias every declaration whose Rust name is reused by a later one.
fn assign_aliases(decls: &mut [TypeDecl]) {
    let mut last: FxHashMap<String, usize> = FxHashMap::default();
    for (index, decl) in decls.iter().enumerate() {
        last.insert(decl.ident(), index);
    }
    let mut taken: FxHashSet<String> = last.keys().cloned().collect();

    for (index, decl) in decls.iter_mut().enumerate() {
        if last.get(&decl.ident()) == Some(&index) {
            continue;
        }
        let stem = match (&decl.kind, &decl.parent) {
            (DeclKind::Constructor, Some(parent)) => format_smolstr!("{}_{}", decl.name, parent),
            (DeclKind::SumBase, _) => format_smolstr!("{}_base", decl.name),
            _ => format_smolstr!("{}_type", decl.name),
        };
        let mut alias = stem.clone();
        let mut counter = 2;
        while taken.contains(&rust_ident(&alias)) {
            alias = format_smolstr!("{}{}", stem, counter);
            counter += 1;
        }
        taken.insert(rust_ident(&alias));
        trace!("[CODEGEN] '{}' is shadowed, emitting it as '{}'", decl.name, alias);
        decl.alias = Some(alias);
    }
}
