//! Rust source emitter for lowered declarations.
//!
//! Every declaration becomes a struct wrapping a `NodeBase`, an inherent
//! `node_kind()`/`new()` pair and a `Node` impl. Std items are spelled with
//! absolute paths so that schema type names cannot shadow them.

use std::fmt::Write as _;

use tracing::trace;

use super::ir::{DeclKind, Multiplicity, Param, TypeDecl, TypeRef};
use super::options::{GenerateOptions, Preamble};
use crate::base::ident::{is_rust_identifier, rust_ident};
use crate::schema::Builtin;

const RULE: &str =
    "// ============================================================================";
const THIN_RULE: &str =
    "// ----------------------------------------------------------------------------";

/// Above this many parameters clippy's `too_many_arguments` fires.
const CLIPPY_MAX_ARGS: usize = 7;

pub struct RustEmitter<'a> {
    options: &'a GenerateOptions,
    out: String,
}

impl<'a> RustEmitter<'a> {
    pub fn new(options: &'a GenerateOptions) -> Self {
        Self {
            options,
            out: String::new(),
        }
    }

    /// Render a whole module: preamble, module banner, then every declaration.
    pub fn emit_module(mut self, module_name: &str, decls: &[TypeDecl]) -> String {
        self.emit_preamble();
        self.line(0, RULE);
        self.line(0, &format!("// Generated node types for module `{module_name}`"));
        self.line(0, RULE);
        for decl in decls {
            self.out.push('\n');
            self.emit_decl(decl);
        }
        self.out
    }

    fn emit_preamble(&mut self) {
        match &self.options.preamble {
            Preamble::None => {}
            Preamble::Default => {
                self.line(0, "// @generated by astkit. Do not edit by hand.");
                self.line(
                    0,
                    &format!(
                        "// Runtime support: `{}::ast`.",
                        self.options.runtime_path
                    ),
                );
                self.out.push('\n');
            }
            Preamble::Custom(text) => {
                self.out.push_str(text);
                if !text.ends_with('\n') {
                    self.out.push('\n');
                }
                self.out.push('\n');
            }
        }
    }

    fn emit_decl(&mut self, decl: &TypeDecl) {
        trace!("[CODEGEN] emitting '{}'", decl.name);
        let ident = decl.ident();
        let rt = self.options.runtime_path.clone();

        let banner = match (&decl.kind, &decl.parent) {
            (DeclKind::Constructor, Some(parent)) => {
                format!("// {} (constructor of '{}')", decl.name, parent)
            }
            (DeclKind::SumBase, _) => format!("// TYPE '{}' (sum)", decl.name),
            _ => format!("// TYPE '{}'", decl.name),
        };
        self.line(0, THIN_RULE);
        self.line(0, &banner);
        self.line(0, THIN_RULE);
        self.out.push('\n');

        if self.options.emit_docs {
            self.emit_type_docs(decl, &ident);
        }
        self.line(0, "#[derive(Debug)]");
        self.line(0, "#[allow(non_camel_case_types)]");
        self.line(0, &format!("pub struct {ident} {{"));
        self.line(1, &format!("base: {rt}::ast::NodeBase,"));
        self.line(0, "}");
        self.out.push('\n');

        self.line(0, &format!("impl {ident} {{"));
        self.emit_node_kind(decl, &rt);
        self.out.push('\n');
        self.emit_constructor(decl, &rt);
        self.line(0, "}");
        self.out.push('\n');

        if decl.params().next().is_none() {
            self.line(0, &format!("impl ::core::default::Default for {ident} {{"));
            self.line(1, "fn default() -> Self {");
            self.line(2, "Self::new()");
            self.line(1, "}");
            self.line(0, "}");
            self.out.push('\n');
        }

        self.emit_node_impl(&ident, &rt);
    }

    fn emit_type_docs(&mut self, decl: &TypeDecl, ident: &str) {
        let summary = match decl.kind {
            DeclKind::Product => format!("/// Product type `{}`.", decl.name),
            DeclKind::SumBase => format!("/// Sum type `{}`.", decl.name),
            DeclKind::Constructor => format!(
                "/// Constructor `{}` of `{}`.",
                decl.name,
                decl.parent.as_deref().unwrap_or_default()
            ),
        };
        self.line(0, &summary);
        if decl.alias.is_some() || !is_rust_identifier(&decl.name) {
            self.line(0, "///");
            self.line(0, &format!("/// Emitted as `{ident}`; the node keeps its schema name."));
        }
        if !decl.variants.is_empty() {
            let variants = quoted_list(decl.variants.iter().map(|v| v.as_str()));
            self.line(0, "///");
            self.line(0, &format!("/// Constructors: {variants}."));
        }
        let referenced = decl.referenced_types();
        if !referenced.is_empty() {
            self.line(0, "///");
            self.line(
                0,
                &format!("/// Node types referenced: {}.", quoted_list(referenced.into_iter())),
            );
        }
    }

    fn emit_node_kind(&mut self, decl: &TypeDecl, rt: &str) {
        let parent = match &decl.parent {
            Some(parent) => format!("::core::option::Option::Some({})", string_literal(parent)),
            None => "::core::option::Option::None".to_string(),
        };
        let fields = slice_literal(&decl.fields);
        let attributes = slice_literal(&decl.attributes);

        if self.options.emit_docs {
            self.line(1, "/// Names and parent of this node type.");
        }
        self.line(1, &format!("pub fn node_kind() -> &'static {rt}::ast::NodeKind {{"));
        self.line(
            2,
            &format!(
                "static KIND: {rt}::ast::NodeKind = {rt}::ast::NodeKind::declared({}, {parent}, {fields}, {attributes});",
                string_literal(&decl.name)
            ),
        );
        self.line(2, "&KIND");
        self.line(1, "}");
    }

    fn emit_constructor(&mut self, decl: &TypeDecl, rt: &str) {
        let params: Vec<&Param> = decl.params().collect();

        if self.options.emit_docs {
            self.line(1, &format!("/// Create a `{}` node.", decl.name));
            if !params.is_empty() {
                self.line(1, "///");
                for param in decl.attributes.iter() {
                    self.line(1, &format!("/// - `{}`: `{}` (attribute)", param.name, param.declared));
                }
                for param in decl.fields.iter() {
                    self.line(1, &format!("/// - `{}`: `{}`", param.name, param.declared));
                }
            }
        }
        if params.len() > CLIPPY_MAX_ARGS {
            self.line(1, "#[allow(clippy::too_many_arguments)]");
        }
        if params.iter().any(|param| !is_snake_case(&param.name)) {
            self.line(1, "#[allow(non_snake_case)]");
        }

        let signature = params
            .iter()
            .map(|param| format!("{}: {}", rust_ident(&param.name), param_type(param, rt)))
            .collect::<Vec<_>>()
            .join(", ");
        self.line(1, &format!("pub fn new({signature}) -> Self {{"));
        self.line(2, "Self {");
        let mut chain = vec![(3, format!("base: {rt}::ast::NodeBase::new(Self::node_kind())"))];
        for param in &params {
            chain.push((
                4,
                format!(".with({}, {})", string_literal(&param.name), rust_ident(&param.name)),
            ));
        }
        if let Some((_, last)) = chain.last_mut() {
            last.push(',');
        }
        for (level, text) in chain {
            self.line(level, &text);
        }
        self.line(2, "}");
        self.line(1, "}");
    }

    fn emit_node_impl(&mut self, ident: &str, rt: &str) {
        self.line(0, &format!("impl {rt}::ast::Node for {ident} {{"));
        self.line(1, &format!("fn base(&self) -> &{rt}::ast::NodeBase {{"));
        self.line(2, "&self.base");
        self.line(1, "}");
        self.out.push('\n');
        self.line(1, &format!("fn base_mut(&mut self) -> &mut {rt}::ast::NodeBase {{"));
        self.line(2, "&mut self.base");
        self.line(1, "}");
        self.out.push('\n');
        self.line(1, "fn as_any(&self) -> &dyn ::core::any::Any {");
        self.line(2, "self");
        self.line(1, "}");
        self.out.push('\n');
        self.line(1, "fn as_any_mut(&mut self) -> &mut dyn ::core::any::Any {");
        self.line(2, "self");
        self.line(1, "}");
        self.line(0, "}");
    }

    fn line(&mut self, level: usize, text: &str) {
        let indent = self.options.indent(level);
        let _ = writeln!(self.out, "{indent}{text}");
    }
}

/// Rust type of a single value of `ty`.
fn scalar_type(ty: &TypeRef, rt: &str) -> String {
    match ty {
        TypeRef::Builtin(Builtin::Ident) => format!("{rt}::SmolStr"),
        TypeRef::Builtin(Builtin::Int) => "::core::primitive::i64".to_string(),
        TypeRef::Builtin(Builtin::String) => "::std::string::String".to_string(),
        TypeRef::Builtin(Builtin::Bool) => "::core::primitive::bool".to_string(),
        TypeRef::Builtin(Builtin::Float) => "::core::primitive::f64".to_string(),
        TypeRef::Named(_) => format!("::std::boxed::Box<dyn {rt}::ast::Node>"),
    }
}

fn param_type(param: &Param, rt: &str) -> String {
    let scalar = scalar_type(&param.ty, rt);
    match param.multiplicity {
        Multiplicity::Many => format!("::std::vec::Vec<{scalar}>"),
        Multiplicity::Optional => format!("::core::option::Option<{scalar}>"),
        Multiplicity::One => scalar,
    }
}

fn string_literal(text: &str) -> String {
    format!("{text:?}")
}

fn slice_literal(params: &[Param]) -> String {
    let names = params
        .iter()
        .map(|param| string_literal(&param.name))
        .collect::<Vec<_>>()
        .join(", ");
    format!("&[{names}]")
}

fn quoted_list<'s>(names: impl Iterator<Item = &'s str>) -> String {
    names
        .map(|name| format!("`{name}`"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn is_snake_case(name: &str) -> bool {
    !name.chars().any(char::is_uppercase)
}
