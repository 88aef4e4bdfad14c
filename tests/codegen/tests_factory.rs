//! Runtime node factory and its agreement with generated code

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use astkit::ast::{DynNode, Node, NodeKind, NodeVisitor, Value, VisitFn, iter_child_nodes, iter_fields, walk};
use astkit::codegen::{FactoryError, Multiplicity, NodeFactory, generate, lower};
use astkit::schema::parse;
use astkit::SmolStr;
use rstest::rstest;

use crate::helpers::source_fixtures::{CALC_SCHEMA, STMT_SCHEMA};

fn calc() -> NodeFactory {
    NodeFactory::new(&parse(CALC_SCHEMA).unwrap())
}

fn ident(name: &str) -> Value {
    Value::Ident(SmolStr::new(name))
}

fn leaf() -> Value {
    let kind = Arc::new(NodeKind::new("Leaf", None, Vec::new(), Vec::new()));
    Value::node(DynNode::new(kind))
}

/// The `declared(...)` call the emitter writes for `kind`.
fn declared_call(kind: &NodeKind) -> String {
    let quoted = |names: Vec<String>| names.join(", ");
    let parent = match kind.parent() {
        Some(parent) => format!("::core::option::Option::Some({parent:?})"),
        None => "::core::option::Option::None".to_string(),
    };
    format!(
        "NodeKind::declared({:?}, {parent}, &[{}], &[{}])",
        kind.name(),
        quoted(kind.fields().iter().map(|f| format!("{f:?}")).collect()),
        quoted(kind.attributes().iter().map(|a| format!("{a:?}")).collect()),
    )
}

#[test]
fn test_factory_agrees_with_generated_code() {
    let module = parse(CALC_SCHEMA).unwrap();
    let factory = NodeFactory::new(&module);
    let source = generate(&module);

    for decl in lower(&module) {
        let kind = factory.kind(&decl.name).unwrap();
        let expected = declared_call(kind);
        assert!(source.contains(&expected), "missing {expected}");
    }
}

#[rstest]
#[case::product("program", None, &["body", "docstring"], &[])]
#[case::sum_base("stmt", None, &[], &["lineno", "col_offset"])]
#[case::constructor("Assign", Some("stmt"), &["target", "value"], &["lineno", "col_offset"])]
#[case::bare_constructor("Pass", Some("stmt"), &[], &["lineno", "col_offset"])]
#[case::no_attributes("Call", Some("expr"), &["func", "args", "starred"], &[])]
fn test_factory_kinds(
    #[case] name: &str,
    #[case] parent: Option<&str>,
    #[case] fields: &[&str],
    #[case] attributes: &[&str],
) {
    let factory = calc();
    let kind = factory.kind(name).unwrap();
    assert_eq!(kind.name(), name);
    assert_eq!(kind.parent(), parent);
    assert_eq!(kind.fields().iter().collect::<Vec<_>>(), fields);
    assert_eq!(kind.attributes().iter().collect::<Vec<_>>(), attributes);
}

#[test]
fn test_factory_params_follow_construction_order() {
    let factory = calc();
    let params = factory.params("Call").unwrap();
    let shape: Vec<(&str, Multiplicity)> = params
        .iter()
        .map(|p| (p.name.as_str(), p.multiplicity))
        .collect();
    assert_eq!(
        shape,
        vec![
            ("func", Multiplicity::One),
            ("args", Multiplicity::Many),
            ("starred", Multiplicity::Optional),
        ]
    );
}

#[test]
fn test_instantiate_builds_traversable_tree() {
    let factory = calc();
    let one = factory.instantiate("Num", vec![Value::Int(1)]).unwrap();
    let two = factory.instantiate("Num", vec![Value::Int(2)]).unwrap();
    let sum = factory
        .instantiate("BinOp", vec![Value::node(one), ident("+"), Value::node(two)])
        .unwrap();
    let assign = factory
        .instantiate(
            "Assign",
            vec![Value::Int(1), Value::Int(0), ident("x"), Value::node(sum)],
        )
        .unwrap();
    let program = factory
        .instantiate("program", vec![Value::from(vec![Value::node(assign)]), Value::Null])
        .unwrap();

    let names: Vec<&str> = walk(&program).map(|node| node.type_name()).collect();
    assert_eq!(names, vec!["program", "Assign", "BinOp", "Num", "Num"]);

    let assign = iter_child_nodes(&program).next().unwrap();
    let slots: Vec<&str> = iter_fields(assign).map(|(name, _)| name).collect();
    assert_eq!(slots, vec!["target", "value"]);
    assert_eq!(assign.parent_type(), Some("stmt"));
}

#[test]
fn test_dynamic_nodes_dispatch_like_generated_ones() {
    #[derive(Default)]
    struct IdCollector {
        seen: Vec<String>,
    }

    impl IdCollector {
        fn visit_name(&mut self, node: &dyn Node) {
            if let Some(id) = node.get("id").and_then(Value::as_str) {
                self.seen.push(id.to_string());
            }
        }
    }

    impl NodeVisitor for IdCollector {
        fn handler(&self, type_name: &str) -> Option<VisitFn<Self>> {
            match type_name {
                "Name" => Some(Self::visit_name),
                _ => None,
            }
        }
    }

    let factory = calc();
    let name = |id: &str| Value::node(factory.instantiate("Name", vec![ident(id)]).unwrap());
    let call = factory
        .instantiate(
            "Call",
            vec![name("f"), Value::from(vec![name("a"), name("b")]), Value::Bool(true)],
        )
        .unwrap();

    let mut visitor = IdCollector::default();
    visitor.visit(&call);
    assert_eq!(visitor.seen, vec!["f", "a", "b"]);
}

#[rstest]
#[case::optional_unset("Call", vec![leaf(), Value::List(vec![]), Value::Null], None)]
#[case::optional_set("Call", vec![leaf(), Value::List(vec![leaf()]), Value::Bool(false)], None)]
#[case::empty_list("Print", vec![Value::Int(1), Value::Int(0), Value::List(vec![])], None)]
#[case::scalar_for_node("Assign", vec![Value::Int(1), Value::Int(0), ident("x"), Value::Int(3)], Some("value"))]
#[case::string_for_ident("Name", vec![Value::from("x")], Some("id"))]
#[case::list_element("Call", vec![leaf(), Value::List(vec![Value::Int(1)]), Value::Null], Some("args"))]
#[case::null_for_list("Call", vec![leaf(), Value::Null, Value::Null], Some("args"))]
fn test_instantiate_type_checks(
    #[case] type_name: &str,
    #[case] args: Vec<Value>,
    #[case] rejected: Option<&str>,
) {
    let result = calc().instantiate(type_name, args);
    match rejected {
        None => assert!(result.is_ok(), "{result:?}"),
        Some(expected) => match result {
            Err(FactoryError::Mismatch { param, .. }) => assert_eq!(param, expected),
            other => panic!("expected mismatch on '{expected}', got {other:?}"),
        },
    }
}

#[test]
fn test_factory_errors_render() {
    let factory = NodeFactory::new(&parse(STMT_SCHEMA).unwrap());
    let unknown = factory.instantiate("Missing", vec![]).unwrap_err();
    assert_eq!(unknown.to_string(), "unknown node type 'Missing'");

    let arity = factory.instantiate("Expr", vec![Value::Int(1)]).unwrap_err();
    assert_eq!(arity.to_string(), "'Expr' takes 2 arguments, found 1");

    let mismatch = factory
        .instantiate("Expr", vec![Value::Int(1), Value::from("one")])
        .unwrap_err();
    assert_eq!(
        mismatch.to_string(),
        "argument 'value' of 'Expr' expects `int`, found string"
    );
}
