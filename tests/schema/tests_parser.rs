//! Schema parser acceptance tests

#![allow(clippy::unwrap_used)]

use astkit::schema::{AbstractType, Builtin, Field, Module, SumType, parse};
use rstest::rstest;

use crate::helpers::source_fixtures::{ALIAS_SCHEMA, CALC_SCHEMA, STMT_SCHEMA};

fn sum<'m>(module: &'m Module, name: &str) -> &'m SumType {
    match &module.get(name).unwrap().ty {
        AbstractType::Sum(sum) => sum,
        other => panic!("expected sum type for '{name}', found {other:?}"),
    }
}

fn product_fields<'m>(module: &'m Module, name: &str) -> &'m [Field] {
    match &module.get(name).unwrap().ty {
        AbstractType::Product(product) => &product.fields,
        other => panic!("expected product type for '{name}', found {other:?}"),
    }
}

#[test]
fn test_stmt_example() {
    let module = parse(STMT_SCHEMA).unwrap();
    assert_eq!(module.name, "M");
    assert_eq!(module.typedefs.len(), 1);

    let stmt = sum(&module, "stmt");
    assert_eq!(stmt.constructors.len(), 2);
    assert_eq!(stmt.constructors[0].name, "Expr");
    assert_eq!(stmt.constructors[0].fields, vec![Field::new("int", "value")]);
    assert_eq!(stmt.constructors[1].name, "Pass");
    assert!(stmt.constructors[1].fields.is_empty());
    assert_eq!(stmt.attributes, vec![Field::new("int", "lineno")]);
}

#[test]
fn test_calc_schema_structure() {
    let module = parse(CALC_SCHEMA).unwrap();
    assert_eq!(module.name, "Calc");
    assert_eq!(
        module.type_names().collect::<Vec<_>>(),
        vec!["program", "stmt", "expr"]
    );

    let program = product_fields(&module, "program");
    assert_eq!(program.len(), 2);
    assert!(program[0].can_many && program[0].can_none);
    assert!(program[1].can_none && !program[1].can_many);

    let stmt = sum(&module, "stmt");
    let names: Vec<&str> = stmt.constructors.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Assign", "Print", "Pass"]);
    assert_eq!(stmt.attributes.len(), 2);
    let values = &stmt.constructors[1].fields[0];
    assert!(values.can_many && !values.can_none);

    let expr = sum(&module, "expr");
    assert!(expr.attributes.is_empty());
    assert_eq!(expr.constructors[3].fields.len(), 3);
}

#[test]
fn test_aliases_and_undefined_names_are_kept() {
    let module = parse(ALIAS_SCHEMA).unwrap();
    let fields = product_fields(&module, "token");
    let types: Vec<&str> = fields.iter().map(|f| f.type_name.as_str()).collect();
    assert_eq!(types, vec!["char", "str", "boolean", "float", "undefined"]);
    assert_eq!(fields[0].builtin(), Some(Builtin::Int));
    assert_eq!(fields[4].builtin(), None);
}

#[rstest]
#[case::empty_module("module M { }", 0)]
#[case::no_spaces("module M{a=(int x)}", 1)]
#[case::newlines("module M\n{\n  a =\n    (int x)\n}\n", 1)]
#[case::trailing_whitespace("module M { a = A }  \n\t", 1)]
#[case::comment_after_brace("module M { -- nothing here\n}", 0)]
#[case::comment_after_module("module M { a = A } -- done", 1)]
#[case::two_products("module M { a = (int x) b = (a y, a* z) }", 2)]
#[case::product_and_sum("module M { a = (int x) b = B1 | B2(a x) }", 2)]
#[case::sum_then_product("module M { s = A | B t = (int x) }", 2)]
#[case::attributes_only_ctor("module M { s = A attributes (int x) }", 1)]
fn test_valid_schemas(#[case] text: &str, #[case] typedefs: usize) {
    let module = parse(text).unwrap_or_else(|e| panic!("{text:?} failed: {}", e.report()));
    assert_eq!(module.typedefs.len(), typedefs);
}

#[rstest]
#[case("int x", "int", "x", false, false)]
#[case("int? x", "int", "x", true, false)]
#[case("int* x", "int", "x", true, true)]
#[case("int+ x", "int", "x", false, true)]
#[case("expr*  values", "expr", "values", true, true)]
fn test_field_multiplicity(
    #[case] field: &str,
    #[case] type_name: &str,
    #[case] name: &str,
    #[case] can_none: bool,
    #[case] can_many: bool,
) {
    let text = format!("module M {{ t = ({field}) }}");
    let module = parse(&text).unwrap();
    let parsed = &product_fields(&module, "t")[0];
    assert_eq!(parsed.type_name, type_name);
    assert_eq!(parsed.name, name);
    assert_eq!(parsed.can_none, can_none);
    assert_eq!(parsed.can_many, can_many);
}

#[test]
fn test_parse_is_structural() {
    let a = parse("module M { a = (int x) }").unwrap();
    let b = parse("module   M {\n a = ( int   x )\n}").unwrap();
    assert_eq!(a, b);
}
