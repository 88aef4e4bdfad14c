//! Common schema fixtures for tests.

/// The statement example used throughout the docs.
pub const STMT_SCHEMA: &str = "module M { stmt = Expr(int value) | Pass attributes (int lineno) }";

/// A small expression language exercising every field suffix.
pub const CALC_SCHEMA: &str = r#"
-- a tiny calculator
module Calc {
    program = (stmt* body, string? docstring)

    stmt = Assign(ident target, expr value)
         | Print(expr+ values)
         | Pass
         attributes (int lineno, int col_offset)

    expr = Num(int n)               -- literal
         | Name(ident id)
         | BinOp(expr left, ident op, expr right)
         | Call(expr func, expr* args, bool? starred)
}
"#;

/// A sum type with a constructor of the same name.
pub const SHADOW_SCHEMA: &str = "module Shadow { Foo = Foo(int x) | Bar }";

/// Uses the `char`, `str` and `boolean` aliases and an undefined type name.
pub const ALIAS_SCHEMA: &str = r#"
module Alias {
    token = (char kind, str text, boolean synthetic, float weight, undefined extra)
}
"#;

/// Source text used by the location tests.
pub const SEGMENT_SOURCE: &str = "abc\ndef\n";
