//! Identifier utilities shared by the schema parser and the Rust generator.

/// Keywords that are reserved in Rust 2024 and must be escaped when a schema
/// name is used as a Rust identifier.
const RUST_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be written as raw identifiers.
const NON_RAW_KEYWORDS: &[&str] = &["self", "Self", "super", "crate"];

/// Check if a character is considered part of a word (identifier).
///
/// Uses Unicode Standard Annex #31 rules for identifier characters.
#[inline]
pub fn is_word_character(c: char) -> bool {
    unicode_ident::is_xid_continue(c)
}

/// Check if `name` is a plain (non-keyword) Rust identifier.
pub fn is_rust_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first == '_' || unicode_ident::is_xid_start(first))
        && chars.all(is_word_character)
        && name != "_"
        && !is_rust_keyword(name)
}

pub fn is_rust_keyword(name: &str) -> bool {
    RUST_KEYWORDS.contains(&name) || NON_RAW_KEYWORDS.contains(&name)
}

/// Check whether a name starts with an uppercase letter.
pub fn starts_uppercase(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/// Turn a schema name into something usable as a Rust identifier.
///
/// Keywords become raw identifiers (`type` -> `r#type`); the few keywords
/// that have no raw form get a trailing underscore (`self` -> `self_`).
/// Names that start with a digit are prefixed with `_`.
pub fn rust_ident(name: &str) -> String {
    if NON_RAW_KEYWORDS.contains(&name) {
        return format!("{name}_");
    }
    if RUST_KEYWORDS.contains(&name) {
        return format!("r#{name}");
    }
    if name == "_" {
        return "__".to_string();
    }
    match name.chars().next() {
        Some(first) if first != '_' && !unicode_ident::is_xid_start(first) => format!("_{name}"),
        _ => name.to_string(),
    }
}
