//! Recursive-descent parser for schema text.
//!
//! There is no tokenizer. Each production is an anchored pattern matched
//! against the unconsumed input, after which the cursor advances past the
//! match (trailing whitespace included).

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use text_size::TextSize;
use tracing::{debug, trace};

use super::errors::{ErrorCode, ParseContext, SchemaError};
use super::{AbstractType, Constructor, Field, Module, ProductType, SumType, TypeDef, is_reserved};
use crate::base::ident::starts_uppercase;

macro_rules! pattern {
    ($name:ident, $re:literal) => {
        static $name: Lazy<Regex> = Lazy::new(|| Regex::new($re).expect("valid pattern"));
    };
}

pattern!(MODULE_HEADER, r"^\s*module\s+(\w+)\s*\{");
pattern!(CLOSE_BRACE, r"^\s*\}");
pattern!(TYPEDEF, r"^\s*(\w+)\s*=\s*");
pattern!(CONSTRUCTOR, r"^\s*(\w+)\s*");
pattern!(FIELD, r"^\s*(\w+)([\?\*\+])?\s+(\w+)\s*");
pattern!(OPEN_PAREN, r"^\s*\(\s*");
pattern!(COMMA, r"^\s*,\s*");
pattern!(CLOSE_PAREN, r"^\s*\)\s*");
pattern!(BAR, r"^\s*\|\s*");
pattern!(ATTRIBUTES, r"^\s*attributes\b\s*");

/// Parse schema text into a [`Module`].
///
/// Fails on the first error; there is no partial result.
pub fn parse(text: &str) -> Result<Module, SchemaError> {
    let source = strip_comments(text);
    let mut cursor = Cursor::new(&source);

    let header = cursor
        .eat(&MODULE_HEADER)
        .ok_or_else(|| cursor.error(ErrorCode::E0101))?;
    let name = group(&header, 1);
    debug!("[SCHEMA] parsing module '{}'", name);

    let mut typedefs = Vec::new();
    let mut defined = FxHashSet::default();
    loop {
        if cursor.eat(&CLOSE_BRACE).is_some() {
            break;
        }
        if cursor.is_eof() {
            return Err(cursor.error(ErrorCode::E0102));
        }
        typedefs.push(parse_typedef(&mut cursor, &mut defined)?);
    }
    if !cursor.is_eof() {
        return Err(cursor.error(ErrorCode::E0103));
    }

    debug!(
        "[SCHEMA] parsed module '{}' with {} type definitions",
        name,
        typedefs.len()
    );
    Ok(Module { name, typedefs })
}

/// Blank out `--` comments, keeping byte offsets intact.
fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (index, line) in text.split('\n').enumerate() {
        if index > 0 {
            out.push('\n');
        }
        match line.find("--") {
            Some(start) => {
                out.push_str(&line[..start]);
                out.extend(std::iter::repeat_n(' ', line.len() - start));
            }
            None => out.push_str(line),
        }
    }
    out
}

fn group(captures: &Captures<'_>, index: usize) -> SmolStr {
    captures
        .get(index)
        .map_or_else(SmolStr::default, |m| SmolStr::new(m.as_str()))
}

struct Cursor<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(source: &'a str) -> Self {
        Self { source, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    fn is_eof(&self) -> bool {
        self.rest().trim_start().is_empty()
    }

    fn peek(&self, pattern: &Regex) -> bool {
        pattern.is_match(self.rest())
    }

    /// Match `pattern` at the cursor and advance past it.
    fn eat(&mut self, pattern: &Regex) -> Option<Captures<'a>> {
        let rest = self.rest();
        let captures = pattern.captures(rest)?;
        self.pos += captures.get(0)?.end();
        Some(captures)
    }

    /// Offset of the next non-whitespace character.
    fn offset(&self) -> TextSize {
        let rest = self.rest();
        let skipped = rest.len() - rest.trim_start().len();
        TextSize::try_from(self.pos + skipped).unwrap_or(TextSize::new(u32::MAX))
    }

    fn error(&self, code: ErrorCode) -> SchemaError {
        SchemaError::new(code, self.offset())
    }
}

fn parse_typedef(
    cursor: &mut Cursor<'_>,
    defined: &mut FxHashSet<SmolStr>,
) -> Result<TypeDef, SchemaError> {
    let start = cursor.offset();
    let captures = cursor
        .eat(&TYPEDEF)
        .ok_or_else(|| cursor.error(ErrorCode::E0104))?;
    let name = group(&captures, 1);
    if !defined.insert(name.clone()) {
        return Err(SchemaError::with_message(
            ErrorCode::E0201,
            format!("cannot define type '{name}' twice"),
            start,
        ));
    }
    trace!("[SCHEMA] type definition '{}'", name);

    let ty = parse_typedef_body(cursor, &name, start)
        .map_err(|e| e.in_context(ParseContext::TypeDefinition, name.clone()))?;
    Ok(TypeDef { name, ty })
}

fn parse_typedef_body(
    cursor: &mut Cursor<'_>,
    name: &str,
    start: TextSize,
) -> Result<AbstractType, SchemaError> {
    if is_reserved(name) {
        return Err(SchemaError::with_message(
            ErrorCode::E0202,
            format!("cannot redefine built-in or reserved type '{name}'"),
            start,
        ));
    }
    if cursor.peek(&OPEN_PAREN) {
        let fields = parse_fields(cursor)?;
        Ok(AbstractType::Product(ProductType { fields }))
    } else {
        parse_sum(cursor).map(AbstractType::Sum)
    }
}

fn parse_sum(cursor: &mut Cursor<'_>) -> Result<SumType, SchemaError> {
    let mut starts = vec![cursor.offset()];
    let mut constructors = vec![parse_constructor(cursor)?];
    while cursor.eat(&BAR).is_some() {
        starts.push(cursor.offset());
        constructors.push(parse_constructor(cursor)?);
    }
    let attributes = if cursor.eat(&ATTRIBUTES).is_some() {
        parse_fields(cursor)?
    } else {
        Vec::new()
    };

    // Constructors take the attributes as parameters too.
    for (ctor, start) in constructors.iter().zip(starts) {
        if let Some(field) = ctor
            .fields
            .iter()
            .find(|field| attributes.iter().any(|attr| attr.name == field.name))
        {
            let err = SchemaError::with_message(
                ErrorCode::E0204,
                format!("field '{}' is also an attribute", field.name),
                start,
            );
            return Err(err.in_context(ParseContext::Constructor, ctor.name.clone()));
        }
    }
    Ok(SumType {
        constructors,
        attributes,
    })
}

fn parse_constructor(cursor: &mut Cursor<'_>) -> Result<Constructor, SchemaError> {
    let start = cursor.offset();
    let captures = cursor
        .eat(&CONSTRUCTOR)
        .ok_or_else(|| cursor.error(ErrorCode::E0105))?;
    let name = group(&captures, 1);
    if !starts_uppercase(&name) {
        return Err(SchemaError::with_message(
            ErrorCode::E0203,
            format!("constructor name '{name}' must start with an uppercase letter"),
            start,
        ));
    }
    trace!("[SCHEMA] constructor '{}'", name);

    if !cursor.peek(&OPEN_PAREN) {
        return Ok(Constructor::new(name, Vec::new()));
    }
    let fields =
        parse_fields(cursor).map_err(|e| e.in_context(ParseContext::Constructor, name.clone()))?;
    Ok(Constructor { name, fields })
}

fn parse_fields(cursor: &mut Cursor<'_>) -> Result<Vec<Field>, SchemaError> {
    cursor
        .eat(&OPEN_PAREN)
        .ok_or_else(|| cursor.error(ErrorCode::E0106))?;
    let mut fields: Vec<Field> = Vec::new();
    loop {
        let start = cursor.offset();
        let field = parse_field(cursor)?;
        if fields.iter().any(|seen| seen.name == field.name) {
            return Err(SchemaError::with_message(
                ErrorCode::E0204,
                format!("field '{}' declared twice", field.name),
                start,
            ));
        }
        fields.push(field);
        if cursor.eat(&COMMA).is_none() {
            break;
        }
    }
    cursor
        .eat(&CLOSE_PAREN)
        .ok_or_else(|| cursor.error(ErrorCode::E0107))?;
    Ok(fields)
}

fn parse_field(cursor: &mut Cursor<'_>) -> Result<Field, SchemaError> {
    let captures = cursor
        .eat(&FIELD)
        .ok_or_else(|| cursor.error(ErrorCode::E0108))?;
    let field = Field::new(group(&captures, 1), group(&captures, 3));
    Ok(match captures.get(2).and_then(|m| m.as_str().chars().next()) {
        Some(suffix) => field.with_suffix(suffix),
        None => field,
    })
}
