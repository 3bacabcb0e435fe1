//! Syntax-tree extraction of translation entries using tree-sitter.
//!
//! Same contract as [`super::lexical`], with proper handling of escape
//! sequences and of comment markers inside string literals.

use std::iter::Peekable;
use std::str::Chars;

use tree_sitter::{
    Node,
    Parser,
};

use super::SyntaxError;
use crate::input::{
    SourceKind,
    TranslationTable,
};

/// Extracts the string-valued entries of the default-exported object.
///
/// Syntax errors elsewhere in the file are tolerated; whatever tree-sitter
/// recovered of the object is used.
pub fn parse(source: &str, kind: SourceKind) -> Result<TranslationTable, SyntaxError> {
    let mut parser = Parser::new();
    parser.set_language(&kind.tree_sitter_language())?;
    let tree = parser.parse(source, None).ok_or(SyntaxError::ParseFailed)?;

    let root = tree.root_node();
    if root.has_error() {
        tracing::debug!(?kind, "Translation source has syntax errors, using recovered tree");
    }

    let Some(object) = default_export_object(root) else {
        tracing::debug!("No default-exported object literal found");
        return Ok(TranslationTable::default());
    };

    let source_bytes = source.as_bytes();
    let mut cursor = object.walk();
    let table = object
        .named_children(&mut cursor)
        .filter(|child| child.kind() == "pair")
        .filter_map(|pair| extract_entry(pair, source_bytes))
        .collect();

    Ok(table)
}

/// Finds the object literal of the last `export default` statement.
fn default_export_object(root: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = root.walk();
    let statement = root
        .named_children(&mut cursor)
        .filter(|node| node.kind() == "export_statement" && is_default_export(*node))
        .last()?;

    let mut cursor = statement.walk();
    statement.named_children(&mut cursor).find_map(object_literal)
}

fn is_default_export(statement: Node<'_>) -> bool {
    let mut cursor = statement.walk();
    statement.children(&mut cursor).any(|child| child.kind() == "default")
}

/// Unwraps `as const`, `satisfies T`, parentheses and `!` around an object.
fn object_literal(node: Node<'_>) -> Option<Node<'_>> {
    match node.kind() {
        "object" => Some(node),
        "as_expression"
        | "satisfies_expression"
        | "parenthesized_expression"
        | "non_null_expression" => node.named_child(0).and_then(object_literal),
        _ => None,
    }
}

fn extract_entry(pair: Node<'_>, source: &[u8]) -> Option<(String, String)> {
    let key_node = pair.child_by_field_name("key")?;
    let value_node = pair.child_by_field_name("value")?;

    let key_text = key_node.utf8_text(source).ok()?;
    let key = match key_node.kind() {
        "property_identifier" | "number" => key_text.to_string(),
        "string" => string_literal_value(key_text)?,
        // computed and private keys
        _ => return None,
    };

    let value_text = value_node.utf8_text(source).ok()?;
    let value = match value_node.kind() {
        "string" => string_literal_value(value_text)?,
        "template_string" if !has_substitution(value_node) => string_literal_value(value_text)?,
        _ => return None,
    };

    Some((key, value))
}

fn has_substitution(template: Node<'_>) -> bool {
    let mut cursor = template.walk();
    template.named_children(&mut cursor).any(|child| child.kind() == "template_substitution")
}

/// Strips the surrounding quotes of a literal and decodes its escapes.
fn string_literal_value(raw: &str) -> Option<String> {
    let quote = raw.chars().next()?;
    let inner = raw.strip_prefix(quote)?.strip_suffix(quote)?;
    Some(unescape(inner))
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(escaped) = chars.next() else {
            out.push('\\');
            break;
        };
        match escaped {
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' => out.push('\0'),
            'x' => out.push(to_char(read_hex(&mut chars, 2))),
            'u' => out.push(read_unicode_escape(&mut chars)),
            // line continuation
            '\r' => {
                let _ = chars.next_if_eq(&'\n');
            }
            '\n' | '\u{2028}' | '\u{2029}' => {}
            other => out.push(other),
        }
    }

    out
}

/// Reads the part of a `\u` escape after the `u`: `XXXX`, `{X...}`, or a
/// surrogate pair `XXXX\uXXXX`.
fn read_unicode_escape(chars: &mut Peekable<Chars<'_>>) -> char {
    if chars.next_if_eq(&'{').is_some() {
        let mut value: u32 = 0;
        while let Some(digit) = chars.next_if(char::is_ascii_hexdigit) {
            value = value.saturating_mul(16).saturating_add(digit.to_digit(16).unwrap_or(0));
        }
        return if chars.next_if_eq(&'}').is_some() {
            to_char(Some(value))
        } else {
            char::REPLACEMENT_CHARACTER
        };
    }

    let Some(high) = read_hex(chars, 4) else {
        return char::REPLACEMENT_CHARACTER;
    };
    if !(0xD800..=0xDBFF).contains(&high) {
        return to_char(Some(high));
    }

    let mut lookahead = chars.clone();
    if lookahead.next() == Some('\\')
        && lookahead.next() == Some('u')
        && let Some(low) = read_hex(&mut lookahead, 4)
        && (0xDC00..=0xDFFF).contains(&low)
    {
        *chars = lookahead;
        return to_char(Some(0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)));
    }

    char::REPLACEMENT_CHARACTER
}

fn read_hex(chars: &mut Peekable<Chars<'_>>, digits: usize) -> Option<u32> {
    let mut value = 0;
    for _ in 0..digits {
        let digit = chars.next_if(char::is_ascii_hexdigit)?;
        value = value * 16 + digit.to_digit(16)?;
    }
    Some(value)
}

fn to_char(code_point: Option<u32>) -> char {
    code_point.and_then(char::from_u32).unwrap_or(char::REPLACEMENT_CHARACTER)
}
