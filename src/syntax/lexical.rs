//! Lexical extraction of translation entries.
//!
//! The source is never executed or fully parsed. Comments are stripped
//! textually, the `export default { ... }` body is located with a pattern
//! anchored at the end of the input, and `key: "value"` pairs at the top level
//! of that body become entries.
//!
//! Known limitations:
//! - `//` or `/*` inside a string value is treated as a comment start.
//! - Escape sequences are kept verbatim and an escaped quote ends the value.
//! - Values that are objects, arrays, numbers or booleans are dropped.

use std::sync::LazyLock;

use regex::{
    Captures,
    Regex,
};

use crate::input::TranslationTable;

static BLOCK_COMMENT: LazyLock<Regex> = LazyLock::new(|| compile(r"(?s)/\*.*?\*/"));

static LINE_COMMENT: LazyLock<Regex> = LazyLock::new(|| compile(r"//[^\n]*"));

/// Body of the default-exported object literal. The closing brace must be the
/// last token, optionally followed by a TypeScript `as const` / `satisfies T`
/// suffix and a semicolon.
static DEFAULT_EXPORT: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?s)export\s+default\s*\{(.*)\}(?:\s*as\s+const|\s*satisfies\s+[^;{}]+?)?\s*;?\s*\z")
});

/// `key: value` where the key is bare, numeric, single- or double-quoted and
/// the value is a single-, double- or backtick-quoted string.
static ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r#"(?:"([^"\n]*)"|'([^'\n]*)'|([A-Za-z_$][\w$]*|\d+))\s*:\s*(?:"([^"]*)"|'([^']*)'|`([^`]*)`)"#,
    )
});

#[allow(clippy::expect_used)] // patterns are literals
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("translation source pattern must compile")
}

/// Removes block comments, then line comments.
#[must_use]
pub fn strip_comments(source: &str) -> String {
    let without_blocks = BLOCK_COMMENT.replace_all(source, "");
    LINE_COMMENT.replace_all(&without_blocks, "").into_owned()
}

/// Returns the text between the braces of the default-exported object.
#[must_use]
pub fn default_export_body(source: &str) -> Option<&str> {
    DEFAULT_EXPORT.captures(source).and_then(|caps| caps.get(1)).map(|body| body.as_str())
}

/// Extracts the string-valued entries of a translation source.
///
/// Returns an empty table when no default-exported object is found.
#[must_use]
pub fn parse(source: &str) -> TranslationTable {
    let stripped = strip_comments(source);
    let Some(body) = default_export_body(&stripped) else {
        tracing::debug!("No default-exported object literal found");
        return TranslationTable::default();
    };

    let mut nesting = NestingTracker::new(body);
    ENTRY
        .captures_iter(body)
        .filter(|caps| caps.get(0).is_some_and(|m| nesting.is_top_level(m.start())))
        .filter_map(|caps| entry_from_captures(&caps))
        .collect()
}

fn entry_from_captures(caps: &Captures<'_>) -> Option<(String, String)> {
    let key = caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3))?.as_str();
    let value = caps.get(4).or_else(|| caps.get(5)).or_else(|| caps.get(6))?.as_str();

    // template literals with substitutions are not plain strings
    if caps.get(6).is_some() && value.contains("${") {
        return None;
    }

    Some((key.to_string(), value.to_string()))
}

/// Tracks bracket depth while walking forward through an object body.
///
/// Quotes are matched without escape handling, the same way the entry
/// pattern reads them.
struct NestingTracker<'a> {
    bytes: &'a [u8],
    pos: usize,
    depth: usize,
    quote: Option<u8>,
}

impl<'a> NestingTracker<'a> {
    const fn new(body: &'a str) -> Self {
        Self { bytes: body.as_bytes(), pos: 0, depth: 0, quote: None }
    }

    /// Whether `offset` lies directly in the object body, outside nested
    /// values and strings. Offsets must be passed in increasing order.
    fn is_top_level(&mut self, offset: usize) -> bool {
        while self.pos < offset {
            let Some(&byte) = self.bytes.get(self.pos) else {
                break;
            };
            match (self.quote, byte) {
                (Some(quote), b) if b == quote => self.quote = None,
                (Some(_), _) => {}
                (None, b'"' | b'\'' | b'`') => self.quote = Some(byte),
                (None, b'{' | b'[' | b'(') => self.depth += 1,
                (None, b'}' | b']' | b')') => self.depth = self.depth.saturating_sub(1),
                (None, _) => {}
            }
            self.pos += 1;
        }
        self.depth == 0 && self.quote.is_none()
    }
}
