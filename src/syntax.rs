//! Translation source parsing.
//!
//! Two strategies extract the same table from a default-exported object
//! literal: a lightweight lexical scan (the default) and a tree-sitter
//! parse that also decodes escapes and understands comments inside strings.
//! Neither executes the source.

mod error;
pub mod lexical;
pub mod tree;

use serde::{
    Deserialize,
    Serialize,
};

pub use error::SyntaxError;

use crate::input::{
    SourceKind,
    TranslationTable,
};

/// How translation sources are turned into tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseStrategy {
    /// Comment stripping plus pattern extraction.
    #[default]
    Lexical,
    /// Full JavaScript/TypeScript grammar via tree-sitter.
    Syntax,
}

/// Parses one locale's translation source with the given strategy.
///
/// The lexical strategy never fails.
pub fn parse_translation_source(
    text: &str,
    kind: SourceKind,
    strategy: ParseStrategy,
) -> Result<TranslationTable, SyntaxError> {
    match strategy {
        ParseStrategy::Lexical => Ok(lexical::parse(text)),
        ParseStrategy::Syntax => tree::parse(text, kind),
    }
}
