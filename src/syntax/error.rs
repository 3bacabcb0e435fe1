use thiserror::Error;

/// Errors raised while parsing a translation source with tree-sitter.
#[derive(Error, Debug)]
pub enum SyntaxError {
    /// Error when failing to set the language for the parser
    #[error("Failed to set language for parser: {0}")]
    LanguageSetup(#[from] tree_sitter::LanguageError),
    /// The parser produced no syntax tree
    #[error("Failed to parse translation source")]
    ParseFailed,
}
