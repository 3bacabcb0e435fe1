//! Translation source file kinds.

use std::path::Path;

/// Extension tried first when resolving a locale's source file.
pub const PRIMARY_EXTENSION: &str = "ts";
/// Extension tried when the primary file does not exist.
pub const SECONDARY_EXTENSION: &str = "js";

/// Languages a translation source file may be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    JavaScript,
    TypeScript,
}

impl SourceKind {
    /// Infers the source kind from the file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("ts" | "mts" | "cts") => Some(Self::TypeScript),
            Some("js" | "mjs" | "cjs") => Some(Self::JavaScript),
            _ => None,
        }
    }

    #[must_use]
    pub fn tree_sitter_language(self) -> tree_sitter::Language {
        match self {
            Self::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        }
    }
}
