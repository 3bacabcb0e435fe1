//! Loader error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::syntax::SyntaxError;

#[derive(Error, Debug)]
pub enum LoadError {
    /// Neither candidate file exists for a declared locale
    #[error(
        "Missing translation file for locale \"{code}\": tried {} and {}",
        .primary.display(),
        .secondary.display()
    )]
    MissingTranslationFile { code: String, primary: PathBuf, secondary: PathBuf },

    /// A candidate file exists but could not be turned into a table
    #[error("Failed to load translations for locale \"{code}\" from {}: {cause}", .path.display())]
    TranslationLoad {
        code: String,
        path: PathBuf,
        #[source]
        cause: LoadCause,
    },
}

#[derive(Error, Debug)]
pub enum LoadCause {
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

impl LoadError {
    /// Locale the failure belongs to.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::MissingTranslationFile { code, .. } | Self::TranslationLoad { code, .. } => code,
        }
    }
}
