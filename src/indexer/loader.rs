//! Loads one translation source per declared locale.

use std::path::{
    Path,
    PathBuf,
};

use crate::config::{
    LocaleDescriptor,
    TranslationConfig,
};
use crate::indexer::types::{
    LoadCause,
    LoadError,
};
use crate::input::source::{
    PRIMARY_EXTENSION,
    SECONDARY_EXTENSION,
};
use crate::input::{
    SourceKind,
    TranslationSet,
    TranslationTable,
};
use crate::syntax::{
    ParseStrategy,
    parse_translation_source,
};

/// Resolved source file for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationSource {
    pub path: PathBuf,
    pub kind: SourceKind,
}

/// Finds the source file of `code` inside `dir`.
///
/// `<dir>/<code>.ts` wins over `<dir>/<code>.js`.
pub fn resolve_source(dir: &Path, code: &str) -> Result<TranslationSource, LoadError> {
    let primary = dir.join(format!("{code}.{PRIMARY_EXTENSION}"));
    let secondary = dir.join(format!("{code}.{SECONDARY_EXTENSION}"));

    for path in [&primary, &secondary] {
        if path.exists() {
            let kind = SourceKind::from_path(path).unwrap_or(SourceKind::JavaScript);
            return Ok(TranslationSource { path: path.clone(), kind });
        }
    }

    Err(LoadError::MissingTranslationFile { code: code.to_string(), primary, secondary })
}

/// Reads and parses the translation source of a single locale.
pub fn load_locale(
    dir: &Path,
    code: &str,
    strategy: ParseStrategy,
) -> Result<TranslationTable, LoadError> {
    let source = resolve_source(dir, code)?;
    let load_error = |cause: LoadCause| LoadError::TranslationLoad {
        code: code.to_string(),
        path: source.path.clone(),
        cause,
    };

    tracing::debug!(code, path = %source.path.display(), "Loading translations");

    let text = std::fs::read_to_string(&source.path).map_err(|e| load_error(e.into()))?;
    let table = parse_translation_source(&text, source.kind, strategy)
        .map_err(|e| load_error(e.into()))?;

    if table.is_empty() {
        tracing::warn!(code, path = %source.path.display(), "Translation file has no entries");
    }

    Ok(table)
}

/// Loads the tables of every locale, in declaration order.
///
/// Returns an empty set when translations are absent or disabled. Stops at
/// the first locale that fails; a partial set is never returned.
pub fn load_all(
    project_root: &Path,
    translations: Option<&TranslationConfig>,
    locales: &[LocaleDescriptor],
) -> Result<TranslationSet, LoadError> {
    let Some(translations) = translations.filter(|t| t.enabled) else {
        tracing::debug!("Translations disabled, skipping load");
        return Ok(TranslationSet::default());
    };

    let dir = project_root.join(&translations.path);
    tracing::debug!(dir = %dir.display(), locales = locales.len(), "Loading translation set");

    let mut tables = Vec::with_capacity(locales.len());
    for locale in locales {
        let table = load_locale(&dir, &locale.code, translations.parser)?;
        tables.push((locale.code.clone(), table));
    }

    Ok(tables.into_iter().collect())
}
