//! Per-build state: validated configuration plus loaded translations.
//!
//! A context is created once per build pass and never mutated. A rebuild
//! creates a new context and drops the old one.

use std::path::{
    Path,
    PathBuf,
};
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::config::{
    ConfigError,
    Configuration,
    ValidationOptions,
    load_from_project,
};
use crate::indexer::{
    LoadError,
    load_all,
};
use crate::input::TranslationSet;
use crate::runtime::Locale;

/// Global holding the serialized [`Configuration`] in the page runtime.
pub const CONFIG_GLOBAL: &str = "__SITE_I18N_CONFIG__";

/// Global holding the serialized [`TranslationSet`] in the page runtime.
pub const TRANSLATIONS_GLOBAL: &str = "__SITE_I18N_TRANSLATIONS__";

#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Failed to serialize injected globals: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct BuildContext {
    project_root: PathBuf,
    config: Arc<Configuration>,
    translations: Arc<TranslationSet>,
}

impl BuildContext {
    /// Validates `raw` and loads the translations it points at.
    pub fn build(
        project_root: impl Into<PathBuf>,
        raw: &Value,
        options: &ValidationOptions,
    ) -> Result<Self, BuildError> {
        let project_root = project_root.into();
        let config = Configuration::from_value(raw, options)?;
        let translations =
            load_all(&project_root, config.enabled_translations(), &config.locales)?;

        tracing::debug!(
            root = %project_root.display(),
            enabled = config.enabled,
            locales = config.locales.len(),
            tables = translations.len(),
            "Build context ready"
        );

        Ok(Self {
            project_root,
            config: Arc::new(config),
            translations: Arc::new(translations),
        })
    }

    /// Reads the configuration file of `project_root` and builds from it.
    ///
    /// A project without a configuration file gets i18n disabled.
    pub fn from_project(
        project_root: impl Into<PathBuf>,
        options: &ValidationOptions,
    ) -> Result<Self, BuildError> {
        let project_root = project_root.into();
        let raw = load_from_project(&project_root)?.unwrap_or_else(|| {
            tracing::info!(root = %project_root.display(), "No i18n configuration, i18n disabled");
            serde_json::json!({ "enabled": false })
        });
        Self::build(project_root, &raw, options)
    }

    #[must_use]
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    #[must_use]
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    #[must_use]
    pub fn translations(&self) -> &TranslationSet {
        &self.translations
    }

    /// Accessor for `code`, falling back to the default locale.
    #[must_use]
    pub fn locale(&self, code: &str) -> Locale<'_> {
        Locale::new(&self.config, &self.translations, code)
    }

    /// Serializes the data handed to the page runtime.
    pub fn globals(&self) -> Result<InjectedGlobals, BuildError> {
        Ok(InjectedGlobals {
            config: serde_json::to_string(self.config.as_ref())?,
            translations: serde_json::to_string(self.translations.as_ref())?,
        })
    }
}

/// JSON payloads of the two runtime globals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectedGlobals {
    pub config: String,
    pub translations: String,
}

impl InjectedGlobals {
    /// Script assigning both globals, safe to inline in a `<script>` element.
    #[must_use]
    pub fn to_script(&self) -> String {
        format!(
            "globalThis.{CONFIG_GLOBAL} = {};\nglobalThis.{TRANSLATIONS_GLOBAL} = {};\n",
            escape_for_script(&self.config),
            escape_for_script(&self.translations),
        )
    }
}

/// `<` only occurs inside JSON strings, where `\u003c` is equivalent.
fn escape_for_script(json: &str) -> String {
    json.replace('<', "\\u003c")
}
