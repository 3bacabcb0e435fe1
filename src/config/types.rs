use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};
use serde_json::Value;
use thiserror::Error;

use super::validator::{
    ValidationOptions,
    validate_with,
};
use crate::syntax::ParseStrategy;

/// A single schema violation.
///
/// `Display` yields `message` verbatim so callers can match on it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct SchemaError {
    /// Path to the offending field (e.g., "locales[0].dir")
    pub field_path: String,
    pub message: String,
}

impl SchemaError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("Failed to load configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to parse configuration file: {0}")]
    Syntax(String),

    #[error("Configuration file {} contains no value", .0.display())]
    Empty(PathBuf),
}

/// Writing direction of a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

impl TextDirection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
        }
    }
}

/// One supported language variant.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleDescriptor {
    pub code: String,
    /// Display name in the reference language.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Display name in the locale's own language.
    pub endonym: String,
    pub dir: TextDirection,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslationConfig {
    pub enabled: bool,
    /// Directory holding one source file per locale, relative to the project root.
    pub path: String,
    pub parser: ParseStrategy,
}

/// Root i18n configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub enabled: bool,

    #[serde(default)]
    pub default: String,

    #[serde(default)]
    pub locales: Vec<LocaleDescriptor>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translations: Option<TranslationConfig>,

    /// Whether URLs of the default locale carry a `/<code>` prefix too.
    #[serde(default)]
    pub prefix_default_locale: bool,
}

impl Configuration {
    /// Configuration with i18n switched off.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            default: String::new(),
            locales: Vec::new(),
            translations: None,
            prefix_default_locale: false,
        }
    }

    /// Validates an untrusted value and converts it into a typed configuration.
    ///
    /// A disabled configuration is returned as [`Configuration::disabled`]
    /// without looking at any other field.
    pub fn from_value(value: &Value, options: &ValidationOptions) -> Result<Self, ConfigError> {
        validate_with(value, options)?;

        if value.get("enabled").and_then(Value::as_bool) != Some(true) {
            return Ok(Self::disabled());
        }

        Ok(Self::deserialize(value)?)
    }

    /// Translation settings, only when translation loading is switched on.
    #[must_use]
    pub fn enabled_translations(&self) -> Option<&TranslationConfig> {
        self.translations.as_ref().filter(|t| self.enabled && t.enabled)
    }

    #[must_use]
    pub fn find_locale(&self, code: &str) -> Option<&LocaleDescriptor> {
        self.locales.iter().find(|locale| locale.code == code)
    }

    #[must_use]
    pub fn default_locale(&self) -> Option<&LocaleDescriptor> {
        self.find_locale(&self.default)
    }

    #[must_use]
    pub fn is_supported(&self, code: &str) -> bool {
        self.find_locale(code).is_some()
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::disabled()
    }
}
