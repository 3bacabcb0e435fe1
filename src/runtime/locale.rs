//! Read-only locale accessor used while rendering pages.

use crate::config::{
    Configuration,
    LocaleDescriptor,
    TextDirection,
};
use crate::input::TranslationSet;

/// View of the configuration and translations for one current locale.
///
/// Unknown locales and missing keys never fail: lookups fall back to the
/// default locale and then to the key itself.
#[derive(Debug, Clone, Copy)]
pub struct Locale<'ctx> {
    config: &'ctx Configuration,
    translations: &'ctx TranslationSet,
    current: Option<&'ctx LocaleDescriptor>,
}

impl<'ctx> Locale<'ctx> {
    /// Creates an accessor for `code`, or for the default locale when `code`
    /// is not configured.
    #[must_use]
    pub fn new(
        config: &'ctx Configuration,
        translations: &'ctx TranslationSet,
        code: &str,
    ) -> Self {
        let current = config.find_locale(code).or_else(|| {
            tracing::debug!(code, default = %config.default, "Unknown locale, using default");
            config.default_locale()
        });
        Self { config, translations, current }
    }

    #[must_use]
    pub fn code(&self) -> &'ctx str {
        self.current.map_or(self.config.default.as_str(), |locale| locale.code.as_str())
    }

    #[must_use]
    pub const fn descriptor(&self) -> Option<&'ctx LocaleDescriptor> {
        self.current
    }

    #[must_use]
    pub fn dir(&self) -> TextDirection {
        self.current.map_or(TextDirection::Ltr, |locale| locale.dir)
    }

    #[must_use]
    pub fn default_code(&self) -> &'ctx str {
        &self.config.default
    }

    #[must_use]
    pub fn is_default(&self) -> bool {
        self.code() == self.config.default
    }

    #[must_use]
    pub fn locales(&self) -> &'ctx [LocaleDescriptor] {
        &self.config.locales
    }

    /// `path` for the current locale.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        localize_path(self.config, path, self.code())
    }

    /// `path` for `code`; unknown codes get the default locale's URL.
    #[must_use]
    pub fn url_for(&self, path: &str, code: &str) -> String {
        localize_path(self.config, path, code)
    }

    /// Translation of `key` in the current locale, then in the default one.
    #[must_use]
    pub fn translate(&self, key: &str) -> Option<&'ctx str> {
        self.translations
            .lookup(self.code(), key)
            .or_else(|| self.translations.lookup(&self.config.default, key))
    }

    /// Translation of `key` with `{name}` placeholders filled from `vars`.
    ///
    /// Falls back to the key itself when no locale has it.
    #[must_use]
    pub fn t(&self, key: &str, vars: &[(&str, &str)]) -> String {
        let template = self.translate(key).unwrap_or_else(|| {
            tracing::debug!(key, locale = self.code(), "Missing translation");
            key
        });
        interpolate(template, vars)
    }
}

/// Adds the locale prefix for `code` to `path`, replacing any existing one.
///
/// The default locale stays unprefixed unless `prefixDefaultLocale` is set.
/// Query strings and fragments are kept. Disabled configurations return
/// `path` unchanged.
#[must_use]
pub fn localize_path(config: &Configuration, path: &str, code: &str) -> String {
    if !config.enabled {
        return path.to_string();
    }

    let split_at = path.find(['?', '#']).unwrap_or(path.len());
    let (path_part, suffix) = path.split_at(split_at);
    let bare = strip_locale_prefix(config, path_part);

    let code = if config.is_supported(code) { code } else { config.default.as_str() };
    if code == config.default && !config.prefix_default_locale {
        return format!("{bare}{suffix}");
    }

    if bare == "/" { format!("/{code}/{suffix}") } else { format!("/{code}{bare}{suffix}") }
}

/// Normalizes `path` to start with `/` and drops a leading locale segment.
#[must_use]
pub fn strip_locale_prefix(config: &Configuration, path: &str) -> String {
    let trimmed = path.trim_start_matches('/');
    let (first, rest) = trimmed.split_once('/').map_or((trimmed, None), |(f, r)| (f, Some(r)));

    if !config.is_supported(first) {
        return format!("/{trimmed}");
    }
    rest.map_or_else(|| "/".to_string(), |rest| format!("/{rest}"))
}

/// Single-pass `{name}` interpolation. Unknown placeholders are left as-is.
#[must_use]
pub fn interpolate(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some((before, after)) = rest.split_once('{') {
        out.push_str(before);
        let Some((name, tail)) = after.split_once('}') else {
            out.push('{');
            rest = after;
            break;
        };
        // unmatched `{`: keep it literal and rescan from the next one
        if let Some((literal, _)) = name.split_once('{') {
            out.push('{');
            out.push_str(literal);
            rest = after.get(literal.len()..).unwrap_or_default();
            continue;
        }
        match vars.iter().find(|(var, _)| *var == name) {
            Some((_, value)) => out.push_str(value),
            None => {
                out.push('{');
                out.push_str(name);
                out.push('}');
            }
        }
        rest = tail;
    }

    out.push_str(rest);
    out
}
