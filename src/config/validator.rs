//! Schema validation for raw i18n configuration values.
//!
//! Checks run top to bottom and the first violation is returned, so the
//! reported error for a given input is always the same.

use std::collections::HashSet;

use serde_json::Value;

use super::SchemaError;

/// Knobs for schema variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Every locale must carry a `name`.
    pub require_name: bool,
    /// Reject configurations listing the same locale code twice.
    pub check_duplicate_codes: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self { require_name: false, check_duplicate_codes: true }
    }
}

/// Validates `config` with [`ValidationOptions::default`].
pub fn validate(config: &Value) -> Result<(), SchemaError> {
    validate_with(config, &ValidationOptions::default())
}

/// Validates an untrusted configuration value.
///
/// A configuration with `enabled: false` is valid whatever else it contains.
pub fn validate_with(config: &Value, options: &ValidationOptions) -> Result<(), SchemaError> {
    let Some(enabled) = config.get("enabled").and_then(Value::as_bool) else {
        return Err(SchemaError::new("enabled", "\"enabled\" must be a boolean"));
    };
    if !enabled {
        return Ok(());
    }

    let Some(default) = non_blank_str(config.get("default")) else {
        return Err(SchemaError::new("default", "\"default\" must be a non-empty string"));
    };

    let locales = match config.get("locales").and_then(Value::as_array) {
        Some(locales) if !locales.is_empty() => locales,
        _ => return Err(SchemaError::new("locales", "\"locales\" must be a non-empty array")),
    };

    let mut codes = Vec::with_capacity(locales.len());
    for (index, locale) in locales.iter().enumerate() {
        codes.push(validate_locale(index, locale, options)?);
    }

    if !codes.contains(&default) {
        return Err(SchemaError::new(
            "default",
            "\"default\" must be one of the supported locale codes",
        ));
    }

    if options.check_duplicate_codes {
        let unique: HashSet<&str> = codes.iter().copied().collect();
        if unique.len() != codes.len() {
            return Err(SchemaError::new("locales", "\"locales\" contains duplicate locale codes"));
        }
    }

    if let Some(translations) = config.get("translations") {
        validate_translations(translations)?;
    }

    if let Some(prefix) = config.get("prefixDefaultLocale")
        && !prefix.is_boolean()
    {
        return Err(SchemaError::new(
            "prefixDefaultLocale",
            "\"prefixDefaultLocale\" must be a boolean",
        ));
    }

    Ok(())
}

/// Checks one locale entry and returns its code.
fn validate_locale<'a>(
    index: usize,
    locale: &'a Value,
    options: &ValidationOptions,
) -> Result<&'a str, SchemaError> {
    let Some(code) = non_blank_str(locale.get("code")) else {
        return Err(non_empty_string_error(index, "code"));
    };

    match locale.get("name") {
        None | Some(Value::Null) if !options.require_name => {}
        name => {
            if non_blank_str(name).is_none() {
                return Err(non_empty_string_error(index, "name"));
            }
        }
    }

    if non_blank_str(locale.get("endonym")).is_none() {
        return Err(non_empty_string_error(index, "endonym"));
    }

    if !matches!(locale.get("dir").and_then(Value::as_str), Some("ltr" | "rtl")) {
        return Err(SchemaError::new(
            format!("locales[{index}].dir"),
            format!("locales[{index}].dir must be either \"ltr\" or \"rtl\""),
        ));
    }

    Ok(code)
}

fn validate_translations(translations: &Value) -> Result<(), SchemaError> {
    if !translations.is_object() {
        return Err(SchemaError::new("translations", "\"translations\" must be an object"));
    }

    let enabled = match translations.get("enabled") {
        None => false,
        Some(Value::Bool(enabled)) => *enabled,
        Some(_) => {
            return Err(SchemaError::new(
                "translations.enabled",
                "\"translations.enabled\" must be a boolean",
            ));
        }
    };

    if enabled && non_blank_str(translations.get("path")).is_none() {
        return Err(SchemaError::new(
            "translations.path",
            "\"translations.path\" must be a non-empty string when translations are enabled",
        ));
    }

    if let Some(path) = translations.get("path")
        && !path.is_string()
    {
        return Err(SchemaError::new("translations.path", "\"translations.path\" must be a string"));
    }

    if let Some(parser) = translations.get("parser")
        && !matches!(parser.as_str(), Some("lexical" | "syntax"))
    {
        return Err(SchemaError::new(
            "translations.parser",
            "\"translations.parser\" must be either \"lexical\" or \"syntax\"",
        ));
    }

    Ok(())
}

fn non_empty_string_error(index: usize, field: &str) -> SchemaError {
    SchemaError::new(
        format!("locales[{index}].{field}"),
        format!("locales[{index}].{field} must be a non-empty string"),
    )
}

/// Returns the string when `value` is a string with non-whitespace content.
fn non_blank_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;
    use serde_json::{
        Value,
        json,
    };

    use super::*;

    fn english() -> Value {
        json!({ "code": "en", "name": "English", "endonym": "English", "dir": "ltr" })
    }

    fn finnish() -> Value {
        json!({ "code": "fi", "name": "Finnish", "endonym": "Suomi", "dir": "ltr" })
    }

    fn enabled_config(locales: Value) -> Value {
        json!({ "enabled": true, "default": "en", "locales": locales })
    }

    fn message(config: &Value) -> String {
        validate(config).unwrap_err().message
    }

    #[rstest]
    fn accepts_minimal_enabled_configuration() {
        let config = enabled_config(json!([english()]));

        assert_that!(validate(&config), ok(anything()));
    }

    #[rstest]
    #[case::everything_malformed(json!({ "enabled": false, "default": 1, "locales": "x" }))]
    #[case::no_other_fields(json!({ "enabled": false }))]
    #[case::bad_translations(json!({ "enabled": false, "translations": { "enabled": true } }))]
    #[case::duplicate_codes(json!({ "enabled": false, "locales": [english(), english()] }))]
    fn disabled_configuration_is_always_valid(#[case] config: Value) {
        assert_that!(validate(&config), ok(anything()));
    }

    #[rstest]
    #[case::missing(json!({}))]
    #[case::string(json!({ "enabled": "true" }))]
    #[case::number(json!({ "enabled": 1 }))]
    #[case::not_an_object(json!(["enabled"]))]
    fn rejects_non_boolean_enabled(#[case] config: Value) {
        let error = validate(&config).unwrap_err();

        assert_that!(error.field_path, eq("enabled"));
        assert_that!(error.message, eq("\"enabled\" must be a boolean"));
    }

    #[rstest]
    #[case::missing(json!({ "enabled": true, "locales": [english()] }))]
    #[case::number(json!({ "enabled": true, "default": 3, "locales": [english()] }))]
    #[case::blank(json!({ "enabled": true, "default": "  ", "locales": [english()] }))]
    fn rejects_invalid_default(#[case] config: Value) {
        assert_that!(message(&config), eq("\"default\" must be a non-empty string"));
    }

    #[rstest]
    #[case::missing(json!({ "enabled": true, "default": "en" }))]
    #[case::empty(json!({ "enabled": true, "default": "en", "locales": [] }))]
    #[case::object(json!({ "enabled": true, "default": "en", "locales": { "en": {} } }))]
    fn rejects_invalid_locales(#[case] config: Value) {
        assert_that!(message(&config), eq("\"locales\" must be a non-empty array"));
    }

    #[rstest]
    #[case::missing_code(json!({ "endonym": "English", "dir": "ltr" }), "locales[1].code must be a non-empty string")]
    #[case::blank_code(json!({ "code": " ", "endonym": "English", "dir": "ltr" }), "locales[1].code must be a non-empty string")]
    #[case::blank_name(json!({ "code": "de", "name": "", "endonym": "Deutsch", "dir": "ltr" }), "locales[1].name must be a non-empty string")]
    #[case::missing_endonym(json!({ "code": "de", "dir": "ltr" }), "locales[1].endonym must be a non-empty string")]
    #[case::bad_dir(json!({ "code": "de", "endonym": "Deutsch", "dir": "up" }), "locales[1].dir must be either \"ltr\" or \"rtl\"")]
    #[case::uppercase_dir(json!({ "code": "de", "endonym": "Deutsch", "dir": "LTR" }), "locales[1].dir must be either \"ltr\" or \"rtl\"")]
    #[case::not_an_object(json!("de"), "locales[1].code must be a non-empty string")]
    fn rejects_invalid_locale_entry(#[case] locale: Value, #[case] expected: &str) {
        let config = enabled_config(json!([english(), locale]));

        assert_that!(message(&config), eq(expected));
    }

    #[rstest]
    fn reports_invalid_dir_by_index() {
        let config = enabled_config(json!([
            { "code": "en", "name": "English", "endonym": "English", "dir": "up" }
        ]));

        let error = validate(&config).unwrap_err();

        assert_that!(error.field_path, eq("locales[0].dir"));
        assert_that!(error.message, eq("locales[0].dir must be either \"ltr\" or \"rtl\""));
    }

    #[rstest]
    fn reports_first_violation_only() {
        let config = enabled_config(json!([
            english(),
            { "code": "", "endonym": "", "dir": "up" },
            { "code": "xx", "dir": "sideways" }
        ]));

        assert_that!(message(&config), eq("locales[1].code must be a non-empty string"));
    }

    #[rstest]
    fn name_is_optional_by_default() {
        let config = enabled_config(json!([
            { "code": "en", "endonym": "English", "dir": "ltr" },
            { "code": "fi", "name": null, "endonym": "Suomi", "dir": "ltr" }
        ]));

        assert_that!(validate(&config), ok(anything()));
    }

    #[rstest]
    fn name_can_be_required() {
        let config = enabled_config(json!([{ "code": "en", "endonym": "English", "dir": "ltr" }]));
        let options = ValidationOptions { require_name: true, ..ValidationOptions::default() };

        let error = validate_with(&config, &options).unwrap_err();

        assert_that!(error.message, eq("locales[0].name must be a non-empty string"));
    }

    #[rstest]
    fn rejects_default_outside_locales() {
        let config = json!({ "enabled": true, "default": "fr", "locales": [english()] });

        assert_that!(message(&config), eq("\"default\" must be one of the supported locale codes"));
    }

    #[rstest]
    fn rejects_duplicate_codes() {
        let config = enabled_config(json!([english(), finnish(), english()]));

        let error = validate(&config).unwrap_err();

        assert_that!(error.field_path, eq("locales"));
        assert_that!(error.message, eq("\"locales\" contains duplicate locale codes"));
        assert_that!(error.to_string(), contains_substring("duplicate locale codes"));
    }

    #[rstest]
    fn duplicate_check_can_be_disabled() {
        let config = enabled_config(json!([english(), english()]));
        let options =
            ValidationOptions { check_duplicate_codes: false, ..ValidationOptions::default() };

        assert_that!(validate_with(&config, &options), ok(anything()));
    }

    #[rstest]
    fn default_membership_is_checked_before_duplicates() {
        let config = json!({ "enabled": true, "default": "sv", "locales": [english(), english()] });

        assert_that!(message(&config), eq("\"default\" must be one of the supported locale codes"));
    }

    #[rstest]
    #[case::empty_path(json!({ "enabled": true, "path": "" }))]
    #[case::blank_path(json!({ "enabled": true, "path": "   " }))]
    #[case::missing_path(json!({ "enabled": true }))]
    #[case::numeric_path(json!({ "enabled": true, "path": 7 }))]
    fn rejects_enabled_translations_without_path(#[case] translations: Value) {
        let mut config = enabled_config(json!([english()]));
        config["translations"] = translations;

        assert_that!(
            message(&config),
            eq("\"translations.path\" must be a non-empty string when translations are enabled")
        );
    }

    #[rstest]
    #[case::disabled(json!({ "enabled": false, "path": "" }))]
    #[case::enabled_with_path(json!({ "enabled": true, "path": "src/i18n" }))]
    #[case::without_enabled(json!({ "path": "" }))]
    #[case::syntax_parser(json!({ "enabled": true, "path": "i18n", "parser": "syntax" }))]
    fn accepts_valid_translations(#[case] translations: Value) {
        let mut config = enabled_config(json!([english()]));
        config["translations"] = translations;

        assert_that!(validate(&config), ok(anything()));
    }

    #[rstest]
    #[case::not_an_object(json!("src/i18n"), "\"translations\" must be an object")]
    #[case::enabled_string(json!({ "enabled": "yes" }), "\"translations.enabled\" must be a boolean")]
    #[case::unknown_parser(
        json!({ "enabled": true, "path": "i18n", "parser": "eval" }),
        "\"translations.parser\" must be either \"lexical\" or \"syntax\""
    )]
    #[case::disabled_numeric_path(
        json!({ "enabled": false, "path": 7 }),
        "\"translations.path\" must be a string"
    )]
    #[case::disabled_null_path(json!({ "path": null }), "\"translations.path\" must be a string")]
    #[case::disabled_numeric_parser(
        json!({ "enabled": false, "parser": 1 }),
        "\"translations.parser\" must be either \"lexical\" or \"syntax\""
    )]
    fn rejects_malformed_translations(#[case] translations: Value, #[case] expected: &str) {
        let mut config = enabled_config(json!([english()]));
        config["translations"] = translations;

        assert_that!(message(&config), eq(expected));
    }

    #[rstest]
    fn rejects_non_boolean_prefix_default_locale() {
        let mut config = enabled_config(json!([english()]));
        config["prefixDefaultLocale"] = json!("always");

        assert_that!(message(&config), eq("\"prefixDefaultLocale\" must be a boolean"));
    }
}
