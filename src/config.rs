//! i18n configuration: typed model, schema validation and file loading.
/// Config file loader
mod loader;
/// Configuration types and errors
mod types;
/// Schema validation of raw configuration values
mod validator;

pub use loader::{
    CONFIG_FILE_NAME,
    load_from_project,
    parse_config_text,
};
pub use types::{
    ConfigError,
    Configuration,
    LocaleDescriptor,
    SchemaError,
    TextDirection,
    TranslationConfig,
};
pub use validator::{
    ValidationOptions,
    validate,
    validate_with,
};
