//! Aggregation of per-locale translation tables.
pub mod loader;
pub mod types;

pub use loader::{
    TranslationSource,
    load_all,
    load_locale,
    resolve_source,
};
pub use types::{
    LoadCause,
    LoadError,
};
