//! Translation inputs: source file kinds and parsed tables.
pub mod source;
pub mod translation;

pub use source::SourceKind;
pub use translation::{
    TranslationSet,
    TranslationTable,
};
