//! site-i18n
//!
//! 静的サイト向けのロケール設定検証と翻訳ファイル読み込み

pub mod config;
pub mod context;
pub mod indexer;
pub mod input;
pub mod runtime;
pub mod syntax;

pub use context::{
    BuildContext,
    BuildError,
    InjectedGlobals,
};
pub use runtime::Locale;
