//! 設定ファイルの読み込み関数

use std::path::Path;

use jsonc_parser::ParseOptions;
use serde_json::Value;

use super::ConfigError;

/// Configuration file name looked up at the project root.
pub const CONFIG_FILE_NAME: &str = "i18n.config.json";

/// プロジェクトから設定を読み込む
///
/// `i18n.config.json` を探して読み込む。コメントと末尾カンマを許可する。
///
/// # Returns
/// - `Ok(Some(value))`: 設定ファイルが見つかり、読み込みに成功
/// - `Ok(None)`: 設定ファイルが見つからない
/// - `Err(ConfigError)`: ファイル読み込みまたはパースエラー
pub fn load_from_project(project_root: &Path) -> Result<Option<Value>, ConfigError> {
    let config_path = project_root.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(&config_path)?;
    let value = parse_config_text(&content)?.ok_or(ConfigError::Empty(config_path))?;

    Ok(Some(value))
}

/// Parses JSON-with-comments configuration text into a raw value.
pub fn parse_config_text(text: &str) -> Result<Option<Value>, ConfigError> {
    jsonc_parser::parse_to_serde_value(text, &ParseOptions::default())
        .map_err(|e| ConfigError::Syntax(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    /// `load_from_project`: 設定ファイルが存在する場合
    #[rstest]
    fn test_load_from_project_with_valid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_content = r#"{
            // i18n disabled while the site is English only
            "enabled": false,
            "default": "en",
        }"#;
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), config_content).unwrap();

        let value = load_from_project(temp_dir.path()).unwrap().unwrap();

        assert_that!(value["enabled"].as_bool(), some(eq(false)));
        assert_that!(value["default"].as_str(), some(eq("en")));
    }

    /// `load_from_project`: 設定ファイルが存在しない場合
    #[rstest]
    fn test_load_from_project_no_config_file() {
        let temp_dir = TempDir::new().unwrap();

        let result = load_from_project(temp_dir.path());

        assert!(result.is_ok());
        assert!(result.unwrap().is_none());
    }

    /// `load_from_project`: パースエラー
    #[rstest]
    fn test_load_from_project_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "{ \"enabled\": ").unwrap();

        let result = load_from_project(temp_dir.path());

        assert!(matches!(result, Err(ConfigError::Syntax(_))));
    }

    /// `load_from_project`: 空のファイル
    #[rstest]
    fn test_load_from_project_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "// nothing yet\n").unwrap();

        let result = load_from_project(temp_dir.path());

        assert!(matches!(result, Err(ConfigError::Empty(_))));
    }
}
