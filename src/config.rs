use crate::error::{Result, SearchError};
use crate::error_log::{ErrorLog, DEFAULT_ERROR_LOG};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 前回検索したフォルダ
    pub last_folder: Option<PathBuf>,
    /// エラーログの出力先
    pub error_log: PathBuf,
    /// 常に追加する除外キーワード
    pub default_exclude: Vec<String>,
    /// プレビュー画像の最大辺(px)
    pub preview_max_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            last_folder: None,
            error_log: PathBuf::from(DEFAULT_ERROR_LOG),
            default_exclude: Vec::new(),
            preview_max_size: 1024,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// 読めない設定ファイルやホームディレクトリ不在は警告して既定値で続行する
    pub fn load_or_default() -> Self {
        match Self::config_path() {
            Ok(path) => Self::load_or_default_from(&path),
            Err(e) => {
                log::warn!("設定を読み込めないため既定値を使います: {}", e);
                Self::default()
            }
        }
    }

    pub fn load_or_default_from(config_path: &Path) -> Self {
        Self::load_from(config_path).unwrap_or_else(|e| {
            log::warn!("設定を読み込めないため既定値を使います ({}): {}", config_path.display(), e);
            Self::default()
        })
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| SearchError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("png-meta-search").join("config.json"))
    }

    pub fn error_log(&self) -> ErrorLog {
        ErrorLog::new(self.error_log.clone())
    }

    /// 入力された除外キーワードに既定の除外キーワードを足す
    pub fn merged_exclude(&self, exclude: Vec<String>) -> Vec<String> {
        let mut merged = exclude;
        for word in &self.default_exclude {
            if !merged.iter().any(|w| w.eq_ignore_ascii_case(word)) {
                merged.push(word.clone());
            }
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_returns_default() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.error_log, PathBuf::from("error_log.txt"));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            last_folder: Some(PathBuf::from("/tmp/outputs")),
            default_exclude: vec!["nsfw".into()],
            ..Default::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"default_exclude": ["blurry"]}"#).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.default_exclude, vec!["blurry"]);
        assert_eq!(loaded.preview_max_size, 1024);
        assert!(loaded.last_folder.is_none());
    }

    #[test]
    fn test_invalid_json_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{").unwrap();

        assert!(matches!(Config::load_from(&path), Err(SearchError::JsonParse(_))));
    }

    #[test]
    fn test_corrupt_file_falls_back_and_is_overwritten() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{").unwrap();

        let mut config = Config::load_or_default_from(&path);
        assert_eq!(config, Config::default());

        config.last_folder = None;
        config.default_exclude = vec!["blurry".into()];
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.default_exclude, vec!["blurry"]);
    }

    #[test]
    fn test_merged_exclude() {
        let config = Config {
            default_exclude: vec!["blurry".into(), "NSFW".into()],
            ..Default::default()
        };
        let merged = config.merged_exclude(vec!["nsfw".into()]);
        assert_eq!(merged, vec!["nsfw", "blurry"]);
    }
}
