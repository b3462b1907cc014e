use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("入力エラー: {0}")]
    InvalidInput(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("メタデータ読み込みエラー: {0}")]
    MetadataRead(String),

    #[error("シェル操作エラー: {0}")]
    Shell(String),

    #[error("キーワード照合エラー: {0}")]
    Matcher(#[from] png_meta_search_common::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("対話入力エラー: {0}")]
    Prompt(String),
}

pub type Result<T> = std::result::Result<T, SearchError>;
