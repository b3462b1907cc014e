//! メタデータ検索エンジン
//!
//! フォルダ以下の PNG を走査順に1枚ずつ読み、テキストメタデータの値を
//! 連結した文字列に対して包含・除外キーワードを単語単位で照合する。

use crate::error::{Result, SearchError};
use crate::error_log::ErrorSink;
use crate::scanner::{find_png_files, load_metadata};
use png_meta_search_common::{parse_keywords, KeywordMatcher, SearchOutcome, Verdict};
use std::path::{Path, PathBuf};

/// フォルダを検索
///
/// 1ファイルの読み込み失敗は `sink` に記録し、メタデータ無しとして扱う。
/// 走査そのものが中断されることはない。
pub fn search_images<S: AsRef<str>>(
    folder: &Path,
    include_keywords: &[S],
    exclude_keywords: &[S],
    sink: &dyn ErrorSink,
) -> Result<SearchOutcome> {
    search_images_with_progress(folder, include_keywords, exclude_keywords, sink, |_| {})
}

/// 1ファイルごとに `on_file` を呼びながら検索
pub fn search_images_with_progress<S, F>(
    folder: &Path,
    include_keywords: &[S],
    exclude_keywords: &[S],
    sink: &dyn ErrorSink,
    mut on_file: F,
) -> Result<SearchOutcome>
where
    S: AsRef<str>,
    F: FnMut(&Path),
{
    let matcher = KeywordMatcher::new(include_keywords, exclude_keywords)?;
    let mut outcome = SearchOutcome::default();

    for path in find_png_files(folder) {
        on_file(&path);
        outcome.scanned += 1;

        let text = load_metadata(&path, sink).search_text();

        match matcher.classify(&text) {
            Verdict::NotIncluded => outcome.not_included_count += 1,
            Verdict::Excluded => {
                log::debug!("除外: {}", path.display());
                outcome.excluded_count += 1;
            }
            Verdict::Matched => {
                log::debug!("一致: {}", path.display());
                outcome.matches.push(path);
            }
        }
    }

    log::info!(
        "{}: {}枚中 {}件一致, {}件除外",
        folder.display(),
        outcome.scanned,
        outcome.matches.len(),
        outcome.excluded_count
    );

    Ok(outcome)
}

/// 入力欄から組み立てた検索条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub folder: PathBuf,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl SearchRequest {
    /// 生の入力から検索条件を作る
    ///
    /// フォルダ未指定、または包含キーワードが1つも無い場合は入力エラー。
    pub fn from_input(folder: Option<PathBuf>, include_raw: &str, exclude_raw: &str) -> Result<Self> {
        let include = parse_keywords(include_raw);
        let exclude = parse_keywords(exclude_raw);

        let folder = folder.filter(|f| !f.as_os_str().is_empty());
        match folder {
            Some(folder) if !include.is_empty() => Ok(Self { folder, include, exclude }),
            _ => Err(SearchError::InvalidInput(INPUT_ERROR_MESSAGE.to_string())),
        }
    }

    pub fn run(&self, sink: &dyn ErrorSink) -> Result<SearchOutcome> {
        search_images(&self.folder, &self.include, &self.exclude, sink)
    }
}

pub const INPUT_ERROR_MESSAGE: &str =
    "Choose a folder and enter at least one include keyword.";
