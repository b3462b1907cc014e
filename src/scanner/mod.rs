//! ディレクトリ走査
//!
//! 対象フォルダ以下を再帰的にたどり、拡張子 `.png`（大文字小文字不問）の
//! ファイルを走査順に列挙する。

mod png_text;

pub use png_text::{extract_metadata, load_metadata};

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const PNG_SUFFIX: &str = ".png";

/// ファイル名が `.png` で終わるか
pub fn is_png_name(file_name: &str) -> bool {
    file_name.to_lowercase().ends_with(PNG_SUFFIX)
}

/// フォルダ以下の PNG ファイルを列挙
///
/// 各ディレクトリではファイルを先に返し、その後サブディレクトリへ降りる。
/// フォルダが存在しない・読めない場合は何も返さない。
pub fn find_png_files(folder: &Path) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(folder)
        .sort_by(|a, b| a.file_type().is_dir().cmp(&b.file_type().is_dir()))
        .into_iter()
        .filter_map(|e| e.ok())
        // 読めないファイル（壊れたシンボリックリンク等）も残し、読み込み時に記録させる
        .filter(|entry| entry.depth() > 0 && !entry.path().is_dir())
        .filter(|entry| is_png_name(&entry.file_name().to_string_lossy()))
        .map(|entry| entry.into_path())
}
