//! エラーログ
//!
//! 失敗した操作を追記専用のテキストファイルに残す。プログラム自身は
//! このファイルを読み返さない。

use chrono::Local;
use std::cell::RefCell;
use std::fmt::Display;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const DEFAULT_ERROR_LOG: &str = "error_log.txt";

/// 操作の失敗を受け取る先
pub trait ErrorSink {
    fn record(&self, context: &str, detail: &dyn Display);
}

/// 追記専用のエラーログファイル
#[derive(Debug, Clone)]
pub struct ErrorLog {
    path: PathBuf,
}

impl ErrorLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, context: &str, detail: &dyn Display) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        write!(file, "{}", format_entry(context, detail))?;
        Ok(())
    }
}

impl Default for ErrorLog {
    fn default() -> Self {
        Self::new(DEFAULT_ERROR_LOG)
    }
}

impl ErrorSink for ErrorLog {
    fn record(&self, context: &str, detail: &dyn Display) {
        log::error!("{}: {}", context, detail);
        if let Err(e) = self.append(context, detail) {
            log::warn!("エラーログに書き込めません ({}): {}", self.path.display(), e);
        }
    }
}

/// メモリ上に記録するシンク（ログファイルを持たない呼び出し元とテスト用）
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: RefCell<Vec<(String, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(String, String)> {
        self.entries.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl ErrorSink for MemorySink {
    fn record(&self, context: &str, detail: &dyn Display) {
        self.entries
            .borrow_mut()
            .push((context.to_string(), detail.to_string()));
    }
}

fn format_entry(context: &str, detail: &dyn Display) -> String {
    format!(
        "\n[{}] ERROR in {}\n{}\n",
        Local::now().format("%Y-%m-%d %H:%M:%S"),
        context,
        detail
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_format() {
        let entry = format_entry("extract_metadata", &"broken header");
        let lines: Vec<&str> = entry.split('\n').collect();
        assert_eq!(lines[0], "");
        assert!(lines[1].starts_with('['));
        assert!(lines[1].ends_with("] ERROR in extract_metadata"));
        // [YYYY-MM-DD HH:MM:SS]
        assert_eq!(lines[1].find(']'), Some(20));
        assert_eq!(lines[2], "broken header");
    }

    #[test]
    fn test_memory_sink_records() {
        let sink = MemorySink::new();
        assert!(sink.is_empty());
        sink.record("show_in_explorer", &"no such file");
        assert_eq!(sink.len(), 1);
        assert_eq!(
            sink.entries()[0],
            ("show_in_explorer".to_string(), "no such file".to_string())
        );
    }
}
