//! 検索結果の型定義

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 1回の検索の結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// 一致した画像パス（走査順）
    pub matches: Vec<PathBuf>,

    /// 除外キーワードで除かれた件数
    pub excluded_count: usize,

    /// 包含キーワードに一致しなかった件数
    #[serde(default)]
    pub not_included_count: usize,

    /// 走査した .png ファイル数
    #[serde(default)]
    pub scanned: usize,
}

impl SearchOutcome {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// 件数表示用サマリー
    pub fn summary(&self) -> String {
        format!(
            "Results found: {} | Excluded: {}",
            self.matches.len(),
            self.excluded_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary() {
        let outcome = SearchOutcome {
            matches: vec![PathBuf::from("a.png")],
            excluded_count: 1,
            not_included_count: 1,
            scanned: 3,
        };
        assert_eq!(outcome.summary(), "Results found: 1 | Excluded: 1");
    }

    #[test]
    fn test_json_field_names() {
        let outcome = SearchOutcome {
            matches: vec![PathBuf::from("a.png")],
            excluded_count: 2,
            ..Default::default()
        };
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["matches"][0], "a.png");
        assert_eq!(value["excluded_count"], 2);
        assert_eq!(value["not_included_count"], 0);
    }
}
