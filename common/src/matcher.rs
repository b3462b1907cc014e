//! 単語単位のキーワード照合
//!
//! 包含キーワードは1本の選言パターン、除外キーワードは1語ごとのパターンに
//! コンパイルする。どちらも大文字小文字を区別せず、キーワードはリテラルとして
//! エスケープしてから `\b` で囲む。

use crate::error::Result;
use regex::{Regex, RegexBuilder};

/// 1ファイル分の判定結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// 結果リストに載せる
    Matched,
    /// 包含キーワードに一致しない（除外件数には数えない）
    NotIncluded,
    /// 除外キーワードに一致
    Excluded,
}

#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    include: Option<Regex>,
    exclude: Vec<Regex>,
}

impl KeywordMatcher {
    /// キーワードリストから照合器を構築
    ///
    /// 空白のみのキーワードは無視する。包含キーワードが1つも残らなければ
    /// すべてのテキストが包含段階を通過する。
    pub fn new<S: AsRef<str>>(include: &[S], exclude: &[S]) -> Result<Self> {
        let included: Vec<String> = include
            .iter()
            .map(|w| w.as_ref().trim())
            .filter(|w| !w.is_empty())
            .map(regex::escape)
            .collect();

        let include = if included.is_empty() {
            None
        } else {
            Some(whole_word(&included.join("|"))?)
        };

        let exclude = exclude
            .iter()
            .map(|w| w.as_ref().trim())
            .filter(|w| !w.is_empty())
            .map(|w| whole_word(&regex::escape(w)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { include, exclude })
    }

    pub fn has_include(&self) -> bool {
        self.include.is_some()
    }

    pub fn exclude_len(&self) -> usize {
        self.exclude.len()
    }

    /// 包含パターンに一致するか（パターンが無ければ常に true）
    pub fn is_included(&self, text: &str) -> bool {
        self.include.as_ref().map_or(true, |re| re.is_match(text))
    }

    /// いずれかの除外パターンに一致するか
    pub fn is_excluded(&self, text: &str) -> bool {
        self.exclude.iter().any(|re| re.is_match(text))
    }

    /// 包含 → 除外の順に判定
    pub fn classify(&self, text: &str) -> Verdict {
        if !self.is_included(text) {
            Verdict::NotIncluded
        } else if self.is_excluded(text) {
            Verdict::Excluded
        } else {
            Verdict::Matched
        }
    }
}

fn whole_word(alternation: &str) -> Result<Regex> {
    let re = RegexBuilder::new(&format!(r"\b(?:{})\b", alternation))
        .case_insensitive(true)
        .build()?;
    Ok(re)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(include: &[&str], exclude: &[&str]) -> KeywordMatcher {
        KeywordMatcher::new(include, exclude).unwrap()
    }

    #[test]
    fn test_whole_word_only() {
        let m = matcher(&["cat"], &[]);
        assert!(!m.is_included("a catalog of cats"));

        let m = matcher(&["cats"], &[]);
        assert!(m.is_included("a catalog of cats"));
    }

    #[test]
    fn test_case_insensitive() {
        let m = matcher(&["SEED"], &[]);
        assert!(m.is_included("seed: 12345"));
    }

    #[test]
    fn test_any_include_keyword_matches() {
        let m = matcher(&["dog", "cat"], &[]);
        assert!(m.is_included("a red cat"));
        assert!(m.is_included("a blue dog"));
        assert!(!m.is_included("a green frog"));
    }

    #[test]
    fn test_exclude_takes_precedence() {
        let m = matcher(&["cat"], &["blurry", "red"]);
        assert_eq!(m.classify("a red cat, negative: blurry"), Verdict::Excluded);
        assert_eq!(m.classify("a white cat"), Verdict::Matched);
        assert_eq!(m.classify("a white dog"), Verdict::NotIncluded);
    }

    #[test]
    fn test_exclude_is_whole_word() {
        let m = matcher(&["cat"], &["red"]);
        assert_eq!(m.classify("a cat, redshift"), Verdict::Matched);
    }

    #[test]
    fn test_empty_include_passes_everything() {
        let m = matcher(&["", "   "], &[]);
        assert!(!m.has_include());
        assert_eq!(m.classify(""), Verdict::Matched);
    }

    #[test]
    fn test_blank_exclude_ignored() {
        let m = matcher(&["cat"], &["", " \t"]);
        assert_eq!(m.exclude_len(), 0);
        assert_eq!(m.classify("cat"), Verdict::Matched);
    }

    #[test]
    fn test_keywords_are_literal() {
        let m = matcher(&["c++"], &[]);
        assert!(!m.is_included("cccc"));

        let m = matcher(&["a.b"], &[]);
        assert!(m.is_included("value a.b here"));
        assert!(!m.is_included("value axb here"));
    }

    #[test]
    fn test_keywords_are_trimmed() {
        let m = matcher(&["  cat "], &[" blurry "]);
        assert_eq!(m.classify("cat, blurry"), Verdict::Excluded);
    }
}
