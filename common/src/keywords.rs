//! キーワード入力の分割
//!
//! 入力欄の生テキストをカンマ・空白の連続で区切り、空トークンを捨てる。

use regex::Regex;

lazy_static::lazy_static! {
    static ref SEPARATOR_RE: Regex = Regex::new(r"[,\s]+").unwrap();
}

/// 生テキストをキーワードリストに変換
pub fn parse_keywords(raw: &str) -> Vec<String> {
    SEPARATOR_RE
        .split(raw.trim())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commas_and_spaces() {
        assert_eq!(parse_keywords("cat, dog  fish,,"), vec!["cat", "dog", "fish"]);
    }

    #[test]
    fn test_parse_mixed_separators() {
        assert_eq!(parse_keywords(" ,red\tcat\n,blue "), vec!["red", "cat", "blue"]);
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse_keywords("").is_empty());
        assert!(parse_keywords("  , ,, ").is_empty());
    }

    #[test]
    fn test_parse_keeps_punctuation_inside_tokens() {
        assert_eq!(parse_keywords("c++ (masterpiece:1.2)"), vec!["c++", "(masterpiece:1.2)"]);
    }
}
