//! 画像に埋め込まれたテキストメタデータ
//!
//! チャンクの出現順を保つキー/値リスト。同じキーが再度現れた場合は
//! 最初の位置のまま値だけを置き換える。

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: Vec<(String, String)>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// キーと値を追加（既存キーは値を上書き）
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// 検索対象テキスト: 値を順にスペース区切りで連結
    pub fn search_text(&self) -> String {
        self.entries
            .iter()
            .map(|(_, v)| v.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// クリップボード用: `key: value` を改行区切りで連結
    pub fn to_clipboard_text(&self) -> String {
        self.entries
            .iter()
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut metadata = Metadata::new();
        for (k, v) in iter {
            metadata.insert(k, v);
        }
        metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_text_joins_values_in_order() {
        let metadata: Metadata = vec![("prompt", "a red cat"), ("workflow", "{}")].into_iter().collect();
        assert_eq!(metadata.search_text(), "a red cat {}");
    }

    #[test]
    fn test_duplicate_key_keeps_position() {
        let mut metadata = Metadata::new();
        metadata.insert("prompt", "first");
        metadata.insert("seed", "1");
        metadata.insert("prompt", "second");

        assert_eq!(metadata.len(), 2);
        assert_eq!(metadata.get("prompt"), Some("second"));
        let keys: Vec<&str> = metadata.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["prompt", "seed"]);
    }

    #[test]
    fn test_clipboard_text() {
        let metadata: Metadata = vec![("prompt", "cat"), ("seed", "42")].into_iter().collect();
        assert_eq!(metadata.to_clipboard_text(), "prompt: cat\nseed: 42");
    }

    #[test]
    fn test_empty_metadata() {
        let metadata = Metadata::new();
        assert!(metadata.is_empty());
        assert_eq!(metadata.search_text(), "");
        assert_eq!(metadata.to_clipboard_text(), "");
        assert_eq!(metadata.get("prompt"), None);
    }
}
