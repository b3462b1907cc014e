use png_meta_search::common::SearchOutcome;
use std::path::{Path, PathBuf};

/// 直近の検索結果と選択位置
///
/// 検索のたびに丸ごと置き換える。選択に依存する操作（プレビュー・開く・コピー）は
/// すべてこのセッションを受け取って動く。
#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    pub folder: PathBuf,
    pub outcome: SearchOutcome,
    pub selected_index: Option<usize>,
}

impl SearchSession {
    pub fn new(folder: PathBuf, outcome: SearchOutcome) -> Self {
        let selected_index = if outcome.matches.is_empty() { None } else { Some(0) };
        Self { folder, outcome, selected_index }
    }

    pub fn len(&self) -> usize {
        self.outcome.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcome.matches.is_empty()
    }

    pub fn selected_path(&self) -> Option<&Path> {
        self.selected_index
            .and_then(|i| self.outcome.matches.get(i))
            .map(|p| p.as_path())
    }

    pub fn select(&mut self, index: usize) {
        if index < self.len() {
            self.selected_index = Some(index);
        }
    }

    /// 下へ移動（末尾で止まる）
    pub fn select_next(&mut self) {
        if self.is_empty() {
            return;
        }
        let next = match self.selected_index {
            Some(i) => (i + 1).min(self.len() - 1),
            None => 0,
        };
        self.selected_index = Some(next);
    }

    /// 上へ移動（先頭で止まる）
    pub fn select_previous(&mut self) {
        if self.is_empty() {
            return;
        }
        let prev = self.selected_index.map_or(0, |i| i.saturating_sub(1));
        self.selected_index = Some(prev);
    }

    pub fn file_name(&self, index: usize) -> String {
        self.outcome
            .matches
            .get(index)
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    pub fn summary(&self) -> String {
        self.outcome.summary()
    }
}

pub const NO_SELECTION_MESSAGE: &str = "No file selected.";

/// 検索前（セッション無し）も含めて選択中のパスを返す
pub fn selection(session: Option<&SearchSession>) -> Option<&Path> {
    session.and_then(SearchSession::selected_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(n: usize) -> SearchSession {
        let outcome = SearchOutcome {
            matches: (0..n).map(|i| PathBuf::from(format!("/out/sub/{}.png", i))).collect(),
            excluded_count: 2,
            ..Default::default()
        };
        SearchSession::new(PathBuf::from("/out"), outcome)
    }

    #[test]
    fn test_first_match_selected() {
        let s = session(3);
        assert_eq!(s.selected_index, Some(0));
        assert_eq!(s.selected_path(), Some(Path::new("/out/sub/0.png")));
        assert_eq!(s.summary(), "Results found: 3 | Excluded: 2");
    }

    #[test]
    fn test_empty_session_has_no_selection() {
        let mut s = session(0);
        assert_eq!(s.selected_index, None);
        s.select_next();
        s.select_previous();
        assert_eq!(s.selected_index, None);
        assert!(s.selected_path().is_none());
    }

    #[test]
    fn test_navigation_is_clamped() {
        let mut s = session(3);
        s.select_previous();
        assert_eq!(s.selected_index, Some(0));
        s.select_next();
        s.select_next();
        s.select_next();
        assert_eq!(s.selected_index, Some(2));
        s.select_previous();
        assert_eq!(s.selected_index, Some(1));
    }

    #[test]
    fn test_select_out_of_range_is_ignored() {
        let mut s = session(2);
        s.select(1);
        assert_eq!(s.selected_index, Some(1));
        s.select(5);
        assert_eq!(s.selected_index, Some(1));
    }

    #[test]
    fn test_file_name() {
        let s = session(2);
        assert_eq!(s.file_name(1), "1.png");
        assert_eq!(s.file_name(9), "");
    }

    #[test]
    fn test_selection_without_session() {
        assert!(selection(None).is_none());

        let empty = session(0);
        assert!(selection(Some(&empty)).is_none());

        let s = session(2);
        assert_eq!(selection(Some(&s)), Some(Path::new("/out/sub/0.png")));
    }
}
