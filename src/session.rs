//! 対話式の結果操作
//!
//! 検索結果から画像を選び、開く・場所を表示・パス表示・メタデータ表示を行う。

use crate::error::{Result, SearchError};
use crate::error_log::ErrorSink;
use crate::scanner::load_metadata;
use crate::shell::ShellActions;
use dialoguer::Select;
use png_meta_search_common::SearchOutcome;
use std::path::Path;

/// 選んだ画像への操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultAction {
    /// 既定のビューアで開く
    Open,
    /// フォルダで表示
    Reveal,
    /// パスを表示
    PrintPath,
    /// メタデータを表示
    PrintMetadata,
    /// 一覧に戻る
    Back,
}

impl ResultAction {
    pub const ALL: [ResultAction; 5] = [
        ResultAction::Open,
        ResultAction::Reveal,
        ResultAction::PrintPath,
        ResultAction::PrintMetadata,
        ResultAction::Back,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ResultAction::Open => "Open in Default Viewer",
            ResultAction::Reveal => "Open Containing Folder (Highlight File)",
            ResultAction::PrintPath => "Copy File Path",
            ResultAction::PrintMetadata => "Copy Metadata",
            ResultAction::Back => "Back",
        }
    }
}

/// 一覧表示用のラベル（検索フォルダからの相対パス）
pub fn result_label(folder: &Path, path: &Path) -> String {
    path.strip_prefix(folder)
        .unwrap_or(path)
        .display()
        .to_string()
}

/// メタデータ表示用テキスト
pub fn metadata_text(path: &Path, sink: &dyn ErrorSink) -> Option<String> {
    let metadata = load_metadata(path, sink);
    if metadata.is_empty() {
        None
    } else {
        Some(metadata.to_clipboard_text())
    }
}

/// 1つの操作を実行して、表示するテキストを返す
pub fn apply_action(
    action: ResultAction,
    path: &Path,
    shell: &dyn ShellActions,
    sink: &dyn ErrorSink,
) -> Result<Option<String>> {
    match action {
        ResultAction::Open => shell.open_file(path).map(|_| None).map_err(|e| {
            sink.record("open_image_viewer", &e);
            e
        }),
        ResultAction::Reveal => shell.reveal_in_folder(path).map(|_| None).map_err(|e| {
            sink.record("show_in_explorer", &e);
            e
        }),
        ResultAction::PrintPath => Ok(Some(path.display().to_string())),
        ResultAction::PrintMetadata => Ok(Some(
            metadata_text(path, sink).unwrap_or_else(|| NO_METADATA_MESSAGE.to_string()),
        )),
        ResultAction::Back => Ok(None),
    }
}

pub const NO_METADATA_MESSAGE: &str = "No metadata found for this image.";

/// 対話ループ
pub fn run_interactive(
    folder: &Path,
    outcome: &SearchOutcome,
    shell: &dyn ShellActions,
    sink: &dyn ErrorSink,
) -> Result<()> {
    if outcome.is_empty() {
        return Ok(());
    }

    let labels: Vec<String> = outcome
        .matches
        .iter()
        .map(|p| result_label(folder, p))
        .collect();
    let action_labels: Vec<&str> = ResultAction::ALL.iter().map(|a| a.label()).collect();
    let mut selected = 0;

    loop {
        let Some(index) = Select::new()
            .with_prompt("画像を選択 (Esc/q で終了)")
            .items(&labels)
            .default(selected)
            .interact_opt()
            .map_err(|e| SearchError::Prompt(e.to_string()))?
        else {
            break;
        };
        selected = index;
        let path = &outcome.matches[index];

        let Some(choice) = Select::new()
            .with_prompt(labels[index].as_str())
            .items(&action_labels)
            .default(0)
            .interact_opt()
            .map_err(|e| SearchError::Prompt(e.to_string()))?
        else {
            continue;
        };

        match apply_action(ResultAction::ALL[choice], path, shell, sink) {
            Ok(Some(text)) => println!("{}\n", text),
            Ok(None) => {}
            Err(e) => println!("✖ {}\n", e),
        }
    }

    Ok(())
}
