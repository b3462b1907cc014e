//! OS シェル連携
//!
//! 既定ビューアで開く・ファイルマネージャで場所を表示する。
//! プラットフォームごとの実装は起動時に `platform_shell` で1回だけ選ぶ。

use crate::error::{Result, SearchError};
use std::path::Path;
use std::process::Command;

pub trait ShellActions {
    /// 既定のビューアで開く
    fn open_file(&self, path: &Path) -> Result<()> {
        ensure_exists(path)?;
        open::that(path).map_err(|e| SearchError::Shell(format!("{}: {}", path.display(), e)))
    }

    /// ファイルマネージャで場所を表示（可能ならファイルを選択状態にする）
    fn reveal_in_folder(&self, path: &Path) -> Result<()>;

    fn name(&self) -> &'static str;
}

pub struct WindowsShell;
pub struct MacShell;
pub struct LinuxShell;

impl ShellActions for WindowsShell {
    fn reveal_in_folder(&self, path: &Path) -> Result<()> {
        ensure_exists(path)?;
        // explorer は成功時も非0を返すことがあるので終了コードは見ない
        Command::new("explorer")
            .arg(format!("/select,{}", path.display()))
            .spawn()
            .map(|_| ())
            .map_err(|e| SearchError::Shell(format!("explorer: {}", e)))
    }

    fn name(&self) -> &'static str {
        "windows"
    }
}

impl ShellActions for MacShell {
    fn reveal_in_folder(&self, path: &Path) -> Result<()> {
        ensure_exists(path)?;
        Command::new("open")
            .arg("-R")
            .arg(path)
            .spawn()
            .map(|_| ())
            .map_err(|e| SearchError::Shell(format!("open -R: {}", e)))
    }

    fn name(&self) -> &'static str {
        "macos"
    }
}

impl ShellActions for LinuxShell {
    fn reveal_in_folder(&self, path: &Path) -> Result<()> {
        ensure_exists(path)?;
        let parent = path
            .parent()
            .ok_or_else(|| SearchError::Shell(format!("親フォルダがありません: {}", path.display())))?;
        Command::new("xdg-open")
            .arg(parent)
            .spawn()
            .map(|_| ())
            .map_err(|e| SearchError::Shell(format!("xdg-open: {}", e)))
    }

    fn name(&self) -> &'static str {
        "linux"
    }
}

/// 実行中のプラットフォームの実装を返す
pub fn platform_shell() -> Box<dyn ShellActions> {
    if cfg!(target_os = "windows") {
        Box::new(WindowsShell)
    } else if cfg!(target_os = "macos") {
        Box::new(MacShell)
    } else {
        Box::new(LinuxShell)
    }
}

fn ensure_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(SearchError::FileNotFound(path.display().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_shell_matches_target() {
        let shell = platform_shell();
        if cfg!(target_os = "windows") {
            assert_eq!(shell.name(), "windows");
        } else if cfg!(target_os = "macos") {
            assert_eq!(shell.name(), "macos");
        } else {
            assert_eq!(shell.name(), "linux");
        }
    }

    #[test]
    fn test_missing_file_is_rejected() {
        let missing = Path::new("/nonexistent/png-meta/missing.png");
        for shell in [&WindowsShell as &dyn ShellActions, &MacShell, &LinuxShell] {
            assert!(matches!(shell.open_file(missing), Err(SearchError::FileNotFound(_))));
            assert!(matches!(shell.reveal_in_folder(missing), Err(SearchError::FileNotFound(_))));
        }
    }
}
