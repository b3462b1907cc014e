use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "png-meta-search")]
#[command(about = "PNGメタデータ（生成パラメータ）キーワード検索ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// フォルダ以下のPNGをメタデータのキーワードで検索
    Search {
        /// 検索フォルダ（省略時は前回のフォルダ）
        folder: Option<PathBuf>,

        /// 包含キーワード（カンマまたは空白区切り）
        #[arg(short = 'k', long = "include", required = true)]
        include: String,

        /// 除外キーワード（カンマまたは空白区切り）
        #[arg(short = 'x', long = "exclude", default_value = "")]
        exclude: String,

        /// 結果をJSONで出力
        #[arg(long)]
        json: bool,

        /// 結果から画像を選んで操作する
        #[arg(short, long, conflicts_with = "json")]
        interactive: bool,
    },

    /// 画像のメタデータを表示
    Metadata {
        /// PNGファイル
        #[arg(required = true)]
        file: PathBuf,
    },

    /// 既定のビューアで開く
    Open {
        #[arg(required = true)]
        file: PathBuf,
    },

    /// ファイルの場所をファイルマネージャで表示
    Reveal {
        #[arg(required = true)]
        file: PathBuf,
    },

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// エラーログの出力先を設定
        #[arg(long)]
        set_error_log: Option<PathBuf>,

        /// 既定の除外キーワードを設定（空文字でクリア）
        #[arg(long)]
        set_default_exclude: Option<String>,

        /// 前回のフォルダを忘れる
        #[arg(long)]
        clear_last_folder: bool,
    },
}
