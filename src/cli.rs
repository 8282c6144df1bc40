use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "waste-lens")]
#[command(about = "撮影・アップロードした物品の分別・廃棄方法を調べる", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 分類APIのベースURL（設定ファイルより優先）
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像ファイルをアップロードして分類
    Classify {
        /// 画像ファイルのパス
        #[arg(required = true)]
        file: PathBuf,
    },

    /// カメラで1枚撮影して分類
    Capture,

    /// 撮影・アップロード・撮り直しを対話的に繰り返す
    Interactive,

    /// 設定を表示/編集
    Config {
        /// APIベースURLを設定
        #[arg(long)]
        set_api_url: Option<String>,

        /// タイムアウト秒数を設定
        #[arg(long)]
        set_timeout: Option<u64>,

        /// 撮影コマンドを設定（空白区切り）
        #[arg(long)]
        set_camera_command: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// 対話モードのメニュー項目
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Capture,
    Upload,
    Retake,
    Quit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 4] = [
        MenuAction::Capture,
        MenuAction::Upload,
        MenuAction::Retake,
        MenuAction::Quit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::Capture => "Capture Image",
            MenuAction::Upload => "Upload Image",
            MenuAction::Retake => "Retake Photo",
            MenuAction::Quit => "Quit",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_classify() {
        let cli = Cli::try_parse_from(["waste-lens", "-v", "classify", "bottle.jpg"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Classify { file } => assert_eq!(file, PathBuf::from("bottle.jpg")),
            _ => panic!("expected classify"),
        }
    }

    #[test]
    fn test_parse_config() {
        let cli = Cli::try_parse_from([
            "waste-lens",
            "config",
            "--set-timeout",
            "30",
            "--show",
        ])
        .unwrap();
        match cli.command {
            Commands::Config { set_timeout, show, set_api_url, .. } => {
                assert_eq!(set_timeout, Some(30));
                assert!(show);
                assert!(set_api_url.is_none());
            }
            _ => panic!("expected config"),
        }
    }

    #[test]
    fn test_menu_labels_unique() {
        let labels: std::collections::HashSet<_> =
            MenuAction::ALL.iter().map(MenuAction::label).collect();
        assert_eq!(labels.len(), MenuAction::ALL.len());
    }
}
