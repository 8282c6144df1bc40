use crate::error::{LensError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// APIベースURLを上書きする環境変数
pub const API_URL_ENV: &str = "WASTE_LENS_API_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    pub timeout_seconds: u64,
    /// JPEG品質 (1-100)
    pub jpeg_quality: u8,
    /// 静止画を標準出力に書き出す撮影コマンド
    pub camera_command: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8000".into(),
            timeout_seconds: 20,
            jpeg_quality: 80,
            camera_command: vec![
                "fswebcam".into(),
                "--no-banner".into(),
                "-q".into(),
                "--jpeg".into(),
                "95".into(),
                "-".into(),
            ],
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| LensError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("waste-lens").join("config.json"))
    }

    /// APIベースURL（環境変数を優先、末尾の `/` は除去）
    pub fn api_base_url(&self) -> String {
        let url = match std::env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => url,
            _ => self.api_base_url.clone(),
        };
        url.trim().trim_end_matches('/').to_string()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    fn validate(&self) -> Result<()> {
        if self.timeout_seconds == 0 {
            return Err(LensError::Config("timeout_seconds は1以上にしてください".into()));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(LensError::Config(format!(
                "jpeg_quality は1-100の範囲で指定してください: {}",
                self.jpeg_quality
            )));
        }
        Ok(())
    }

    pub fn set_api_base_url(&mut self, url: String) {
        self.api_base_url = url;
    }

    pub fn set_timeout_seconds(&mut self, seconds: u64) {
        self.timeout_seconds = seconds;
    }

    /// 空白区切りのコマンド文字列を設定
    pub fn set_camera_command(&mut self, command: &str) {
        self.camera_command = command.split_whitespace().map(str::to_string).collect();
    }
}
