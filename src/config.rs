use crate::error::{Result, VinScoutError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use vinscout_common::{AdminSettings, LogEntry};

/// CLI設定（~/.config/vinscout/config.json）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// 管理パネルの設定
    #[serde(flatten)]
    pub settings: AdminSettings,
    /// 進捗の待ち時間を省略
    pub fast: bool,
    /// 疑似抽出の成功率
    pub extraction_success_rate: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            settings: AdminSettings::default(),
            fast: false,
            extraction_success_rate: 0.8,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// 指定パスから読み込み（なければ既定値）
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| VinScoutError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join(vinscout_common::PRODUCT_NAME))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// 直近の `process` 実行のアクティビティログ
    pub fn session_log_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("last-session.json"))
    }
}

/// セッションログを保存
pub fn save_session_log(path: &Path, entries: &[LogEntry]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(entries)?)?;
    Ok(())
}

/// セッションログを読み込み
pub fn load_session_log(path: &Path) -> Result<Vec<LogEntry>> {
    if !path.exists() {
        return Err(VinScoutError::NoSessionLog);
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
