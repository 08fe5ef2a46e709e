//! 管理パネル: システム設定とアクティビティログ

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// システム設定（表示のみ、パイプラインには未接続）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdminSettings {
    /// OCR信頼度のしきい値（0-10）
    pub confidence_threshold: f32,
    /// 最大ファイルサイズ（MB）
    pub max_file_size_mb: u32,
    /// Tesseract言語データのパス
    pub tess_data_path: String,
}

impl Default for AdminSettings {
    fn default() -> Self {
        Self {
            confidence_threshold: 2.5,
            max_file_size_mb: 50,
            tess_data_path: "/usr/share/tessdata".into(),
        }
    }
}

/// ログレベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Info,
    Warn,
    Success,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Success => "SUCCESS",
            LogLevel::Error => "ERROR",
        }
    }
}

/// ログ1件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    pub details: serde_json::Value,
}

/// セッションのアクティビティログ（追記のみ）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityLog {
    entries: Vec<LogEntry>,
    next_id: u64,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, level: LogLevel, message: impl Into<String>, details: serde_json::Value) -> &LogEntry {
        self.push_at(Utc::now(), level, message, details)
    }

    /// 時刻指定で追加（テスト・再生用）
    pub fn push_at(
        &mut self,
        timestamp: DateTime<Utc>,
        level: LogLevel,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> &LogEntry {
        self.next_id += 1;
        self.entries.push(LogEntry {
            id: self.next_id,
            timestamp,
            level,
            message: message.into(),
            details,
        });
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_settings_default() {
        let settings = AdminSettings::default();
        assert!((settings.confidence_threshold - 2.5).abs() < f32::EPSILON);
        assert_eq!(settings.max_file_size_mb, 50);
    }

    #[test]
    fn test_settings_partial_deserialize() {
        let settings: AdminSettings =
            serde_json::from_str(r#"{"maxFileSizeMb": 20}"#).expect("デシリアライズ失敗");
        assert_eq!(settings.max_file_size_mb, 20);
        assert_eq!(settings.tess_data_path, "/usr/share/tessdata");
    }

    #[test]
    fn test_log_ids_increase() {
        let mut log = ActivityLog::new();
        log.push(LogLevel::Info, "Document processing started", json!({ "fileName": "a.pdf" }));
        log.push(LogLevel::Success, "VIN extracted", json!({}));

        let ids: Vec<_> = log.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_log_entry_serialize() {
        let mut log = ActivityLog::new();
        let ts = DateTime::parse_from_rfc3339("2025-01-18T10:00:00Z").unwrap().with_timezone(&Utc);
        log.push_at(ts, LogLevel::Warn, "OCR confidence below threshold", json!({ "confidence": 2.1 }));

        let json = serde_json::to_string(&log.entries()[0]).expect("シリアライズ失敗");
        assert!(json.contains("\"level\":\"WARN\""));
        assert!(json.contains("\"timestamp\":\"2025-01-18T10:00:00Z\""));
        assert!(json.contains("\"confidence\":2.1"));
    }
}
