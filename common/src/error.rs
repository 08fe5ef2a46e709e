//! エラー型定義

use thiserror::Error;

/// 入力検証エラー
///
/// UIでは自動で消える通知として表示し、入力はどのコレクションにも追加しない。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Unsupported file type: {name} ({mime_type})")]
    UnsupportedType { name: String, mime_type: String },

    #[error("File too large: {name} ({size} bytes, limit {limit} bytes)")]
    FileTooLarge { name: String, size: u64, limit: u64 },

    #[error("Enter a VIN or license plate")]
    EmptyInput,

    #[error("Invalid VIN or license plate: {0}")]
    InvalidIdentifier(String),
}

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
