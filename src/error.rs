use thiserror::Error;

#[derive(Error, Debug)]
pub enum VinScoutError {
    #[error(transparent)]
    Common(#[from] vinscout_common::Error),

    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("書類が見つかりません: {0}")]
    NoDocuments(String),

    #[error("セッションログがありません。先に `vinscout process` を実行してください")]
    NoSessionLog,

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

impl From<vinscout_common::ValidationError> for VinScoutError {
    fn from(error: vinscout_common::ValidationError) -> Self {
        VinScoutError::Common(error.into())
    }
}

pub type Result<T> = std::result::Result<T, VinScoutError>;
