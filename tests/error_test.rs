//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use std::path::{Path, PathBuf};
use tempfile::tempdir;
use vinscout::error::VinScoutError;
use vinscout::scanner;
use vinscout_common::{AppState, UploadedFile, ValidationError};

/// 存在しないフォルダをスキャンした場合
#[test]
fn test_scan_nonexistent_folder() {
    let result = scanner::scan_folder(Path::new("/nonexistent/path/12345"));
    assert!(result.is_err());

    let err = result.unwrap_err();
    assert!(matches!(err, VinScoutError::FileNotFound(_)));
}

/// 空のフォルダをスキャンした場合
#[test]
fn test_scan_empty_folder() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = scanner::scan_folder(dir.path());

    // 空フォルダはエラーではなく空のVecを返す
    assert!(result.is_ok());
    assert!(result.unwrap().is_empty());
}

/// 書類のないフォルダをスキャンした場合
#[test]
fn test_scan_folder_no_documents() {
    let dir = tempdir().expect("Failed to create temp dir");

    std::fs::write(dir.path().join("photo.jpg"), "jpeg").unwrap();
    std::fs::write(dir.path().join("data.json"), "{}").unwrap();

    let result = scanner::scan_folder(dir.path());
    assert!(result.unwrap().is_empty());
}

/// 対応外のファイルを明示指定した場合は受付で却下される
#[test]
fn test_unsupported_file_rejected_at_intake() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "hello").unwrap();

    let files = scanner::load_documents(&[path]).unwrap();
    let mut state = AppState::new();
    let (report, notices) = state.upload_files(files);

    assert!(report.accepted.is_empty());
    assert!(matches!(report.rejected[0], ValidationError::UnsupportedType { .. }));
    assert!(notices[0].message.contains("notes.txt"));
    assert!(state.intake().is_empty());
}

/// 存在しないファイルを指定した場合
#[test]
fn test_load_missing_file() {
    let result = scanner::load_documents(&[PathBuf::from("/nonexistent/a.pdf")]);
    assert!(matches!(result, Err(VinScoutError::FileNotFound(_))));
}

/// VinScoutErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        VinScoutError::Config("テスト設定エラー".to_string()),
        VinScoutError::FileNotFound("test.pdf".to_string()),
        VinScoutError::NoDocuments("/path/to/folder".to_string()),
        VinScoutError::NoSessionLog,
        VinScoutError::Prompt("入力中断".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// セッションログなしのメッセージ確認
#[test]
fn test_no_session_log_message() {
    let display = format!("{}", VinScoutError::NoSessionLog);
    assert!(display.contains("vinscout process"));
}

/// エラーのDebug実装確認
#[test]
fn test_error_debug() {
    let err = VinScoutError::Config("テスト".to_string());
    let debug = format!("{:?}", err);

    assert!(debug.contains("Config"));
    assert!(debug.contains("テスト"));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: VinScoutError = io_err.into();

    assert!(matches!(err, VinScoutError::Io(_)));
    let display = format!("{}", err);
    assert!(display.contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: VinScoutError = json_err.into();

    assert!(matches!(err, VinScoutError::JsonParse(_)));
}

/// 検証エラーからの変換（共通エラー経由）
#[test]
fn test_validation_error_conversion() {
    let err: VinScoutError = ValidationError::InvalidIdentifier("ABC".to_string()).into();

    assert!(matches!(err, VinScoutError::Common(_)));
    // 透過的エラーなのでメッセージがそのまま表示される
    assert!(format!("{}", err).contains("ABC"));
}

/// 受付時の検証エラーがファイルを追加しないこと
#[test]
fn test_oversized_file_rejected() {
    let mut state = AppState::new();
    let huge = UploadedFile::with_size("scan.pdf", "application/pdf", 60 * 1024 * 1024);
    let (report, _) = state.upload_files(vec![huge]);

    assert!(matches!(report.rejected[0], ValidationError::FileTooLarge { .. }));
    assert!(state.intake().is_empty());
}
