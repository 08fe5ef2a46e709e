//! 書類ファイルの走査と読み込み
//!
//! - フォルダは直下のみ走査し、対応拡張子のファイルだけを拾う
//! - 明示的に指定されたファイルは拡張子に関係なく受付へ渡す（検証は受付側）

use crate::error::{Result, VinScoutError};
use std::path::{Path, PathBuf};
use vinscout_common::intake::MAX_FILE_SIZE;
use vinscout_common::{DocumentKind, UploadedFile};
use walkdir::WalkDir;

/// 対応拡張子か（大文字小文字を区別しない）
pub fn is_document_extension(ext: &str) -> bool {
    let ext = ext.to_lowercase();
    DocumentKind::ALL.iter().any(|k| k.extension() == ext)
}

/// フォルダ直下の書類を名前順で列挙
pub fn scan_folder(folder: &Path) -> Result<Vec<PathBuf>> {
    if !folder.exists() {
        return Err(VinScoutError::FileNotFound(folder.display().to_string()));
    }

    let mut documents: Vec<PathBuf> = WalkDir::new(folder)
        .max_depth(1) // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file())
        .filter(|p| {
            p.extension()
                .map(|ext| is_document_extension(&ext.to_string_lossy()))
                .unwrap_or(false)
        })
        .collect();

    documents.sort_by_key(|p| file_name(p));

    Ok(documents)
}

/// ファイル・フォルダの指定をファイル一覧に展開
pub fn collect_paths(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            files.extend(scan_folder(path)?);
        } else if path.is_file() {
            files.push(path.clone());
        } else {
            return Err(VinScoutError::FileNotFound(path.display().to_string()));
        }
    }

    Ok(files)
}

/// MIMEタイプを拡張子から推定
pub fn guess_mime_type(path: &Path) -> String {
    mime_guess::from_path(path).first_or_octet_stream().to_string()
}

/// ファイルを読み込んで受付前の `UploadedFile` にする
///
/// 上限を超えるファイルは中身を読まずにサイズだけ持たせる（受付で却下される）。
pub fn load_document(path: &Path) -> Result<UploadedFile> {
    let size = std::fs::metadata(path)?.len();
    let name = file_name(path);
    let mime_type = guess_mime_type(path);

    if size > MAX_FILE_SIZE {
        tracing::debug!(file = %name, size, "上限超過のため読み込みをスキップ");
        return Ok(UploadedFile::with_size(name, mime_type, size));
    }

    let bytes = std::fs::read(path)?;
    Ok(UploadedFile::new(name, mime_type, bytes))
}

/// 指定パスを展開してすべて読み込む
pub fn load_documents(paths: &[PathBuf]) -> Result<Vec<UploadedFile>> {
    collect_paths(paths)?
        .iter()
        .map(|p| load_document(p))
        .collect()
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_is_document_extension() {
        assert!(is_document_extension("pdf"));
        assert!(is_document_extension("PDF"));
        assert!(is_document_extension("docx"));
        assert!(is_document_extension("xls"));
        assert!(!is_document_extension("txt"));
        assert!(!is_document_extension("jpg"));
    }

    #[test]
    fn test_guess_mime_type() {
        assert_eq!(guess_mime_type(Path::new("a.pdf")), "application/pdf");
        assert_eq!(guess_mime_type(Path::new("a.xlsx")), DocumentKind::Xlsx.mime_type());
        assert_eq!(guess_mime_type(Path::new("a.docx")), DocumentKind::Docx.mime_type());
        assert_eq!(guess_mime_type(Path::new("noext")), "application/octet-stream");
    }

    #[test]
    fn test_scan_folder_not_found() {
        let result = scan_folder(Path::new("/nonexistent/folder"));
        assert!(matches!(result, Err(VinScoutError::FileNotFound(_))));
    }

    #[test]
    fn test_scan_folder_filters_and_sorts() {
        let dir = tempdir().expect("Failed to create temp dir");
        File::create(dir.path().join("c.xlsx")).unwrap().write_all(b"x").unwrap();
        File::create(dir.path().join("a.pdf")).unwrap().write_all(b"%PDF").unwrap();
        File::create(dir.path().join("b.DOC")).unwrap().write_all(b"d").unwrap();
        File::create(dir.path().join("notes.txt")).unwrap().write_all(b"t").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        File::create(dir.path().join("sub").join("deep.pdf")).unwrap();

        let result = scan_folder(dir.path()).unwrap();
        let names: Vec<_> = result.iter().map(|p| file_name(p)).collect();
        assert_eq!(names, vec!["a.pdf", "b.DOC", "c.xlsx"]);
    }

    #[test]
    fn test_explicit_file_not_filtered() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("notes.txt");
        File::create(&path).unwrap().write_all(b"text").unwrap();

        let files = load_documents(&[path]).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].mime_type, "text/plain");
        assert_eq!(files[0].bytes, b"text");
    }

    #[test]
    fn test_collect_missing_path() {
        let result = collect_paths(&[PathBuf::from("/nonexistent/file.pdf")]);
        assert!(result.is_err());
    }
}
