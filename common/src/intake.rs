//! ファイル受付バッファ
//!
//! アップロードされた書類（PDF/Word/Excel）を検証し、セッション中メモリに保持する。
//! 受理されたファイルは既存の内容に追記される（置き換えない）。

use crate::error::ValidationError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// アップロード上限（50 MiB）
pub const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// 疑似アップロード進捗の更新間隔
pub const UPLOAD_TICK: Duration = Duration::from_millis(200);

/// 疑似アップロード進捗の1回あたりの増分（範囲）
pub const UPLOAD_STEP_MIN: u8 = 5;
pub const UPLOAD_STEP_MAX: u8 = 25;

/// 受理する書類の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Doc,
    Docx,
    Xls,
    Xlsx,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 5] = [
        DocumentKind::Pdf,
        DocumentKind::Doc,
        DocumentKind::Docx,
        DocumentKind::Xls,
        DocumentKind::Xlsx,
    ];

    pub fn mime_type(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "application/pdf",
            DocumentKind::Doc => "application/msword",
            DocumentKind::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            DocumentKind::Xls => "application/vnd.ms-excel",
            DocumentKind::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Doc => "doc",
            DocumentKind::Docx => "docx",
            DocumentKind::Xls => "xls",
            DocumentKind::Xlsx => "xlsx",
        }
    }

    /// 一覧表示用アイコン
    pub fn icon(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "📄",
            DocumentKind::Doc | DocumentKind::Docx => "📝",
            DocumentKind::Xls | DocumentKind::Xlsx => "📊",
        }
    }

    pub fn from_mime(mime_type: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.mime_type() == mime_type)
    }

    /// ファイル選択ダイアログの accept 属性
    pub fn accept_attribute() -> String {
        Self::ALL
            .iter()
            .map(|k| format!(".{}", k.extension()))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// セッション内で一意なファイルID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FileId(pub u64);

/// アップロードされたファイル
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub id: FileId,
    pub name: String,
    pub mime_type: String,
    pub size: u64,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// 受付前のファイル（IDは受付時に採番）
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        let size = bytes.len() as u64;
        Self {
            id: FileId(0),
            name: name.into(),
            mime_type: mime_type.into(),
            size,
            bytes,
        }
    }

    /// 中身を持たないファイル（ブラウザでサイズだけ分かっている場合など）
    pub fn with_size(name: impl Into<String>, mime_type: impl Into<String>, size: u64) -> Self {
        Self {
            id: FileId(0),
            name: name.into(),
            mime_type: mime_type.into(),
            size,
            bytes: Vec::new(),
        }
    }

    pub fn kind(&self) -> Option<DocumentKind> {
        DocumentKind::from_mime(&self.mime_type)
    }

    pub fn is_pdf(&self) -> bool {
        self.kind() == Some(DocumentKind::Pdf)
    }

    /// 表示用サイズ（MB、小数2桁）
    pub fn size_mb(&self) -> String {
        format!("{:.2} MB", self.size as f64 / 1024.0 / 1024.0)
    }
}

/// 種類・サイズを検証
pub fn validate(name: &str, mime_type: &str, size: u64) -> Result<DocumentKind, ValidationError> {
    let kind = DocumentKind::from_mime(mime_type).ok_or_else(|| ValidationError::UnsupportedType {
        name: name.to_string(),
        mime_type: mime_type.to_string(),
    })?;

    if size > MAX_FILE_SIZE {
        return Err(ValidationError::FileTooLarge {
            name: name.to_string(),
            size,
            limit: MAX_FILE_SIZE,
        });
    }

    Ok(kind)
}

/// 受付バッファの1エントリ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeEntry {
    pub file: UploadedFile,
    pub upload_progress: u8,
}

impl IntakeEntry {
    pub fn is_uploaded(&self) -> bool {
        self.upload_progress >= 100
    }
}

/// 受付結果
#[derive(Debug, Default)]
pub struct IntakeReport {
    pub accepted: Vec<FileId>,
    pub rejected: Vec<ValidationError>,
}

/// ファイル受付バッファ
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntakeBuffer {
    entries: Vec<IntakeEntry>,
    next_id: u64,
}

impl IntakeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 検証を通ったファイルだけを末尾に追加
    pub fn add_files(&mut self, files: Vec<UploadedFile>) -> IntakeReport {
        let mut report = IntakeReport::default();

        for mut file in files {
            match validate(&file.name, &file.mime_type, file.size) {
                Ok(_) => {
                    self.next_id += 1;
                    file.id = FileId(self.next_id);
                    report.accepted.push(file.id);
                    self.entries.push(IntakeEntry { file, upload_progress: 0 });
                }
                Err(e) => report.rejected.push(e),
            }
        }

        report
    }

    /// 疑似アップロード進捗を1ティック進める
    ///
    /// 戻り値: まだアップロード中のファイルがあるか
    pub fn advance_uploads<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        let mut pending = false;
        for entry in self.entries.iter_mut().filter(|e| !e.is_uploaded()) {
            let step = rng.gen_range(UPLOAD_STEP_MIN..=UPLOAD_STEP_MAX);
            entry.upload_progress = entry.upload_progress.saturating_add(step).min(100);
            pending |= !entry.is_uploaded();
        }
        pending
    }

    pub fn is_uploading(&self) -> bool {
        self.entries.iter().any(|e| !e.is_uploaded())
    }

    pub fn entries(&self) -> &[IntakeEntry] {
        &self.entries
    }

    pub fn files(&self) -> impl Iterator<Item = &UploadedFile> {
        self.entries.iter().map(|e| &e.file)
    }

    pub fn get(&self, id: FileId) -> Option<&UploadedFile> {
        self.files().find(|f| f.id == id)
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
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pdf(name: &str, size: u64) -> UploadedFile {
        UploadedFile::with_size(name, DocumentKind::Pdf.mime_type(), size)
    }

    #[test]
    fn test_validate_allow_list() {
        for kind in DocumentKind::ALL {
            assert_eq!(validate("a", kind.mime_type(), 10), Ok(kind));
        }
        assert!(matches!(
            validate("photo.jpg", "image/jpeg", 10),
            Err(ValidationError::UnsupportedType { .. })
        ));
    }

    #[test]
    fn test_validate_size_ceiling() {
        assert!(validate("ok.pdf", "application/pdf", MAX_FILE_SIZE).is_ok());
        assert!(matches!(
            validate("big.pdf", "application/pdf", MAX_FILE_SIZE + 1),
            Err(ValidationError::FileTooLarge { .. })
        ));
    }

    #[test]
    fn test_add_files_rejects_invalid() {
        let mut buffer = IntakeBuffer::new();
        let report = buffer.add_files(vec![
            pdf("ok.pdf", 100),
            UploadedFile::with_size("notes.txt", "text/plain", 10),
            pdf("huge.pdf", MAX_FILE_SIZE + 1),
        ]);

        assert_eq!(report.accepted.len(), 1);
        assert_eq!(report.rejected.len(), 2);
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.entries()[0].file.name, "ok.pdf");
    }

    #[test]
    fn test_add_files_appends() {
        let mut buffer = IntakeBuffer::new();
        buffer.add_files(vec![pdf("a.pdf", 1)]);
        buffer.add_files(vec![pdf("b.pdf", 1)]);

        let names: Vec<_> = buffer.files().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.pdf", "b.pdf"]);
        assert_ne!(buffer.entries()[0].file.id, buffer.entries()[1].file.id);
    }

    #[test]
    fn test_advance_uploads_reaches_100() {
        let mut buffer = IntakeBuffer::new();
        buffer.add_files(vec![pdf("a.pdf", 1), pdf("b.pdf", 1)]);
        let mut rng = StdRng::seed_from_u64(7);

        let mut ticks = 0;
        let mut last = vec![0u8; 2];
        while buffer.advance_uploads(&mut rng) {
            let now: Vec<u8> = buffer.entries().iter().map(|e| e.upload_progress).collect();
            assert!(now.iter().zip(&last).all(|(n, l)| n >= l), "進捗が減少した");
            last = now;
            ticks += 1;
            assert!(ticks < 100, "終わらない");
        }

        assert!(buffer.entries().iter().all(|e| e.upload_progress == 100));
        assert!(!buffer.is_uploading());
    }

    #[test]
    fn test_accept_attribute() {
        assert_eq!(DocumentKind::accept_attribute(), ".pdf,.doc,.docx,.xls,.xlsx");
    }

    #[test]
    fn test_uploaded_file_bytes_not_serialized() {
        let file = UploadedFile::new("a.pdf", "application/pdf", vec![1, 2, 3]);
        assert_eq!(file.size, 3);
        let json = serde_json::to_string(&file).expect("シリアライズ失敗");
        assert!(json.contains("\"mimeType\":\"application/pdf\""));
        assert!(!json.contains("bytes"));
    }
}
