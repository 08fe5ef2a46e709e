//! 抽出ステージ
//!
//! ファイルごとの状態遷移: `Processing → {Success, Error}`
//!
//! 進捗は表示用で、実処理とは連動しない。100%到達時に抽出器を呼び、
//! 識別子が1件以上なら Success、0件なら Error（「見つからなかった」）で確定する。

use crate::intake::{FileId, UploadedFile};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 抽出進捗の増分
pub const EXTRACT_PROGRESS_STEP: u8 = 10;

/// 抽出進捗の更新間隔
pub const EXTRACT_TICK: Duration = Duration::from_millis(200);

/// 手動入力用の疑似ファイル名
pub const MANUAL_ENTRY_NAME: &str = "Manual Entry";

/// 書類から識別子を抽出する機能（本番ではOCRエンジン）
pub trait DocumentExtractor {
    fn extract(&mut self, file: &UploadedFile) -> Vec<String>;
}

/// 抽出状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionStatus {
    Processing,
    Success,
    Error,
}

impl ExtractionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionStatus::Processing => "processing",
            ExtractionStatus::Success => "success",
            ExtractionStatus::Error => "error",
        }
    }
}

/// 抽出レコードの元
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type", content = "file")]
pub enum RecordSource {
    Upload(UploadedFile),
    ManualEntry,
}

/// ファイル1件分の抽出結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedFileRecord {
    pub source: RecordSource,
    pub status: ExtractionStatus,
    pub progress: u8,
    pub identifiers: Vec<String>,
}

impl ExtractedFileRecord {
    /// 抽出開始時のレコード
    pub fn processing(file: UploadedFile) -> Self {
        Self {
            source: RecordSource::Upload(file),
            status: ExtractionStatus::Processing,
            progress: 0,
            identifiers: Vec::new(),
        }
    }

    /// 手動入力レコード（最初の識別子とともに作成）
    pub fn manual(identifier: String) -> Self {
        Self {
            source: RecordSource::ManualEntry,
            status: ExtractionStatus::Success,
            progress: 100,
            identifiers: vec![identifier],
        }
    }

    pub fn is_manual(&self) -> bool {
        matches!(self.source, RecordSource::ManualEntry)
    }

    pub fn file(&self) -> Option<&UploadedFile> {
        match &self.source {
            RecordSource::Upload(file) => Some(file),
            RecordSource::ManualEntry => None,
        }
    }

    pub fn file_id(&self) -> Option<FileId> {
        self.file().map(|f| f.id)
    }

    pub fn display_name(&self) -> &str {
        match &self.source {
            RecordSource::Upload(file) => &file.name,
            RecordSource::ManualEntry => MANUAL_ENTRY_NAME,
        }
    }

    pub fn is_processing(&self) -> bool {
        self.status == ExtractionStatus::Processing
    }

    /// 進捗を進める（処理中のみ、100で頭打ち、減少しない）
    pub fn advance(&mut self, step: u8) -> u8 {
        if self.is_processing() {
            self.progress = self.progress.saturating_add(step).min(100);
        }
        self.progress
    }

    /// 結果を確定
    pub fn finish(&mut self, identifiers: Vec<String>) {
        self.progress = 100;
        self.status = if identifiers.is_empty() {
            ExtractionStatus::Error
        } else {
            ExtractionStatus::Success
        };
        self.identifiers = identifiers;
    }
}

/// PDFから得られる疑似結果
pub const MOCK_PDF_IDENTIFIERS: &[&str] = &["WBAVA31030NL12345"];

/// PDF以外（Word/Excel）から得られる疑似結果
pub const MOCK_OTHER_IDENTIFIERS: &[&str] = &["WBAVA31030NL12345", "1HGBH41JXMN109186", "ABC-1234"];

/// 疑似抽出器
///
/// 一定確率で成功し、PDFならVIN 1件、それ以外はVIN 2件 + プレート1件を返す。
pub struct MockExtractor<R: Rng> {
    rng: R,
    success_rate: f64,
}

impl<R: Rng> MockExtractor<R> {
    pub const DEFAULT_SUCCESS_RATE: f64 = 0.8;

    pub fn new(rng: R) -> Self {
        Self::with_success_rate(rng, Self::DEFAULT_SUCCESS_RATE)
    }

    pub fn with_success_rate(rng: R, success_rate: f64) -> Self {
        Self {
            rng,
            success_rate: success_rate.clamp(0.0, 1.0),
        }
    }
}

impl<R: Rng> DocumentExtractor for MockExtractor<R> {
    fn extract(&mut self, file: &UploadedFile) -> Vec<String> {
        if !self.rng.gen_bool(self.success_rate) {
            return Vec::new();
        }

        let identifiers = if file.is_pdf() {
            MOCK_PDF_IDENTIFIERS
        } else {
            MOCK_OTHER_IDENTIFIERS
        };
        identifiers.iter().map(|s| s.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::DocumentKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn file(kind: DocumentKind) -> UploadedFile {
        UploadedFile::with_size(format!("doc.{}", kind.extension()), kind.mime_type(), 10)
    }

    #[test]
    fn test_advance_is_monotonic_and_clamped() {
        let mut record = ExtractedFileRecord::processing(file(DocumentKind::Pdf));
        let mut last = 0;
        for _ in 0..15 {
            let now = record.advance(EXTRACT_PROGRESS_STEP);
            assert!(now >= last);
            last = now;
        }
        assert_eq!(record.progress, 100);
        assert!(record.is_processing());
    }

    #[test]
    fn test_finish_sets_status() {
        let mut ok = ExtractedFileRecord::processing(file(DocumentKind::Pdf));
        ok.finish(vec!["WBAVA31030NL12345".to_string()]);
        assert_eq!(ok.status, ExtractionStatus::Success);

        let mut none = ExtractedFileRecord::processing(file(DocumentKind::Pdf));
        none.finish(Vec::new());
        assert_eq!(none.status, ExtractionStatus::Error);
        assert_eq!(none.progress, 100);
    }

    #[test]
    fn test_advance_after_finish_is_noop() {
        let mut record = ExtractedFileRecord::processing(file(DocumentKind::Pdf));
        record.advance(30);
        record.finish(Vec::new());
        assert_eq!(record.advance(10), 100);
    }

    #[test]
    fn test_mock_extractor_pdf_vs_other() {
        let mut extractor = MockExtractor::with_success_rate(StdRng::seed_from_u64(1), 1.0);
        assert_eq!(extractor.extract(&file(DocumentKind::Pdf)).len(), 1);
        assert_eq!(extractor.extract(&file(DocumentKind::Xlsx)).len(), 3);
        assert_eq!(extractor.extract(&file(DocumentKind::Docx)).len(), 3);
    }

    #[test]
    fn test_mock_extractor_failure() {
        let mut extractor = MockExtractor::with_success_rate(StdRng::seed_from_u64(1), 0.0);
        assert!(extractor.extract(&file(DocumentKind::Pdf)).is_empty());
    }

    #[test]
    fn test_manual_record() {
        let record = ExtractedFileRecord::manual("AB12345".to_string());
        assert!(record.is_manual());
        assert_eq!(record.display_name(), MANUAL_ENTRY_NAME);
        assert_eq!(record.file_id(), None);
        assert_eq!(record.status, ExtractionStatus::Success);
    }
}
