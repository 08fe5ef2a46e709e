//! VinScout Common Library
//!
//! CLIとWeb(WASM)で共有されるドメインロジック:
//! ファイル受付 → 抽出 → 手動入力 → デコード → 保険フォーム編集 → エクスポート

pub mod admin;
pub mod error;
pub mod export;
pub mod extraction;
pub mod i18n;
pub mod identifier;
pub mod insurance;
pub mod intake;
pub mod ledger;
pub mod notice;
pub mod state;
pub mod vehicle;

pub use admin::{ActivityLog, AdminSettings, LogEntry, LogLevel};
pub use error::{Error, Result, ValidationError};
pub use export::{ExportBundle, LogExport};
pub use extraction::{DocumentExtractor, ExtractedFileRecord, ExtractionStatus, MockExtractor, RecordSource};
pub use i18n::Language;
pub use identifier::{Identifier, IdentifierKind};
pub use insurance::{CoverageTerms, InsuranceFormData, WindowsCoverage};
pub use intake::{DocumentKind, FileId, IntakeBuffer, IntakeReport, UploadedFile};
pub use ledger::ExtractedFiles;
pub use notice::{Notice, NoticeLevel};
pub use state::{AppState, DecodeGate, DialogChoice, DialogOutcome};
pub use vehicle::{MockDecoder, VehicleDecoder, VehicleId, VehicleRecord, VehicleSpec, VehicleStore};

/// ファイル名・UIで使う製品名
pub const PRODUCT_NAME: &str = "vinscout";
