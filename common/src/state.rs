//! アプリケーション状態
//!
//! 画面（Web）とCLIが共有する単一の状態オブジェクト。変更はすべて名前付きの
//! 遷移関数を通す。タイマーによる進捗の進行は呼び出し側（ドライバ）が担当し、
//! ここでは1ティック分の遷移だけを提供する。
//!
//! ```text
//! upload_files → advance_uploads*
//! begin_extraction → (advance_extraction* → complete_file_extraction)* → finish_extraction
//! request_decode ─┬─ Ready ──────────────────────────┐
//!                 └─ NeedsConfirmation → resolve_dialog ┴→ begin_decode → advance_decode* → complete_decode
//! ```
//!
//! 抽出中に「抽出してからデコード」を選ぶとデコードは予約され、抽出の完了後に
//! `take_queued_decode` で取り出す。

use crate::admin::{ActivityLog, AdminSettings, LogLevel};
use crate::error::ValidationError;
use crate::export::{ExportBundle, LogExport, EXPORT_NOTICE, LOGS_NOTICE};
use crate::extraction::{DocumentExtractor, EXTRACT_PROGRESS_STEP};
use crate::identifier::Identifier;
use crate::insurance::{CoverageTerms, InsuranceFormData};
use crate::intake::{IntakeBuffer, IntakeReport, UploadedFile};
use crate::ledger::ExtractedFiles;
use crate::notice::Notice;
use crate::vehicle::{VehicleDecoder, VehicleId, VehicleRecord, VehicleSpec, VehicleStore, DECODE_PROGRESS_STEP};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde_json::json;

/// デコード要求の判定結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeGate {
    /// すぐにデコードできる（対象の識別子）
    Ready(Vec<String>),
    /// 未抽出のファイルがある（確認ダイアログを開いた）
    NeedsConfirmation,
    /// デコード中
    Busy,
}

/// 確認ダイアログでの選択
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogChoice {
    DecodeAnyway,
    ExtractThenDecode,
    Dismiss,
}

/// 確認ダイアログを閉じた後に行うこと
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogOutcome {
    /// 現在の識別子でデコード
    Decode,
    /// 抽出を最後まで行ってからデコード
    ExtractThenDecode,
    /// 何もしない
    Nothing,
}

/// アプリケーション状態
#[derive(Debug, Clone, Default)]
pub struct AppState {
    intake: IntakeBuffer,
    extracted: ExtractedFiles,
    vehicles: VehicleStore,
    form: InsuranceFormData,
    settings: AdminSettings,
    log: ActivityLog,
    is_extracting: bool,
    is_decoding: bool,
    decode_progress: u8,
    /// デコード開始時点の全体条件
    decode_coverage: Option<CoverageTerms>,
    dialog_open: bool,
    /// 抽出完了後に行うデコードの予約
    decode_queued: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: AdminSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    // ============================================
    // 参照
    // ============================================

    pub fn intake(&self) -> &IntakeBuffer {
        &self.intake
    }

    pub fn extracted(&self) -> &ExtractedFiles {
        &self.extracted
    }

    pub fn vehicles(&self) -> &[VehicleRecord] {
        self.vehicles.vehicles()
    }

    pub fn vehicle_store(&self) -> &VehicleStore {
        &self.vehicles
    }

    pub fn form(&self) -> &InsuranceFormData {
        &self.form
    }

    pub fn settings(&self) -> &AdminSettings {
        &self.settings
    }

    pub fn log(&self) -> &ActivityLog {
        &self.log
    }

    pub fn is_extracting(&self) -> bool {
        self.is_extracting
    }

    pub fn is_decoding(&self) -> bool {
        self.is_decoding
    }

    pub fn decode_progress(&self) -> u8 {
        self.decode_progress
    }

    pub fn dialog_open(&self) -> bool {
        self.dialog_open
    }

    pub fn decode_queued(&self) -> bool {
        self.decode_queued
    }

    /// 抽出ボタンを押せるか
    pub fn can_extract(&self) -> bool {
        !self.is_extracting && !self.intake.is_empty()
    }

    /// デコードボタンを押せるか
    pub fn can_decode(&self) -> bool {
        !self.is_decoding && self.extracted.has_extracted_data()
    }

    // ============================================
    // ファイル受付
    // ============================================

    /// ファイルを受け付け、却下分の通知を返す
    pub fn upload_files(&mut self, files: Vec<UploadedFile>) -> (IntakeReport, Vec<Notice>) {
        let report = self.intake.add_files(files);

        for id in &report.accepted {
            if let Some(file) = self.intake.get(*id) {
                self.log.push(
                    LogLevel::Info,
                    "File uploaded",
                    json!({ "fileName": file.name, "fileSize": file.size, "mimeType": file.mime_type }),
                );
            }
        }
        for error in &report.rejected {
            self.log.push(LogLevel::Error, "File rejected", json!({ "reason": error.to_string() }));
        }

        let notices = report.rejected.iter().map(Notice::from).collect();
        (report, notices)
    }

    /// 疑似アップロード進捗を1ティック進める
    pub fn advance_uploads<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        self.intake.advance_uploads(rng)
    }

    // ============================================
    // 抽出
    // ============================================

    /// 抽出を開始し、処理対象レコードの位置を返す
    ///
    /// 抽出中、またはファイルが1件もない場合は None。
    pub fn begin_extraction(&mut self) -> Option<Vec<usize>> {
        if !self.can_extract() {
            return None;
        }

        self.is_extracting = true;
        self.extracted.snapshot_for_extraction(self.intake.files());
        self.log.push(
            LogLevel::Info,
            "Document processing started",
            json!({ "fileCount": self.intake.len() }),
        );

        Some(self.extracted.uploaded_records().map(|(i, _)| i).collect())
    }

    /// 1ファイルの抽出進捗を1ティック進める
    pub fn advance_extraction(&mut self, index: usize) -> u8 {
        self.extracted
            .get_mut(index)
            .map(|r| r.advance(EXTRACT_PROGRESS_STEP))
            .unwrap_or(100)
    }

    /// 抽出器を呼んで1ファイル分を確定
    pub fn extract_file<E>(&mut self, index: usize, extractor: &mut E) -> bool
    where
        E: DocumentExtractor + ?Sized,
    {
        let Some(file) = self.extracted.get(index).and_then(|r| r.file()).cloned() else {
            return false;
        };
        let identifiers = extractor.extract(&file);
        self.complete_file_extraction(index, identifiers)
    }

    /// 1ファイル分の結果を確定
    pub fn complete_file_extraction(&mut self, index: usize, identifiers: Vec<String>) -> bool {
        let Some(record) = self.extracted.get_mut(index) else {
            return false;
        };
        record.finish(identifiers);

        let name = record.display_name().to_string();
        let count = record.identifiers.len();
        if count > 0 {
            self.log.push(
                LogLevel::Success,
                "VIN extracted successfully",
                json!({ "fileName": name, "identifiers": record.identifiers.clone() }),
            );
        } else {
            self.log.push(LogLevel::Warn, "No identifiers found", json!({ "fileName": name }));
        }
        true
    }

    pub fn finish_extraction(&mut self) {
        self.is_extracting = false;
    }

    /// タイマーなしで抽出を最後まで実行
    pub fn run_extraction<E>(&mut self, extractor: &mut E) -> bool
    where
        E: DocumentExtractor + ?Sized,
    {
        let Some(indices) = self.begin_extraction() else {
            return false;
        };
        for index in indices {
            while self.advance_extraction(index) < 100 {}
            self.extract_file(index, extractor);
        }
        self.finish_extraction();
        true
    }

    // ============================================
    // 手動入力・編集
    // ============================================

    pub fn add_manual_identifier(&mut self, input: &str) -> Result<Identifier, ValidationError> {
        match self.extracted.add_manual(input) {
            Ok(identifier) => {
                self.log.push(
                    LogLevel::Info,
                    "Manual vehicle added",
                    json!({ "identifier": identifier.value, "kind": identifier.kind.as_str() }),
                );
                Ok(identifier)
            }
            Err(e) => {
                self.log.push(LogLevel::Warn, "Manual entry rejected", json!({ "input": input }));
                Err(e)
            }
        }
    }

    pub fn remove_manual_identifier(&mut self, value: &str) -> bool {
        self.extracted.remove_manual(value)
    }

    pub fn update_extracted_identifier(&mut self, file_index: usize, identifier_index: usize, value: String) -> bool {
        self.extracted.update_identifier(file_index, identifier_index, value)
    }

    // ============================================
    // デコード
    // ============================================

    /// 抽出が終わっていないファイル（レコードなし、または処理中）
    pub fn unextracted_files(&self) -> Vec<&UploadedFile> {
        self.intake
            .files()
            .filter(|f| {
                self.extracted
                    .record_for(f.id)
                    .map_or(true, |r| r.is_processing())
            })
            .collect()
    }

    /// デコード要求（未抽出のファイルがあれば確認ダイアログを開く）
    pub fn request_decode(&mut self) -> DecodeGate {
        if self.is_decoding {
            return DecodeGate::Busy;
        }
        if !self.unextracted_files().is_empty() {
            self.dialog_open = true;
            return DecodeGate::NeedsConfirmation;
        }
        DecodeGate::Ready(self.extracted.all_identifiers())
    }

    /// 確認ダイアログを閉じる
    pub fn resolve_dialog(&mut self, choice: DialogChoice) -> DialogOutcome {
        if !self.dialog_open {
            return DialogOutcome::Nothing;
        }
        self.dialog_open = false;

        match choice {
            DialogChoice::DecodeAnyway => {
                self.decode_queued = false;
                DialogOutcome::Decode
            }
            DialogChoice::ExtractThenDecode => {
                self.decode_queued = true;
                DialogOutcome::ExtractThenDecode
            }
            DialogChoice::Dismiss => DialogOutcome::Nothing,
        }
    }

    /// 予約されたデコードを取り出す（抽出中は取り出さない）
    pub fn take_queued_decode(&mut self) -> bool {
        if !self.decode_queued || self.is_extracting {
            return false;
        }
        self.decode_queued = false;
        true
    }

    /// デコードを開始し、対象の識別子を返す
    ///
    /// 識別子がない、デコード中、または予約したデコードが抽出の完了待ちなら None。
    pub fn begin_decode(&mut self) -> Option<Vec<String>> {
        if self.is_decoding || (self.decode_queued && self.is_extracting) {
            return None;
        }
        let identifiers = self.extracted.all_identifiers();
        if identifiers.is_empty() {
            return None;
        }

        self.is_decoding = true;
        self.decode_queued = false;
        self.decode_progress = 0;
        self.decode_coverage = Some(self.form.coverage.clone());
        self.log.push(
            LogLevel::Info,
            "Vehicle decoding started",
            json!({ "identifierCount": identifiers.len() }),
        );
        Some(identifiers)
    }

    pub fn advance_decode(&mut self) -> u8 {
        if self.is_decoding {
            self.decode_progress = self.decode_progress.saturating_add(DECODE_PROGRESS_STEP).min(100);
        }
        self.decode_progress
    }

    /// デコード結果で車両一覧を置き換える
    pub fn complete_decode(&mut self, identifiers: &[String], specs: Vec<VehicleSpec>) {
        let coverage = self
            .decode_coverage
            .take()
            .unwrap_or_else(|| self.form.coverage.clone());
        self.vehicles.replace_from(identifiers, specs, &coverage);

        self.is_decoding = false;
        self.decode_progress = 0;
        self.log.push(
            LogLevel::Success,
            "Vehicles decoded",
            json!({ "vehicleCount": self.vehicles.len() }),
        );
    }

    /// タイマーなしでデコードを最後まで実行
    pub fn run_decode<D>(&mut self, decoder: &mut D) -> bool
    where
        D: VehicleDecoder + ?Sized,
    {
        let Some(identifiers) = self.begin_decode() else {
            return false;
        };
        while self.advance_decode() < 100 {}
        let specs = decoder.decode(&identifiers);
        self.complete_decode(&identifiers, specs);
        true
    }

    // ============================================
    // 車両・保険フォーム
    // ============================================

    pub fn toggle_individual_coverage(&mut self, id: VehicleId) -> Option<bool> {
        self.vehicles.toggle_individual_coverage(id, &self.form)
    }

    pub fn update_vehicle<F>(&mut self, id: VehicleId, edit: F) -> bool
    where
        F: FnOnce(&mut VehicleRecord),
    {
        self.vehicles.update(id, edit)
    }

    pub fn update_vehicle_insurance<F>(&mut self, id: VehicleId, edit: F) -> bool
    where
        F: FnOnce(&mut CoverageTerms),
    {
        self.vehicles.update_individual(id, edit)
    }

    pub fn update_form<F>(&mut self, edit: F)
    where
        F: FnOnce(&mut InsuranceFormData),
    {
        edit(&mut self.form);
    }

    pub fn effective_coverage(&self, id: VehicleId) -> Option<&CoverageTerms> {
        self.vehicles.effective_coverage(id, &self.form)
    }

    // ============================================
    // エクスポート・管理
    // ============================================

    /// 現在のフォームと車両一覧をエクスポート
    pub fn export_bundle(&mut self, now: DateTime<Utc>) -> (ExportBundle, Notice) {
        let bundle = ExportBundle::new(&self.form, self.vehicles.vehicles(), now);
        self.log.push(
            LogLevel::Info,
            EXPORT_NOTICE,
            json!({ "vehicleCount": bundle.vehicles.len() }),
        );
        (bundle, Notice::success(EXPORT_NOTICE))
    }

    pub fn log_export(&self, now: DateTime<Utc>) -> (LogExport, Notice) {
        (LogExport::new(self.log.entries(), now), Notice::success(LOGS_NOTICE))
    }

    pub fn save_settings(&mut self, settings: AdminSettings) -> Notice {
        self.settings = settings;
        self.log.push(
            LogLevel::Info,
            "Settings saved",
            serde_json::to_value(&self.settings).unwrap_or_default(),
        );
        Notice::success("Settings saved")
    }
}
