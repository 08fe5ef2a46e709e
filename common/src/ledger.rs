//! 抽出結果一覧と手動入力台帳
//!
//! 手動入力は「Manual Entry」という中身のない疑似ファイルとして、
//! アップロードファイルの抽出結果と同じ一覧に保持する。
//! - 最初の手動識別子の追加時に作成
//! - 識別子が0件になったらレコードごと削除
//! - 再抽出しても消えない（新しいスナップショットの末尾にそのまま残る）

use crate::error::ValidationError;
use crate::extraction::ExtractedFileRecord;
use crate::identifier::{self, Identifier};
use crate::intake::{FileId, UploadedFile};
use serde::{Deserialize, Serialize};

/// 抽出結果一覧
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractedFiles {
    records: Vec<ExtractedFileRecord>,
}

impl ExtractedFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// 抽出開始時のスナップショットを作成
    ///
    /// アップロード済みファイルごとに処理中レコードを作り、
    /// 既存の手動入力レコードは変更せず末尾に付け直す。
    pub fn snapshot_for_extraction<'a, I>(&mut self, files: I)
    where
        I: IntoIterator<Item = &'a UploadedFile>,
    {
        let manual = self.take_manual();
        let mut records: Vec<ExtractedFileRecord> = files
            .into_iter()
            .cloned()
            .map(ExtractedFileRecord::processing)
            .collect();
        records.extend(manual);
        self.records = records;
    }

    fn take_manual(&mut self) -> Option<ExtractedFileRecord> {
        let index = self.manual_index()?;
        Some(self.records.remove(index))
    }

    fn manual_index(&self) -> Option<usize> {
        self.records.iter().position(|r| r.is_manual())
    }

    pub fn manual_entry(&self) -> Option<&ExtractedFileRecord> {
        self.records.iter().find(|r| r.is_manual())
    }

    /// 手動入力の識別子一覧（なければ空）
    pub fn manual_identifiers(&self) -> &[String] {
        self.manual_entry()
            .map(|r| r.identifiers.as_slice())
            .unwrap_or(&[])
    }

    /// 手動で識別子を追加
    pub fn add_manual(&mut self, input: &str) -> Result<Identifier, ValidationError> {
        let identifier = identifier::parse_manual(input)?;

        match self.manual_index() {
            Some(index) => self.records[index].identifiers.push(identifier.value.clone()),
            None => self
                .records
                .push(ExtractedFileRecord::manual(identifier.value.clone())),
        }

        Ok(identifier)
    }

    /// 手動識別子を値で削除（最初の一致のみ）
    ///
    /// 戻り値: 削除したか
    pub fn remove_manual(&mut self, value: &str) -> bool {
        let Some(index) = self.manual_index() else {
            return false;
        };

        let identifiers = &mut self.records[index].identifiers;
        let Some(position) = identifiers.iter().position(|v| v == value) else {
            return false;
        };
        identifiers.remove(position);

        if identifiers.is_empty() {
            self.records.remove(index);
        }
        true
    }

    /// 任意の識別子を位置指定で書き換え（検証しない）
    pub fn update_identifier(&mut self, file_index: usize, identifier_index: usize, value: String) -> bool {
        match self
            .records
            .get_mut(file_index)
            .and_then(|r| r.identifiers.get_mut(identifier_index))
        {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// 全レコードの識別子を一覧順に連結（重複は除去しない）
    pub fn all_identifiers(&self) -> Vec<String> {
        self.records
            .iter()
            .flat_map(|r| r.identifiers.iter().cloned())
            .collect()
    }

    pub fn has_extracted_data(&self) -> bool {
        self.records.iter().any(|r| !r.identifiers.is_empty())
    }

    /// アップロードファイル由来のレコードのみ（手動入力を除く）
    pub fn uploaded_records(&self) -> impl Iterator<Item = (usize, &ExtractedFileRecord)> {
        self.records.iter().enumerate().filter(|(_, r)| !r.is_manual())
    }

    pub fn record_for(&self, id: FileId) -> Option<&ExtractedFileRecord> {
        self.records.iter().find(|r| r.file_id() == Some(id))
    }

    pub fn get(&self, index: usize) -> Option<&ExtractedFileRecord> {
        self.records.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut ExtractedFileRecord> {
        self.records.get_mut(index)
    }

    pub fn records(&self) -> &[ExtractedFileRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
