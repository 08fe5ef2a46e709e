//! VIN / ナンバープレートの分類
//!
//! - VIN: ちょうど17文字
//! - ナンバープレート: 7文字、または区切り文字を含む8文字
//!
//! デコード時は「17文字ならVIN、それ以外はプレート」の単純な規則で分類する。
//! 手動入力ではそれ以外の長さを事前に拒否するので、両者の結果は一致する。

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// VINの文字数
pub const VIN_LENGTH: usize = 17;

/// 区切り文字なしのプレート文字数
pub const PLATE_LENGTH: usize = 7;

/// 区切り文字を含むプレート文字数
pub const PLATE_WITH_SEPARATOR_LENGTH: usize = 8;

/// プレートの区切り文字
pub const PLATE_SEPARATORS: &[char] = &['-', ' '];

/// 識別子の種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IdentifierKind {
    Vin,
    LicensePlate,
}

impl IdentifierKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentifierKind::Vin => "VIN",
            IdentifierKind::LicensePlate => "license plate",
        }
    }
}

impl std::fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 分類済みの識別子
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
    pub value: String,
    pub kind: IdentifierKind,
}

/// 前後の空白を除去して大文字化
pub fn normalize(input: &str) -> String {
    input.trim().to_uppercase()
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// デコード時の分類（長さのみで判定）
pub fn classify(value: &str) -> IdentifierKind {
    if char_len(value) == VIN_LENGTH {
        IdentifierKind::Vin
    } else {
        IdentifierKind::LicensePlate
    }
}

/// 手動入力を検証して分類
pub fn parse_manual(input: &str) -> Result<Identifier, ValidationError> {
    let value = normalize(input);
    if value.is_empty() {
        return Err(ValidationError::EmptyInput);
    }

    let kind = match char_len(&value) {
        VIN_LENGTH => IdentifierKind::Vin,
        PLATE_LENGTH => IdentifierKind::LicensePlate,
        PLATE_WITH_SEPARATOR_LENGTH if value.contains(PLATE_SEPARATORS) => {
            IdentifierKind::LicensePlate
        }
        _ => return Err(ValidationError::InvalidIdentifier(value)),
    };

    Ok(Identifier { value, kind })
}

/// 入力欄の「追加」ボタンを有効にするか
pub fn is_valid_manual_input(input: &str) -> bool {
    parse_manual(input).is_ok()
}
