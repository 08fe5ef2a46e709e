//! 保険フォーム
//!
//! フリート全体の契約条件（`InsuranceFormData`）と、車両ごとに切り離した
//! 条件（`CoverageTerms` のスナップショット）を扱う。
//!
//! 画面・エクスポートのJSONでは従来どおり文字列値（`"0"`, `"no-limit"`,
//! `"100mil"`, `"5%"` など）を使うが、内部では閉じた列挙型で表現する。

use crate::error::Error;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================
// 選択肢の列挙型
// ============================================

/// 窓ガラス保険（無効 / 上限額 / 無制限）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum WindowsCoverage {
    #[default]
    Disabled,
    Limit(u32),
    NoLimit,
}

impl WindowsCoverage {
    /// 有効化したときの初期上限
    pub const DEFAULT_LIMIT: WindowsCoverage = WindowsCoverage::Limit(10);

    /// 画面で選べる上限
    pub const TIERS: [WindowsCoverage; 6] = [
        WindowsCoverage::Limit(10),
        WindowsCoverage::Limit(20),
        WindowsCoverage::Limit(30),
        WindowsCoverage::Limit(50),
        WindowsCoverage::Limit(100),
        WindowsCoverage::NoLimit,
    ];

    /// 上限額から生成（0 は無効と同じ扱い）
    pub fn limit(amount: u32) -> Self {
        match amount {
            0 => WindowsCoverage::Disabled,
            n => WindowsCoverage::Limit(n),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self, WindowsCoverage::Disabled | WindowsCoverage::Limit(0))
    }
}

impl fmt::Display for WindowsCoverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowsCoverage::Disabled => write!(f, "0"),
            WindowsCoverage::Limit(n) => write!(f, "{}", n),
            WindowsCoverage::NoLimit => write!(f, "no-limit"),
        }
    }
}

impl FromStr for WindowsCoverage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0" | "" => Ok(WindowsCoverage::Disabled),
            "no-limit" => Ok(WindowsCoverage::NoLimit),
            other => other
                .parse::<u32>()
                .map(WindowsCoverage::limit)
                .map_err(|_| invalid("windowsInsurance", s)),
        }
    }
}

/// 強制保険（対人対物）の補償上限
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MandatoryLimit {
    Mil50,
    Mil70,
    #[default]
    Mil100,
    Mil250,
}

impl MandatoryLimit {
    pub const ALL: [MandatoryLimit; 4] = [
        MandatoryLimit::Mil50,
        MandatoryLimit::Mil70,
        MandatoryLimit::Mil100,
        MandatoryLimit::Mil250,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MandatoryLimit::Mil50 => "50mil",
            MandatoryLimit::Mil70 => "70mil",
            MandatoryLimit::Mil100 => "100mil",
            MandatoryLimit::Mil250 => "250mil",
        }
    }
}

impl fmt::Display for MandatoryLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MandatoryLimit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|l| l.as_str() == s.trim())
            .ok_or_else(|| invalid("mandatoryInsuranceLimit", s))
    }
}

/// 定額の免責（自己負担）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FixedParticipation {
    Amount(u32),
    Max,
}

impl Default for FixedParticipation {
    fn default() -> Self {
        FixedParticipation::Amount(100)
    }
}

impl FixedParticipation {
    pub const OPTIONS: [FixedParticipation; 7] = [
        FixedParticipation::Amount(0),
        FixedParticipation::Amount(100),
        FixedParticipation::Amount(200),
        FixedParticipation::Amount(300),
        FixedParticipation::Amount(500),
        FixedParticipation::Amount(1000),
        FixedParticipation::Max,
    ];
}

impl fmt::Display for FixedParticipation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FixedParticipation::Amount(n) => write!(f, "{}", n),
            FixedParticipation::Max => write!(f, "max"),
        }
    }
}

impl FromStr for FixedParticipation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "max" => Ok(FixedParticipation::Max),
            other => other
                .parse::<u32>()
                .map(FixedParticipation::Amount)
                .map_err(|_| invalid("accidentInsuranceFixed", s)),
        }
    }
}

/// 割合の免責
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PercentageParticipation {
    #[default]
    Min,
    Percent(u8),
}

impl PercentageParticipation {
    pub const OPTIONS: [PercentageParticipation; 8] = [
        PercentageParticipation::Min,
        PercentageParticipation::Percent(1),
        PercentageParticipation::Percent(2),
        PercentageParticipation::Percent(3),
        PercentageParticipation::Percent(5),
        PercentageParticipation::Percent(10),
        PercentageParticipation::Percent(15),
        PercentageParticipation::Percent(20),
    ];
}

impl fmt::Display for PercentageParticipation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PercentageParticipation::Min => write!(f, "min"),
            PercentageParticipation::Percent(p) => write!(f, "{}%", p),
        }
    }
}

impl FromStr for PercentageParticipation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed == "min" {
            return Ok(PercentageParticipation::Min);
        }
        trimmed
            .trim_end_matches('%')
            .parse::<u8>()
            .ok()
            .filter(|p| *p <= 100)
            .map(PercentageParticipation::Percent)
            .ok_or_else(|| invalid("percentageParticipation", s))
    }
}

/// 免責の方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipationMode {
    #[default]
    Fixed,
    Percentage,
}

impl FromStr for ParticipationMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "fixed" => Ok(ParticipationMode::Fixed),
            "percentage" => Ok(ParticipationMode::Percentage),
            _ => Err(invalid("participation", s)),
        }
    }
}

macro_rules! string_conversions {
    ($($ty:ty),*) => {
        $(
            impl TryFrom<String> for $ty {
                type Error = Error;

                fn try_from(value: String) -> Result<Self, Self::Error> {
                    value.parse()
                }
            }

            impl From<$ty> for String {
                fn from(value: $ty) -> Self {
                    value.to_string()
                }
            }
        )*
    };
}

string_conversions!(WindowsCoverage, MandatoryLimit, FixedParticipation, PercentageParticipation);

fn invalid(field: &'static str, value: &str) -> Error {
    Error::InvalidValue {
        field,
        value: value.to_string(),
    }
}

/// 事故保険の免責（定額・割合・両方）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deductible {
    Fixed(FixedParticipation),
    Percentage(PercentageParticipation),
    Both(FixedParticipation, PercentageParticipation),
}

// ============================================
// 補償条件
// ============================================

/// 補償のオン/オフ項目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverageToggle {
    Mandatory,
    Accident,
    Windows,
    Injury,
    AnimalCollisions,
    Luggage,
    AssistanceServices,
    Vandalism,
}

impl CoverageToggle {
    /// 画面の表示順
    pub const ALL: [CoverageToggle; 8] = [
        CoverageToggle::Mandatory,
        CoverageToggle::Accident,
        CoverageToggle::Windows,
        CoverageToggle::Injury,
        CoverageToggle::AnimalCollisions,
        CoverageToggle::Luggage,
        CoverageToggle::AssistanceServices,
        CoverageToggle::Vandalism,
    ];

    /// 翻訳キー（フィールド名と同じ）
    pub fn key(&self) -> &'static str {
        match self {
            CoverageToggle::Mandatory => "mandatoryInsurance",
            CoverageToggle::Accident => "accidentInsurance",
            CoverageToggle::Windows => "windowsInsurance",
            CoverageToggle::Injury => "injuryInsurance",
            CoverageToggle::AnimalCollisions => "animalCollisions",
            CoverageToggle::Luggage => "luggage",
            CoverageToggle::AssistanceServices => "assistanceServices",
            CoverageToggle::Vandalism => "vandalism",
        }
    }

    pub fn get(&self, terms: &CoverageTerms) -> bool {
        match self {
            CoverageToggle::Mandatory => terms.mandatory_insurance,
            CoverageToggle::Accident => terms.accident_insurance,
            CoverageToggle::Windows => terms.windows_insurance.is_enabled(),
            CoverageToggle::Injury => terms.injury_insurance,
            CoverageToggle::AnimalCollisions => terms.animal_collisions,
            CoverageToggle::Luggage => terms.luggage,
            CoverageToggle::AssistanceServices => terms.assistance_services,
            CoverageToggle::Vandalism => terms.vandalism,
        }
    }

    pub fn set(&self, terms: &mut CoverageTerms, on: bool) {
        match self {
            CoverageToggle::Mandatory => terms.mandatory_insurance = on,
            CoverageToggle::Accident => terms.accident_insurance = on,
            CoverageToggle::Windows => terms.set_windows_enabled(on),
            CoverageToggle::Injury => terms.injury_insurance = on,
            CoverageToggle::AnimalCollisions => terms.animal_collisions = on,
            CoverageToggle::Luggage => terms.luggage = on,
            CoverageToggle::AssistanceServices => terms.assistance_services = on,
            CoverageToggle::Vandalism => terms.vandalism = on,
        }
    }
}

/// 表示する免責セクション
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParticipationSections {
    pub mandatory_limit: bool,
    pub accident_deductible: bool,
    pub windows_limit: bool,
}

/// 補償と免責の条件
///
/// 車両ごとの個別条件（individualInsurance）もこの型のスナップショット。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageTerms {
    pub mandatory_insurance: bool,
    pub accident_insurance: bool,
    pub injury_insurance: bool,
    pub windows_insurance: WindowsCoverage,
    pub animal_collisions: bool,
    pub luggage: bool,
    pub assistance_services: bool,
    pub vandalism: bool,
    pub participation: ParticipationMode,
    pub mandatory_insurance_limit: MandatoryLimit,
    pub accident_insurance_fixed: FixedParticipation,
    pub percentage_participation: PercentageParticipation,
    #[serde(default)]
    pub use_fixed_amount: bool,
    #[serde(default)]
    pub use_percentage_amount: bool,
}

impl Default for CoverageTerms {
    fn default() -> Self {
        Self {
            mandatory_insurance: true,
            accident_insurance: false,
            injury_insurance: false,
            windows_insurance: WindowsCoverage::Disabled,
            animal_collisions: false,
            luggage: false,
            assistance_services: false,
            vandalism: false,
            participation: ParticipationMode::Fixed,
            mandatory_insurance_limit: MandatoryLimit::Mil100,
            accident_insurance_fixed: FixedParticipation::Amount(100),
            percentage_participation: PercentageParticipation::Min,
            use_fixed_amount: false,
            use_percentage_amount: false,
        }
    }
}

impl CoverageTerms {
    /// いずれかの補償が有効か（免責セクションの表示条件）
    pub fn any_coverage_active(&self) -> bool {
        CoverageToggle::ALL.iter().any(|t| t.get(self))
    }

    pub fn participation_sections(&self) -> ParticipationSections {
        if !self.any_coverage_active() {
            return ParticipationSections::default();
        }
        ParticipationSections {
            mandatory_limit: self.mandatory_insurance,
            accident_deductible: self.accident_insurance,
            windows_limit: self.windows_insurance.is_enabled(),
        }
    }

    /// 窓ガラス保険のオン/オフ（オンで初期上限、オフで無効）
    pub fn set_windows_enabled(&mut self, on: bool) {
        self.windows_insurance = match (on, self.windows_insurance) {
            (true, current) if current.is_enabled() => current,
            (true, _) => WindowsCoverage::DEFAULT_LIMIT,
            (false, _) => WindowsCoverage::Disabled,
        };
    }

    /// 事故保険の免責（事故保険が無効、または方式未選択なら None）
    pub fn deductible(&self) -> Option<Deductible> {
        if !self.accident_insurance {
            return None;
        }
        match (self.use_fixed_amount, self.use_percentage_amount) {
            (true, true) => Some(Deductible::Both(
                self.accident_insurance_fixed,
                self.percentage_participation,
            )),
            (true, false) => Some(Deductible::Fixed(self.accident_insurance_fixed)),
            (false, true) => Some(Deductible::Percentage(self.percentage_participation)),
            (false, false) => None,
        }
    }
}

// ============================================
// フォーム全体
// ============================================

/// 契約全体のフォーム状態
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsuranceFormData {
    /// 契約者の法人番号（IČO）
    #[serde(default)]
    pub policyholder_ico: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub start_of_insurance: Option<NaiveDate>,
    #[serde(flatten)]
    pub coverage: CoverageTerms,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_page() {
        let form = InsuranceFormData::default();
        assert!(form.coverage.mandatory_insurance);
        assert_eq!(form.coverage.windows_insurance, WindowsCoverage::Disabled);
        assert_eq!(form.coverage.mandatory_insurance_limit, MandatoryLimit::Mil100);
        assert_eq!(form.coverage.accident_insurance_fixed, FixedParticipation::Amount(100));
    }

    #[test]
    fn test_windows_wire_format() {
        assert_eq!("0".parse::<WindowsCoverage>().unwrap(), WindowsCoverage::Disabled);
        assert_eq!("20".parse::<WindowsCoverage>().unwrap(), WindowsCoverage::Limit(20));
        assert_eq!("no-limit".parse::<WindowsCoverage>().unwrap(), WindowsCoverage::NoLimit);
        assert!("abc".parse::<WindowsCoverage>().is_err());

        let json = serde_json::to_string(&WindowsCoverage::NoLimit).expect("シリアライズ失敗");
        assert_eq!(json, "\"no-limit\"");
    }

    #[test]
    fn test_windows_zero_limit_is_disabled() {
        assert_eq!(WindowsCoverage::limit(0), WindowsCoverage::Disabled);
        assert_eq!(WindowsCoverage::limit(30), WindowsCoverage::Limit(30));
        assert_eq!("00".parse::<WindowsCoverage>().unwrap(), WindowsCoverage::Disabled);
        assert!(!WindowsCoverage::Limit(0).is_enabled());

        // 直接作った Limit(0) も文字列を経由すると無効に揃う
        let json = serde_json::to_string(&WindowsCoverage::Limit(0)).expect("シリアライズ失敗");
        let back: WindowsCoverage = serde_json::from_str(&json).expect("デシリアライズ失敗");
        assert_eq!(back, WindowsCoverage::Disabled);

        let mut terms = CoverageTerms {
            windows_insurance: WindowsCoverage::Limit(0),
            ..CoverageTerms::default()
        };
        assert!(!terms.participation_sections().windows_limit);
        terms.set_windows_enabled(true);
        assert_eq!(terms.windows_insurance, WindowsCoverage::DEFAULT_LIMIT);
    }

    #[test]
    fn test_participation_wire_format() {
        assert_eq!("5%".parse::<PercentageParticipation>().unwrap(), PercentageParticipation::Percent(5));
        assert_eq!(PercentageParticipation::Percent(15).to_string(), "15%");
        assert_eq!("max".parse::<FixedParticipation>().unwrap(), FixedParticipation::Max);
        assert_eq!("250mil".parse::<MandatoryLimit>().unwrap(), MandatoryLimit::Mil250);
        assert!("300%".parse::<PercentageParticipation>().is_err());
    }

    #[test]
    fn test_set_windows_enabled() {
        let mut terms = CoverageTerms::default();
        terms.set_windows_enabled(true);
        assert_eq!(terms.windows_insurance, WindowsCoverage::Limit(10));

        terms.windows_insurance = WindowsCoverage::Limit(50);
        terms.set_windows_enabled(true);
        assert_eq!(terms.windows_insurance, WindowsCoverage::Limit(50));

        terms.set_windows_enabled(false);
        assert_eq!(terms.windows_insurance, WindowsCoverage::Disabled);
    }

    #[test]
    fn test_participation_hidden_without_coverage() {
        let mut terms = CoverageTerms::default();
        for toggle in CoverageToggle::ALL {
            toggle.set(&mut terms, false);
        }
        assert!(!terms.any_coverage_active());
        assert_eq!(terms.participation_sections(), ParticipationSections::default());

        CoverageToggle::Luggage.set(&mut terms, true);
        assert!(terms.any_coverage_active());
        let sections = terms.participation_sections();
        assert!(!sections.mandatory_limit && !sections.accident_deductible && !sections.windows_limit);
    }

    #[test]
    fn test_deductible_modes() {
        let mut terms = CoverageTerms::default();
        assert_eq!(terms.deductible(), None);

        terms.accident_insurance = true;
        assert_eq!(terms.deductible(), None);

        terms.use_fixed_amount = true;
        assert_eq!(terms.deductible(), Some(Deductible::Fixed(FixedParticipation::Amount(100))));

        terms.use_percentage_amount = true;
        terms.percentage_participation = PercentageParticipation::Percent(10);
        assert_eq!(
            terms.deductible(),
            Some(Deductible::Both(FixedParticipation::Amount(100), PercentageParticipation::Percent(10)))
        );
    }

    #[test]
    fn test_form_serialize_flat_camel_case() {
        let form = InsuranceFormData {
            policyholder_ico: "12345678".to_string(),
            ..Default::default()
        };

        let json = serde_json::to_string(&form).expect("シリアライズ失敗");
        assert!(json.contains("\"policyholderIco\":\"12345678\""));
        assert!(json.contains("\"windowsInsurance\":\"0\""));
        assert!(json.contains("\"mandatoryInsuranceLimit\":\"100mil\""));
        assert!(json.contains("\"participation\":\"fixed\""));
        assert!(!json.contains("coverage"));
    }

    #[test]
    fn test_form_deserialize() {
        let json = r#"{
            "policyholderIco": "87654321",
            "startOfInsurance": "2025-03-01",
            "mandatoryInsurance": false,
            "accidentInsurance": true,
            "injuryInsurance": false,
            "windowsInsurance": "no-limit",
            "animalCollisions": true,
            "luggage": false,
            "assistanceServices": false,
            "vandalism": false,
            "participation": "percentage",
            "mandatoryInsuranceLimit": "50mil",
            "accidentInsuranceFixed": "max",
            "percentageParticipation": "3%"
        }"#;

        let form: InsuranceFormData = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(form.policyholder_ico, "87654321");
        assert_eq!(form.start_of_insurance, NaiveDate::from_ymd_opt(2025, 3, 1));
        assert_eq!(form.coverage.windows_insurance, WindowsCoverage::NoLimit);
        assert_eq!(form.coverage.percentage_participation, PercentageParticipation::Percent(3));
        assert!(!form.coverage.use_fixed_amount);
        assert_eq!(form.email, "");
    }
}
