//! 車両レコードとデコード
//!
//! デコード完了時、識別子1件につき車両レコード1件を一括生成し、
//! 既存のレコードを丸ごと置き換える（追加ではない）。

use crate::identifier::{self, IdentifierKind};
use crate::insurance::{CoverageTerms, InsuranceFormData, WindowsCoverage};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// デコード進捗の増分
pub const DECODE_PROGRESS_STEP: u8 = 5;

/// デコード進捗の更新間隔
pub const DECODE_TICK: Duration = Duration::from_millis(100);

/// 識別子から車両諸元を引く機能（本番ではVINデコードAPI）
pub trait VehicleDecoder {
    /// 識別子1件につき諸元1件を返す
    fn decode(&mut self, identifiers: &[String]) -> Vec<VehicleSpec>;
}

/// 車両諸元（車両登録データベースの照会結果）
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleSpec {
    #[serde(rename = "type")]
    pub vehicle_type: String,
    pub manufacturer: String,
    pub model: String,
    pub engine_displacement: String,
    pub engine_power: String,
    pub max_weight: String,
    pub year: String,
    pub seats: String,
    pub fuel_type: String,
}

/// 疑似デコーダ（常に同じ諸元を返す）
#[derive(Debug, Clone, Default)]
pub struct MockDecoder;

impl MockDecoder {
    pub fn spec() -> VehicleSpec {
        VehicleSpec {
            vehicle_type: "Passenger Car".into(),
            manufacturer: "BMW".into(),
            model: "320d".into(),
            engine_displacement: "1995 cm³".into(),
            engine_power: "140 kW".into(),
            max_weight: "1850 kg".into(),
            year: "2020".into(),
            seats: "5".into(),
            fuel_type: "Diesel".into(),
        }
    }
}

impl VehicleDecoder for MockDecoder {
    fn decode(&mut self, identifiers: &[String]) -> Vec<VehicleSpec> {
        identifiers.iter().map(|_| Self::spec()).collect()
    }
}

/// セッション内で一意な車両ID（単調増加）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(pub u64);

impl std::fmt::Display for VehicleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 車両レコード
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecord {
    pub id: VehicleId,
    pub vin: String,
    pub license_plate: String,
    pub mileage: String,
    pub vehicle_value: String,
    pub mandatory_insurance: bool,
    pub accident_insurance: bool,
    pub injury_insurance: bool,
    pub windows_insurance: WindowsCoverage,
    pub owner_same_as_insurer: bool,
    pub operator_same_as_insurer: bool,
    pub owner_tin: String,
    pub operator_tin: String,
    #[serde(default)]
    pub has_individual_coverage: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub individual_insurance: Option<CoverageTerms>,
    pub cebia: VehicleSpec,
}

impl VehicleRecord {
    /// 識別子から生成（17文字ならVIN、それ以外はプレート）
    pub fn from_identifier(id: VehicleId, value: &str, spec: VehicleSpec, global: &CoverageTerms) -> Self {
        let (vin, license_plate) = match identifier::classify(value) {
            IdentifierKind::Vin => (value.to_string(), String::new()),
            IdentifierKind::LicensePlate => (String::new(), value.to_string()),
        };

        Self {
            id,
            vin,
            license_plate,
            mileage: String::new(),
            vehicle_value: String::new(),
            mandatory_insurance: global.mandatory_insurance,
            accident_insurance: global.accident_insurance,
            injury_insurance: global.injury_insurance,
            windows_insurance: global.windows_insurance,
            owner_same_as_insurer: true,
            operator_same_as_insurer: true,
            owner_tin: String::new(),
            operator_tin: String::new(),
            has_individual_coverage: false,
            individual_insurance: None,
            cebia: spec,
        }
    }

    /// 一覧・ログ用の表示名
    pub fn label(&self) -> &str {
        if self.vin.is_empty() {
            &self.license_plate
        } else {
            &self.vin
        }
    }
}

/// 車両レコードストア
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VehicleStore {
    vehicles: Vec<VehicleRecord>,
    next_id: u64,
}

impl VehicleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// デコード結果で全件置き換え
    ///
    /// IDはストアをまたいで再利用しないので、置き換え後も一意。
    pub fn replace_from(&mut self, identifiers: &[String], specs: Vec<VehicleSpec>, global: &CoverageTerms) {
        let mut specs = specs.into_iter();
        let mut vehicles = Vec::with_capacity(identifiers.len());

        for value in identifiers {
            let spec = specs.next().unwrap_or_default();
            self.next_id += 1;
            vehicles.push(VehicleRecord::from_identifier(VehicleId(self.next_id), value, spec, global));
        }

        self.vehicles = vehicles;
    }

    pub fn get(&self, id: VehicleId) -> Option<&VehicleRecord> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    /// 1台分を編集
    pub fn update<F>(&mut self, id: VehicleId, edit: F) -> bool
    where
        F: FnOnce(&mut VehicleRecord),
    {
        match self.vehicles.iter_mut().find(|v| v.id == id) {
            Some(vehicle) => {
                edit(vehicle);
                true
            }
            None => false,
        }
    }

    /// 個別条件のオン/オフ
    ///
    /// オンにした時点の全体条件をコピーし、以後は全体フォームと独立する。
    /// オフにするとコピーを破棄して全体条件に戻る。
    pub fn toggle_individual_coverage(&mut self, id: VehicleId, form: &InsuranceFormData) -> Option<bool> {
        let vehicle = self.vehicles.iter_mut().find(|v| v.id == id)?;
        vehicle.has_individual_coverage = !vehicle.has_individual_coverage;
        vehicle.individual_insurance = if vehicle.has_individual_coverage {
            Some(form.coverage.clone())
        } else {
            None
        };
        Some(vehicle.has_individual_coverage)
    }

    /// 個別条件を編集（個別条件がない車両には何もしない）
    pub fn update_individual<F>(&mut self, id: VehicleId, edit: F) -> bool
    where
        F: FnOnce(&mut CoverageTerms),
    {
        match self
            .vehicles
            .iter_mut()
            .find(|v| v.id == id)
            .and_then(|v| v.individual_insurance.as_mut())
        {
            Some(terms) => {
                edit(terms);
                true
            }
            None => false,
        }
    }

    /// 車両に実際に適用される条件
    pub fn effective_coverage<'a>(&'a self, id: VehicleId, form: &'a InsuranceFormData) -> Option<&'a CoverageTerms> {
        let vehicle = self.get(id)?;
        Some(vehicle.individual_insurance.as_ref().unwrap_or(&form.coverage))
    }

    pub fn vehicles(&self) -> &[VehicleRecord] {
        &self.vehicles
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}
