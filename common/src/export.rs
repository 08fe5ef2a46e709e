//! JSONエクスポート
//!
//! - 車両エクスポート: `{ formData, vehicles, exportDate }`
//! - ログエクスポート: `{ exportDate, logs }`
//!
//! ファイル名は `<製品名>-export-YYYY-MM-DD.json` / `<製品名>-logs-YYYY-MM-DD.json`。

use crate::admin::LogEntry;
use crate::error::Result;
use crate::insurance::InsuranceFormData;
use crate::notice::Notice;
use crate::vehicle::VehicleRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// エクスポート成功時の通知文言
pub const EXPORT_NOTICE: &str = "Data exported to JSON";

/// ログダウンロード成功時の通知文言
pub const LOGS_NOTICE: &str = "Logs downloaded successfully";

/// 車両エクスポートの中身
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle {
    pub form_data: InsuranceFormData,
    pub vehicles: Vec<VehicleRecord>,
    pub export_date: DateTime<Utc>,
}

impl ExportBundle {
    pub fn new(form_data: &InsuranceFormData, vehicles: &[VehicleRecord], export_date: DateTime<Utc>) -> Self {
        Self {
            form_data: form_data.clone(),
            vehicles: vehicles.to_vec(),
            export_date,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn file_name(&self, product: &str) -> String {
        export_file_name(product, self.export_date)
    }
}

/// ログエクスポートの中身
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogExport {
    pub export_date: DateTime<Utc>,
    pub logs: Vec<LogEntry>,
}

impl LogExport {
    pub fn new(logs: &[LogEntry], export_date: DateTime<Utc>) -> Self {
        Self {
            export_date,
            logs: logs.to_vec(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn file_name(&self, product: &str) -> String {
        logs_file_name(product, self.export_date)
    }
}

pub fn export_file_name(product: &str, date: DateTime<Utc>) -> String {
    format!("{}-export-{}.json", product, date.format("%Y-%m-%d"))
}

pub fn logs_file_name(product: &str, date: DateTime<Utc>) -> String {
    format!("{}-logs-{}.json", product, date.format("%Y-%m-%d"))
}

/// 申込書ダウンロード（未実装、通知のみ）
pub fn download_form() -> Notice {
    Notice::info("Excel form download would be implemented here")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::{ActivityLog, LogLevel};
    use crate::insurance::WindowsCoverage;
    use crate::vehicle::{MockDecoder, VehicleDecoder, VehicleStore};
    use chrono::TimeZone;

    fn fixed_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 18, 10, 30, 0).unwrap()
    }

    fn sample_vehicles(form: &InsuranceFormData) -> VehicleStore {
        let identifiers: Vec<String> = ["WBAVA31030NL12345", "AB12345"].iter().map(|s| s.to_string()).collect();
        let specs = MockDecoder.decode(&identifiers);
        let mut store = VehicleStore::new();
        store.replace_from(&identifiers, specs, &form.coverage);
        store
    }

    #[test]
    fn test_file_names() {
        assert_eq!(export_file_name("vinscout", fixed_date()), "vinscout-export-2025-01-18.json");
        assert_eq!(logs_file_name("vinscout", fixed_date()), "vinscout-logs-2025-01-18.json");
    }

    #[test]
    fn test_bundle_top_level_keys() {
        let form = InsuranceFormData::default();
        let store = sample_vehicles(&form);
        let bundle = ExportBundle::new(&form, store.vehicles(), fixed_date());

        let value: serde_json::Value =
            serde_json::from_str(&bundle.to_json_pretty().expect("シリアライズ失敗")).expect("パース失敗");
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 3);
        assert!(value.get("formData").is_some());
        assert_eq!(value["vehicles"].as_array().unwrap().len(), 2);
        assert_eq!(value["exportDate"], "2025-01-18T10:30:00Z");
    }

    #[test]
    fn test_bundle_parses_back_equal() {
        let mut form = InsuranceFormData::default();
        form.policyholder_ico = "12345678".into();
        form.coverage.windows_insurance = WindowsCoverage::NoLimit;
        let mut store = sample_vehicles(&form);
        let id = store.vehicles()[1].id;
        store.toggle_individual_coverage(id, &form);

        let bundle = ExportBundle::new(&form, store.vehicles(), fixed_date());
        let parsed = ExportBundle::from_json(&bundle.to_json_pretty().unwrap()).expect("パース失敗");

        assert_eq!(parsed.vehicles.len(), store.len());
        assert_eq!(parsed.form_data, form);
        assert_eq!(parsed, bundle);
    }

    #[test]
    fn test_empty_export_allowed() {
        let bundle = ExportBundle::new(&InsuranceFormData::default(), &[], fixed_date());
        let json = bundle.to_json_pretty().unwrap();
        assert!(json.contains("\"vehicles\": []"));
    }

    #[test]
    fn test_log_export_shape() {
        let mut log = ActivityLog::new();
        log.push_at(fixed_date(), LogLevel::Info, "Document processing started", serde_json::json!({}));
        let export = LogExport::new(log.entries(), fixed_date());

        let value: serde_json::Value = serde_json::from_str(&export.to_json_pretty().unwrap()).unwrap();
        assert_eq!(value["logs"].as_array().unwrap().len(), 1);
        assert_eq!(value["logs"][0]["level"], "INFO");
        assert_eq!(export.file_name("vinscout"), "vinscout-logs-2025-01-18.json");
    }

    #[test]
    fn test_download_form_is_placeholder() {
        let notice = download_form();
        assert!(notice.message.contains("would be implemented"));
    }
}
