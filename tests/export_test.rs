//! JSONエクスポートの統合テスト

use chrono::{TimeZone, Utc};
use tempfile::tempdir;
use vinscout::export::{write_bundle, write_log_export};
use vinscout_common::{AppState, ExportBundle, InsuranceFormData, MockDecoder, WindowsCoverage};

fn decoded_state() -> AppState {
    let mut state = AppState::new();
    state.add_manual_identifier("WBAVA31030NL12345").unwrap();
    state.add_manual_identifier("AB12345").unwrap();
    state.run_decode(&mut MockDecoder);
    state.update_form(|f| {
        f.policyholder_ico = "12345678".into();
        f.coverage.windows_insurance = WindowsCoverage::Limit(20);
    });
    state
}

#[test]
fn test_write_bundle_to_dir() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut state = decoded_state();
    let date = Utc.with_ymd_and_hms(2025, 1, 18, 12, 0, 0).unwrap();
    let (bundle, _) = state.export_bundle(date);

    let path = write_bundle(&bundle, dir.path()).expect("エクスポート失敗");
    assert_eq!(path, dir.path().join("vinscout-export-2025-01-18.json"));

    let content = std::fs::read_to_string(&path).expect("読み込み失敗");
    let parsed = ExportBundle::from_json(&content).expect("パース失敗");
    assert_eq!(parsed.vehicles.len(), state.vehicles().len());
    assert_eq!(&parsed.form_data, state.form());
}

#[test]
fn test_write_bundle_to_file_path() {
    let dir = tempdir().expect("Failed to create temp dir");
    let target = dir.path().join("out").join("fleet.json");
    let bundle = ExportBundle::new(&InsuranceFormData::default(), &[], Utc::now());

    let path = write_bundle(&bundle, &target).expect("エクスポート失敗");
    assert_eq!(path, target);
    assert!(target.exists(), "ファイルが作成されていない");
}

#[test]
fn test_export_json_shape() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut state = decoded_state();
    let (bundle, _) = state.export_bundle(Utc::now());
    let path = write_bundle(&bundle, dir.path()).unwrap();

    let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(value["formData"]["policyholderIco"], "12345678");
    assert_eq!(value["formData"]["windowsInsurance"], "20");
    assert_eq!(value["vehicles"][0]["vin"], "WBAVA31030NL12345");
    assert_eq!(value["vehicles"][1]["licensePlate"], "AB12345");
    assert_eq!(value["vehicles"][1]["cebia"]["fuelType"], "Diesel");
    assert!(value["exportDate"].as_str().unwrap().ends_with('Z'));
}

#[test]
fn test_write_log_export() {
    let dir = tempdir().expect("Failed to create temp dir");
    let state = decoded_state();
    let date = Utc.with_ymd_and_hms(2025, 2, 1, 8, 0, 0).unwrap();
    let (logs, notice) = state.log_export(date);

    let path = write_log_export(&logs, dir.path()).expect("ログ出力失敗");
    assert_eq!(path, dir.path().join("vinscout-logs-2025-02-01.json"));
    assert!(notice.message.contains("Logs"));

    let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(value["exportDate"], "2025-02-01T08:00:00Z");
    assert_eq!(value["logs"].as_array().unwrap().len(), state.log().len());
}
