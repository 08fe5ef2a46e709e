//! エクスポートファイルの書き出し

use crate::error::Result;
use std::path::{Path, PathBuf};
use vinscout_common::{ExportBundle, LogExport, PRODUCT_NAME};

/// 出力先のパス（ディレクトリならファイル名を付ける）
fn output_path(output: &Path, file_name: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(file_name)
    } else {
        output.to_path_buf()
    }
}

fn write_json(path: &Path, json: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, json)?;
    Ok(())
}

/// 車両エクスポートを書き出す（vinscout-export-YYYY-MM-DD.json）
pub fn write_bundle(bundle: &ExportBundle, output: &Path) -> Result<PathBuf> {
    let path = output_path(output, &bundle.file_name(PRODUCT_NAME));
    write_json(&path, &bundle.to_json_pretty()?)?;
    tracing::info!(path = %path.display(), vehicles = bundle.vehicles.len(), "エクスポート出力");
    Ok(path)
}

/// ログエクスポートを書き出す（vinscout-logs-YYYY-MM-DD.json）
pub fn write_log_export(export: &LogExport, output: &Path) -> Result<PathBuf> {
    let path = output_path(output, &export.file_name(PRODUCT_NAME));
    write_json(&path, &export.to_json_pretty()?)?;
    tracing::info!(path = %path.display(), entries = export.logs.len(), "ログ出力");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_dir() {
        let path = output_path(Path::new("out"), "vinscout-export-2025-01-18.json");
        assert_eq!(path, PathBuf::from("out/vinscout-export-2025-01-18.json"));
    }

    #[test]
    fn test_output_path_file() {
        let path = output_path(Path::new("out/result.json"), "vinscout-export-2025-01-18.json");
        assert_eq!(path, PathBuf::from("out/result.json"));
    }
}
