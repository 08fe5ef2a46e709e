//! 未抽出ファイルの確認ダイアログ

use crate::cli::OnUnextracted;
use crate::error::{Result, VinScoutError};
use dialoguer::Select;
use std::io::IsTerminal;
use vinscout_common::{DialogChoice, UploadedFile};

const CHOICES: [(&str, DialogChoice); 3] = [
    ("そのままデコード", DialogChoice::DecodeAnyway),
    ("抽出してからデコード", DialogChoice::ExtractThenDecode),
    ("キャンセル", DialogChoice::Dismiss),
];

/// 確認ダイアログを表示（Esc/q はキャンセル扱い）
pub fn ask_unextracted(files: &[&UploadedFile]) -> Result<DialogChoice> {
    println!("⚠ 抽出が終わっていないファイルがあります:");
    for file in files {
        println!("  - {}", file.name);
    }

    let items: Vec<&str> = CHOICES.iter().map(|(label, _)| *label).collect();
    let selection = Select::new()
        .with_prompt("どうしますか？")
        .items(&items)
        .default(0)
        .interact_opt()
        .map_err(|e| VinScoutError::Prompt(e.to_string()))?;

    Ok(selection
        .map(|i| CHOICES[i].1)
        .unwrap_or(DialogChoice::Dismiss))
}

/// CLIの指定からダイアログの選択を決める
///
/// `ask` でも端末でなければ確認せずにデコードする。
pub fn resolve_choice(mode: OnUnextracted, files: &[&UploadedFile]) -> Result<DialogChoice> {
    match mode {
        OnUnextracted::Decode => Ok(DialogChoice::DecodeAnyway),
        OnUnextracted::Extract => Ok(DialogChoice::ExtractThenDecode),
        OnUnextracted::Ask if std::io::stdin().is_terminal() => ask_unextracted(files),
        OnUnextracted::Ask => {
            tracing::info!("端末ではないため確認せずにデコードします");
            Ok(DialogChoice::DecodeAnyway)
        }
    }
}
