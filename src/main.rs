use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::IsTerminal;
use std::path::PathBuf;
use vinscout::{cli, config, error, export, logging, pipeline, prompt, scanner};
use cli::{Cli, Commands};
use config::Config;
use pipeline::{DecodeResult, Pipeline, Timing};
use vinscout_common::identifier;
use vinscout_common::{AppState, ExtractionStatus, LogExport, MockDecoder, MockExtractor};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let mut config = Config::load().context("設定の読み込みに失敗しました")?;

    match cli.command {
        Commands::Process { paths, manual, output, on_unextracted, skip_extract, seed, fast, form } => {
            println!("🚗 vinscout - 書類処理\n");

            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let timing = if fast || config.fast { Timing::instant() } else { Timing::default() };
            let pipeline = Pipeline::new(timing, std::io::stderr().is_terminal());

            let mut state = AppState::with_settings(config.settings.clone());
            state.update_form(|f| form.apply(f));

            // 1. 受付
            println!("[1/5] 書類を読み込み中...");
            let files = scanner::load_documents(&paths)?;
            if files.is_empty() && manual.is_empty() {
                let joined = paths.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", ");
                return Err(error::VinScoutError::NoDocuments(joined).into());
            }

            let (report, notices) = state.upload_files(files);
            for notice in &notices {
                println!("✖ {}", notice.message);
            }
            pipeline.upload(&mut state, &mut rng).await;
            println!("✔ {}件を受付\n", report.accepted.len());

            // 2. 抽出
            let mut extractor = MockExtractor::with_success_rate(
                StdRng::seed_from_u64(rng.gen()),
                config.extraction_success_rate,
            );
            if skip_extract {
                println!("[2/5] 抽出をスキップ\n");
            } else if state.can_extract() {
                println!("[2/5] VINを抽出中...");
                pipeline.extract(&mut state, &mut extractor).await;
                for (_, record) in state.extracted().uploaded_records() {
                    let icon = record.file().and_then(|f| f.kind()).map(|k| k.icon()).unwrap_or("📄");
                    match record.status {
                        ExtractionStatus::Success => println!(
                            "  {} {}: {}件 ({})",
                            icon,
                            record.display_name(),
                            record.identifiers.len(),
                            record.identifiers.join(", ")
                        ),
                        _ => println!("  {} {}: 見つかりませんでした", icon, record.display_name()),
                    }
                }
                println!("✔ 抽出完了\n");
            } else {
                println!("[2/5] 抽出対象の書類がありません\n");
            }

            // 3. 手動入力
            println!("[3/5] 手動入力...");
            for input in &manual {
                match state.add_manual_identifier(input) {
                    Ok(id) => println!("  ✔ {} ({})", id.value, id.kind),
                    Err(e) => println!("  ✖ {}", e),
                }
            }
            println!("✔ 手動入力 {}件\n", state.extracted().manual_identifiers().len());

            // 4. デコード
            println!("[4/5] 車両をデコード中...");
            let result = pipeline
                .decode_with_gate(&mut state, &mut extractor, &mut MockDecoder, |pending| {
                    prompt::resolve_choice(on_unextracted, pending)
                })
                .await?;
            match result {
                DecodeResult::Decoded(count) => {
                    for vehicle in state.vehicles() {
                        println!(
                            "  #{} {} {} {} ({})",
                            vehicle.id,
                            vehicle.label(),
                            vehicle.cebia.manufacturer,
                            vehicle.cebia.model,
                            vehicle.cebia.year
                        );
                    }
                    println!("✔ {}台をデコード\n", count);
                }
                DecodeResult::NothingToDecode => println!("- デコードする識別子がありません\n"),
                DecodeResult::Cancelled => println!("- デコードをキャンセルしました\n"),
            }

            // 5. エクスポート
            println!("[5/5] エクスポート中...");
            let output_dir = output.unwrap_or_else(|| PathBuf::from("."));
            let (bundle, notice) = state.export_bundle(Utc::now());
            let path = export::write_bundle(&bundle, &output_dir)?;
            println!("✔ {}: {}", notice.message, path.display());

            config::save_session_log(&Config::session_log_path()?, state.log().entries())?;

            println!("\n✅ 完了");
        }

        Commands::Classify { identifiers } => {
            for input in identifiers {
                match identifier::parse_manual(&input) {
                    Ok(id) => println!("✔ {} → {}", id.value, id.kind),
                    Err(e) => println!("✖ {}", e),
                }
            }
        }

        Commands::Logs { output } => {
            let entries = config::load_session_log(&Config::session_log_path()?)?;
            let logs = LogExport::new(&entries, Utc::now());
            let output_dir = output.unwrap_or_else(|| PathBuf::from("."));
            let path = export::write_log_export(&logs, &output_dir)?;
            println!("✔ ログを出力しました: {} ({}件)", path.display(), logs.logs.len());
        }

        Commands::Config { show, set_confidence, set_max_file_size, set_tess_data, set_fast } => {
            let mut changed = false;

            if let Some(threshold) = set_confidence {
                config.settings.confidence_threshold = threshold.clamp(0.0, 10.0);
                changed = true;
            }
            if let Some(size) = set_max_file_size {
                config.settings.max_file_size_mb = size;
                changed = true;
            }
            if let Some(path) = set_tess_data {
                config.settings.tess_data_path = path;
                changed = true;
            }
            if let Some(fast) = set_fast {
                config.fast = fast;
                changed = true;
            }

            if changed {
                config.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                println!("設定:");
                println!("  OCR信頼度しきい値: {}", config.settings.confidence_threshold);
                println!("  最大ファイルサイズ: {} MB", config.settings.max_file_size_mb);
                println!("  Tesseractデータ: {}", config.settings.tess_data_path);
                println!("  待ち時間省略: {}", if config.fast { "有効" } else { "無効" });
                println!("  抽出成功率: {}", config.extraction_success_rate);
            }
        }
    }

    Ok(())
}
