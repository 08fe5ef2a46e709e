//! 進捗ドライバの統合テスト
//!
//! tokio の一時停止クロックでティック間隔を検証する。

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::Cell;
use std::time::Duration;
use tokio::time::Instant;
use vinscout::error::VinScoutError;
use vinscout::pipeline::{DecodeResult, Pipeline, Timing};
use vinscout_common::{
    AppState, DialogChoice, DocumentKind, ExtractionStatus, MockDecoder, MockExtractor, UploadedFile,
};

fn doc(name: &str, kind: DocumentKind) -> UploadedFile {
    UploadedFile::with_size(name, kind.mime_type(), 2048)
}

fn extractor() -> MockExtractor<StdRng> {
    MockExtractor::with_success_rate(StdRng::seed_from_u64(1), 1.0)
}

fn pipeline() -> Pipeline {
    Pipeline::new(Timing::default(), false)
}

#[tokio::test(start_paused = true)]
async fn test_upload_reaches_100() {
    let mut state = AppState::new();
    state.upload_files(vec![doc("a.pdf", DocumentKind::Pdf), doc("b.docx", DocumentKind::Docx)]);
    let mut rng = StdRng::seed_from_u64(9);

    let start = Instant::now();
    pipeline().upload(&mut state, &mut rng).await;

    assert!(state.intake().entries().iter().all(|e| e.upload_progress == 100));
    // 最低4、最大20ティック（200ms間隔）
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(4 * 200), "早すぎる: {:?}", elapsed);
    assert!(elapsed <= Duration::from_millis(20 * 200), "遅すぎる: {:?}", elapsed);
}

#[tokio::test(start_paused = true)]
async fn test_extraction_is_sequential() {
    let mut state = AppState::new();
    state.upload_files(vec![doc("a.pdf", DocumentKind::Pdf), doc("b.xlsx", DocumentKind::Xlsx)]);

    let start = Instant::now();
    assert!(pipeline().extract(&mut state, &mut extractor()).await);

    // 1ファイル10ティック × 200ms × 2ファイル
    assert_eq!(start.elapsed(), Duration::from_secs(4));
    assert!(!state.is_extracting());

    let counts: Vec<_> = state
        .extracted()
        .uploaded_records()
        .map(|(_, r)| (r.status, r.identifiers.len()))
        .collect();
    assert_eq!(
        counts,
        vec![(ExtractionStatus::Success, 1), (ExtractionStatus::Success, 3)]
    );
}

#[tokio::test(start_paused = true)]
async fn test_extract_without_files() {
    let mut state = AppState::new();
    assert!(!pipeline().extract(&mut state, &mut extractor()).await);
}

#[tokio::test(start_paused = true)]
async fn test_decode_takes_twenty_ticks() {
    let mut state = AppState::new();
    state.add_manual_identifier("AB12345").unwrap();

    let start = Instant::now();
    let result = pipeline().decode(&mut state, &mut MockDecoder).await;

    assert_eq!(result, DecodeResult::Decoded(1));
    assert_eq!(start.elapsed(), Duration::from_secs(2));
    assert!(!state.is_decoding());
}

#[tokio::test(start_paused = true)]
async fn test_decode_nothing() {
    let mut state = AppState::new();
    let result = pipeline().decode(&mut state, &mut MockDecoder).await;
    assert_eq!(result, DecodeResult::NothingToDecode);
}

#[tokio::test]
async fn test_gate_ready_skips_prompt() {
    let mut state = AppState::new();
    state.add_manual_identifier("WBAVA31030NL12345").unwrap();
    let asked = Cell::new(false);

    let result = Pipeline::new(Timing::instant(), false)
        .decode_with_gate(&mut state, &mut extractor(), &mut MockDecoder, |_| {
            asked.set(true);
            Ok(DialogChoice::Dismiss)
        })
        .await
        .unwrap();

    assert_eq!(result, DecodeResult::Decoded(1));
    assert!(!asked.get(), "確認ダイアログが表示された");
}

#[tokio::test]
async fn test_gate_dismiss_does_nothing() {
    let mut state = AppState::new();
    state.upload_files(vec![doc("a.pdf", DocumentKind::Pdf)]);
    state.add_manual_identifier("AB12345").unwrap();

    let result = Pipeline::new(Timing::instant(), false)
        .decode_with_gate(&mut state, &mut extractor(), &mut MockDecoder, |pending| {
            assert_eq!(pending.len(), 1);
            assert_eq!(pending[0].name, "a.pdf");
            Ok(DialogChoice::Dismiss)
        })
        .await
        .unwrap();

    assert_eq!(result, DecodeResult::Cancelled);
    assert!(state.vehicles().is_empty());
    assert!(!state.dialog_open());
}

#[tokio::test]
async fn test_gate_decode_anyway() {
    let mut state = AppState::new();
    state.upload_files(vec![doc("a.pdf", DocumentKind::Pdf)]);
    state.add_manual_identifier("AB12345").unwrap();

    let result = Pipeline::new(Timing::instant(), false)
        .decode_with_gate(&mut state, &mut extractor(), &mut MockDecoder, |_| Ok(DialogChoice::DecodeAnyway))
        .await
        .unwrap();

    // 未抽出のPDFは含まれない
    assert_eq!(result, DecodeResult::Decoded(1));
    assert_eq!(state.vehicles()[0].license_plate, "AB12345");
}

#[tokio::test]
async fn test_gate_extract_then_decode_end_to_end() {
    let mut state = AppState::new();
    state.upload_files(vec![
        doc("registration.pdf", DocumentKind::Pdf),
        doc("fleet.xlsx", DocumentKind::Xlsx),
    ]);
    state.add_manual_identifier("AB12345").unwrap();

    let result = Pipeline::new(Timing::instant(), false)
        .decode_with_gate(&mut state, &mut extractor(), &mut MockDecoder, |_| {
            Ok(DialogChoice::ExtractThenDecode)
        })
        .await
        .unwrap();

    assert_eq!(result, DecodeResult::Decoded(5));
    let vins = state.vehicles().iter().filter(|v| !v.vin.is_empty()).count();
    assert_eq!(vins, 3);
    assert_eq!(state.extracted().manual_identifiers(), ["AB12345"]);
}

#[tokio::test]
async fn test_gate_prompt_error_propagates() {
    let mut state = AppState::new();
    state.upload_files(vec![doc("a.pdf", DocumentKind::Pdf)]);

    let result = Pipeline::new(Timing::instant(), false)
        .decode_with_gate(&mut state, &mut extractor(), &mut MockDecoder, |_| {
            Err(VinScoutError::Prompt("interrupted".into()))
        })
        .await;

    assert!(matches!(result, Err(VinScoutError::Prompt(_))));
    assert!(!state.dialog_open(), "ダイアログが開いたまま");
    assert!(!state.decode_queued());
}
