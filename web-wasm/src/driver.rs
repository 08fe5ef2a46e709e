//! 進捗タイマーのドライバ（ブラウザ版）
//!
//! 状態遷移は `AppState` が持ち、ここでは `TimeoutFuture` で一定間隔ごとに
//! 1ティックずつ進める。抽出はファイルごとに順番に行う。
//! 予約されたデコードは、抽出を走らせているタスクが抽出の完了後に実行する。

use gloo::timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;
use vinscout_common::extraction::EXTRACT_TICK;
use vinscout_common::intake::UPLOAD_TICK;
use vinscout_common::vehicle::DECODE_TICK;
use vinscout_common::{
    AppState, DecodeGate, DialogChoice, DialogOutcome, MockDecoder, MockExtractor, UploadedFile, VehicleDecoder,
};

fn tick(duration: Duration) -> TimeoutFuture {
    TimeoutFuture::new(duration.as_millis() as u32)
}

/// ファイルを受け付けてアップロード進捗を開始
///
/// 戻り値: 却下されたファイルの通知
pub fn upload(state: RwSignal<AppState>, files: Vec<UploadedFile>) -> Vec<vinscout_common::Notice> {
    let was_uploading = state.with_untracked(|s| s.intake().is_uploading());
    let notices = state
        .try_update(|s| s.upload_files(files).1)
        .unwrap_or_default();

    // 進行中のティッカーがあれば新しいファイルもそちらで進む
    if !was_uploading {
        spawn_local(async move {
            let mut rng = StdRng::from_entropy();
            while state.with_untracked(|s| s.intake().is_uploading()) {
                tick(UPLOAD_TICK).await;
                state.update(|s| {
                    s.advance_uploads(&mut rng);
                });
            }
        });
    }

    notices
}

/// 抽出を最後まで実行し、予約されたデコードがあれば続けて実行
pub async fn extract(state: RwSignal<AppState>) {
    let Some(indices) = state.try_update(|s| s.begin_extraction()).flatten() else {
        // 抽出中なら走行中のタスクが予約を引き継ぐ
        run_queued_decode(state).await;
        return;
    };

    let mut extractor = MockExtractor::new(StdRng::from_entropy());
    for index in indices {
        loop {
            tick(EXTRACT_TICK).await;
            let progress = state.try_update(|s| s.advance_extraction(index)).unwrap_or(100);
            if progress >= 100 {
                break;
            }
        }
        state.update(|s| {
            s.extract_file(index, &mut extractor);
        });
    }

    state.update(|s| s.finish_extraction());
    web_sys::console::log_1(&"extraction finished".into());
    run_queued_decode(state).await;
}

async fn run_queued_decode(state: RwSignal<AppState>) {
    if state.try_update(|s| s.take_queued_decode()).unwrap_or(false) {
        decode(state).await;
    }
}

/// デコードを最後まで実行
pub async fn decode(state: RwSignal<AppState>) {
    let Some(identifiers) = state.try_update(|s| s.begin_decode()).flatten() else {
        return;
    };

    loop {
        tick(DECODE_TICK).await;
        let progress = state.try_update(|s| s.advance_decode()).unwrap_or(100);
        if progress >= 100 {
            break;
        }
    }

    let specs = MockDecoder.decode(&identifiers);
    state.update(|s| s.complete_decode(&identifiers, specs));
}

/// 抽出ボタン
pub fn start_extraction(state: RwSignal<AppState>) {
    spawn_local(extract(state));
}

/// デコードボタン（未抽出のファイルがあれば確認ダイアログを開く）
pub fn request_decode(state: RwSignal<AppState>) {
    if let Some(DecodeGate::Ready(_)) = state.try_update(|s| s.request_decode()) {
        spawn_local(decode(state));
    }
}

/// 確認ダイアログの選択
pub fn resolve_dialog(state: RwSignal<AppState>, choice: DialogChoice) {
    match state.try_update(|s| s.resolve_dialog(choice)) {
        Some(DialogOutcome::Decode) => spawn_local(decode(state)),
        Some(DialogOutcome::ExtractThenDecode) => spawn_local(extract(state)),
        Some(DialogOutcome::Nothing) | None => {}
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use leptos::reactive::owner::Owner;
    use leptos::task::Executor;
    use vinscout_common::DocumentKind;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn pdf(name: &str) -> UploadedFile {
        UploadedFile::with_size(name, DocumentKind::Pdf.mime_type(), 1024)
    }

    /// 手動入力1件とPDF1件を持つ状態
    fn setup() -> (Owner, RwSignal<AppState>) {
        let _ = Executor::init_wasm_bindgen();
        let owner = Owner::new();
        owner.set();

        let state = RwSignal::new(AppState::new());
        state.update(|s| {
            s.upload_files(vec![pdf("a.pdf")]);
            s.add_manual_identifier("AB12345").expect("手動入力失敗");
        });
        (owner, state)
    }

    async fn wait_until_idle(state: RwSignal<AppState>) {
        // 抽出1件 2秒 + デコード 2秒に余裕を持たせる
        for _ in 0..100 {
            tick(EXTRACT_TICK).await;
            let idle = state.with_untracked(|s| !s.is_extracting() && !s.is_decoding() && !s.decode_queued());
            if idle && state.with_untracked(|s| !s.vehicles().is_empty()) {
                return;
            }
        }
    }

    #[wasm_bindgen_test]
    async fn wasm_extract_then_decode_during_extraction_waits_for_results() {
        let (_owner, state) = setup();

        spawn_local(extract(state));
        TimeoutFuture::new(0).await;
        assert!(state.with_untracked(|s| s.is_extracting()), "抽出が始まっていない");

        request_decode(state);
        assert!(state.with_untracked(|s| s.dialog_open()));
        resolve_dialog(state, DialogChoice::ExtractThenDecode);

        wait_until_idle(state).await;

        state.with_untracked(|s| {
            assert!(s.extracted().records().iter().all(|r| !r.is_processing()), "抽出が終わっていない");
            assert_eq!(s.vehicles().len(), s.extracted().all_identifiers().len());
            assert!(s.vehicles().iter().any(|v| v.license_plate == "AB12345"));
        });
    }

    #[wasm_bindgen_test]
    async fn wasm_decode_anyway_uses_current_identifiers() {
        let (_owner, state) = setup();

        request_decode(state);
        resolve_dialog(state, DialogChoice::DecodeAnyway);
        wait_until_idle(state).await;

        state.with_untracked(|s| {
            assert_eq!(s.vehicles().len(), 1);
            assert_eq!(s.vehicles()[0].license_plate, "AB12345");
        });
    }
}
