//! 進捗タイマーのドライバ
//!
//! 状態遷移は `AppState` が持ち、ここでは一定間隔で1ティックずつ進めて
//! 進捗バーに反映する。抽出はファイルごとに順番に行う。

use crate::error::Result;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use rand::Rng;
use std::time::Duration;
use tokio::time::sleep;
use vinscout_common::extraction::EXTRACT_TICK;
use vinscout_common::intake::UPLOAD_TICK;
use vinscout_common::vehicle::DECODE_TICK;
use vinscout_common::{
    AppState, DecodeGate, DialogChoice, DialogOutcome, DocumentExtractor, UploadedFile, VehicleDecoder,
};

/// 各段階のティック間隔
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub upload_tick: Duration,
    pub extract_tick: Duration,
    pub decode_tick: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            upload_tick: UPLOAD_TICK,
            extract_tick: EXTRACT_TICK,
            decode_tick: DECODE_TICK,
        }
    }
}

impl Timing {
    /// 待ち時間なし（--fast）
    pub fn instant() -> Self {
        Self {
            upload_tick: Duration::ZERO,
            extract_tick: Duration::ZERO,
            decode_tick: Duration::ZERO,
        }
    }
}

/// デコード要求の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeResult {
    /// デコードした（車両数）
    Decoded(usize),
    /// 識別子がないためデコードしなかった
    NothingToDecode,
    /// ダイアログでキャンセルされた
    Cancelled,
}

pub struct Pipeline {
    timing: Timing,
    show_progress: bool,
}

impl Pipeline {
    pub fn new(timing: Timing, show_progress: bool) -> Self {
        Self { timing, show_progress }
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    fn multi(&self) -> MultiProgress {
        if self.show_progress {
            MultiProgress::new()
        } else {
            MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
        }
    }

    fn percent_bar(&self, multi: &MultiProgress, label: &str) -> ProgressBar {
        let style = ProgressStyle::with_template("{prefix:>24} [{bar:30.cyan/blue}] {pos:>3}% {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        let bar = multi.add(ProgressBar::new(100));
        bar.set_style(style);
        bar.set_prefix(label.to_string());
        bar
    }

    /// 疑似アップロードを全ファイル100%まで進める
    pub async fn upload<R: Rng + ?Sized>(&self, state: &mut AppState, rng: &mut R) {
        let multi = self.multi();
        let bars: Vec<ProgressBar> = state
            .intake()
            .entries()
            .iter()
            .map(|e| {
                let bar = self.percent_bar(&multi, &e.file.name);
                bar.set_position(e.upload_progress as u64);
                bar
            })
            .collect();

        while state.intake().is_uploading() {
            sleep(self.timing.upload_tick).await;
            state.advance_uploads(rng);
            for (bar, entry) in bars.iter().zip(state.intake().entries()) {
                bar.set_position(entry.upload_progress as u64);
            }
        }

        for bar in bars {
            bar.finish_with_message("✔");
        }
        tracing::debug!(files = state.intake().len(), "アップロード完了");
    }

    /// 抽出（ファイルごとに順番に進める）
    ///
    /// 抽出中、またはファイルがない場合は false。
    pub async fn extract<E>(&self, state: &mut AppState, extractor: &mut E) -> bool
    where
        E: DocumentExtractor + ?Sized,
    {
        let Some(indices) = state.begin_extraction() else {
            tracing::warn!("抽出を開始できません（ファイルなし、または抽出中）");
            return false;
        };

        let multi = self.multi();
        for index in indices {
            let name = state
                .extracted()
                .get(index)
                .map(|r| r.display_name().to_string())
                .unwrap_or_default();
            let bar = self.percent_bar(&multi, &name);

            loop {
                sleep(self.timing.extract_tick).await;
                let progress = state.advance_extraction(index);
                bar.set_position(progress as u64);
                if progress >= 100 {
                    break;
                }
            }

            state.extract_file(index, extractor);
            if let Some(record) = state.extracted().get(index) {
                tracing::info!(
                    file = %name,
                    status = record.status.as_str(),
                    found = record.identifiers.len(),
                    "抽出完了"
                );
                bar.finish_with_message(format!("{} ({})", record.status.as_str(), record.identifiers.len()));
            }
        }

        state.finish_extraction();
        true
    }

    /// デコード
    pub async fn decode<D>(&self, state: &mut AppState, decoder: &mut D) -> DecodeResult
    where
        D: VehicleDecoder + ?Sized,
    {
        let Some(identifiers) = state.begin_decode() else {
            return DecodeResult::NothingToDecode;
        };

        let multi = self.multi();
        let bar = self.percent_bar(&multi, "decode");
        loop {
            sleep(self.timing.decode_tick).await;
            let progress = state.advance_decode();
            bar.set_position(progress as u64);
            if progress >= 100 {
                break;
            }
        }

        let specs = decoder.decode(&identifiers);
        state.complete_decode(&identifiers, specs);
        bar.finish_with_message("✔");

        tracing::info!(vehicles = state.vehicles().len(), "デコード完了");
        DecodeResult::Decoded(state.vehicles().len())
    }

    /// 確認ダイアログを挟んでデコード
    ///
    /// 未抽出のファイルがあれば `choose` で動作を決める。
    pub async fn decode_with_gate<E, D, F>(
        &self,
        state: &mut AppState,
        extractor: &mut E,
        decoder: &mut D,
        mut choose: F,
    ) -> Result<DecodeResult>
    where
        E: DocumentExtractor + ?Sized,
        D: VehicleDecoder + ?Sized,
        F: FnMut(&[&UploadedFile]) -> Result<DialogChoice>,
    {
        match state.request_decode() {
            DecodeGate::Ready(_) => Ok(self.decode(state, decoder).await),
            DecodeGate::Busy => Ok(DecodeResult::NothingToDecode),
            DecodeGate::NeedsConfirmation => {
                let choice = {
                    let pending = state.unextracted_files();
                    choose(&pending)
                };
                // 選択に失敗してもダイアログは閉じる
                let choice = match choice {
                    Ok(choice) => choice,
                    Err(e) => {
                        state.resolve_dialog(DialogChoice::Dismiss);
                        return Err(e);
                    }
                };

                match state.resolve_dialog(choice) {
                    DialogOutcome::Decode => Ok(self.decode(state, decoder).await),
                    DialogOutcome::ExtractThenDecode => {
                        self.extract(state, extractor).await;
                        Ok(self.decode(state, decoder).await)
                    }
                    DialogOutcome::Nothing => Ok(DecodeResult::Cancelled),
                }
            }
        }
    }
}
