//! メインアプリケーションコンポーネント

use crate::components::{
    admin_panel::AdminPanel,
    decode_dialog::DecodeDialog,
    export_buttons::ExportButtons,
    extraction_results::ExtractionResults,
    header::Header,
    insurance_form::InsuranceForm,
    manual_entry::ManualEntry,
    progress_bar::ProgressBar,
    upload_area::UploadArea,
    uploaded_files::UploadedFiles,
    vehicle_results::VehicleResults,
};
use crate::download::download_json;
use crate::driver;
use crate::toast::{ToastList, Toasts};
use leptos::prelude::*;
use vinscout_common::export::download_form;
use vinscout_common::{AdminSettings, AppState, Language, Notice, UploadedFile, PRODUCT_NAME};

/// 表示中のタブ
#[derive(Clone, Copy, PartialEq, Eq)]
enum Tab {
    DocumentProcessing,
    AdminPanel,
}

/// JSONを書き出してダウンロードし、結果を通知
fn save_json(toasts: Toasts, file_name: &str, json: Result<String, vinscout_common::Error>, notice: Notice) {
    let result = json
        .map_err(|e| e.to_string())
        .and_then(|json| download_json(file_name, &json).map_err(|e| format!("{:?}", e)));
    match result {
        Ok(()) => toasts.push(notice),
        Err(e) => {
            web_sys::console::error_1(&e.clone().into());
            toasts.push(Notice::error(e));
        }
    }
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    // アプリケーション状態
    let state = RwSignal::new(AppState::new());
    let lang = RwSignal::new(Language::default());
    let (tab, set_tab) = signal(Tab::DocumentProcessing);
    let toasts = Toasts::new();

    // ファイル追加ハンドラ
    let on_files_added = move |files: Vec<UploadedFile>| {
        toasts.extend(driver::upload(state, files));
    };

    // JSON出力ハンドラ
    let on_export_json = move |_| {
        let Some((bundle, notice)) = state.try_update(|s| s.export_bundle(chrono::Utc::now())) else {
            return;
        };
        save_json(toasts, &bundle.file_name(PRODUCT_NAME), bundle.to_json_pretty(), notice);
    };

    let on_download_form = move |_| toasts.push(download_form());

    let on_save_settings = move |settings: AdminSettings| {
        if let Some(notice) = state.try_update(|s| s.save_settings(settings)) {
            toasts.push(notice);
        }
    };

    // ログ出力ハンドラ
    let on_download_logs = move |_| {
        let (logs, notice) = state.with_untracked(|s| s.log_export(chrono::Utc::now()));
        save_json(toasts, &logs.file_name(PRODUCT_NAME), logs.to_json_pretty(), notice);
    };

    let tab_button = move |target: Tab, key: &'static str| {
        view! {
            <button
                class=move || if tab.get() == target { "tab active" } else { "tab" }
                on:click=move |_| set_tab.set(target)
            >
                {move || lang.get().t(key)}
            </button>
        }
    };

    view! {
        <div class="container">
            <Header lang=lang />

            <nav class="tabs">
                {tab_button(Tab::DocumentProcessing, "documentProcessing")}
                {tab_button(Tab::AdminPanel, "adminPanel")}
            </nav>

            <Show
                when=move || tab.get() == Tab::DocumentProcessing
                fallback=move || view! {
                    <AdminPanel
                        state=state
                        lang=lang
                        on_save_settings=on_save_settings
                        on_download_logs=on_download_logs
                    />
                }
            >
                <InsuranceForm state=state lang=lang />

                <section class="card documents">
                    <h2>{move || lang.get().t("documentUploadAndExtraction")}</h2>

                    <UploadArea lang=lang on_files_added=on_files_added />
                    <UploadedFiles state=state lang=lang />

                    <button
                        class="btn btn-primary"
                        disabled=move || !state.with(|s| s.can_extract())
                        on:click=move |_| driver::start_extraction(state)
                    >
                        {move || {
                            if state.with(|s| s.is_extracting()) {
                                lang.get().t("extracting")
                            } else {
                                lang.get().t("extractVins")
                            }
                        }}
                    </button>

                    <ExtractionResults state=state lang=lang />
                    <ManualEntry state=state lang=lang toasts=toasts />

                    <button
                        class="btn btn-primary"
                        disabled=move || !state.with(|s| s.can_decode())
                        on:click=move |_| driver::request_decode(state)
                    >
                        {move || {
                            if state.with(|s| s.is_decoding()) {
                                lang.get().t("decoding")
                            } else {
                                lang.get().t("decode")
                            }
                        }}
                    </button>

                    <Show when=move || state.with(|s| s.is_decoding())>
                        <ProgressBar
                            progress=Signal::derive(move || state.with(|s| s.decode_progress()))
                            label=Signal::derive(move || lang.get().t("decoding").to_string())
                        />
                    </Show>
                </section>

                <VehicleResults state=state lang=lang />

                <ExportButtons
                    state=state
                    lang=lang
                    on_export_json=on_export_json
                    on_download_form=on_download_form
                />
            </Show>

            <DecodeDialog state=state lang=lang />
            <ToastList toasts=toasts />
        </div>
    }
}
