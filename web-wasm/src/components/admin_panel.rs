//! 管理パネル（システム設定とログ）

use leptos::prelude::*;
use vinscout_common::{AdminSettings, AppState, Language, LogEntry, LogLevel};

fn level_class(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Info => "badge badge-info",
        LogLevel::Warn => "badge badge-warn",
        LogLevel::Success => "badge badge-success",
        LogLevel::Error => "badge badge-error",
    }
}

#[component]
pub fn AdminPanel<FS, FL>(
    state: RwSignal<AppState>,
    lang: RwSignal<Language>,
    on_save_settings: FS,
    on_download_logs: FL,
) -> impl IntoView
where
    FS: Fn(AdminSettings) + 'static + Clone,
    FL: Fn(()) + 'static + Clone,
{
    // 保存ボタンを押すまでは下書きとして保持
    let draft = RwSignal::new(state.with_untracked(|s| s.settings().clone()));
    let logs = move || state.with(|s| s.log().entries().to_vec());

    view! {
        <div class="admin-panel">
            <section class="card">
                <h2>{move || lang.get().t("systemSettings")}</h2>
                <div class="settings-grid">
                    <div class="form-group">
                        <label for="confidence">{move || lang.get().t("ocrConfidenceThreshold")}</label>
                        <input
                            type="number"
                            id="confidence"
                            min="0"
                            max="10"
                            step="0.1"
                            prop:value=move || draft.get().confidence_threshold.to_string()
                            on:input=move |ev| {
                                if let Ok(value) = event_target_value(&ev).parse::<f32>() {
                                    draft.update(|d| d.confidence_threshold = value.clamp(0.0, 10.0));
                                }
                            }
                        />
                        <p class="text-muted">{move || lang.get().t("ocrConfidenceDesc")}</p>
                    </div>
                    <div class="form-group">
                        <label for="max-file-size">{move || lang.get().t("maxFileSize")}</label>
                        <input
                            type="number"
                            id="max-file-size"
                            min="1"
                            prop:value=move || draft.get().max_file_size_mb.to_string()
                            on:input=move |ev| {
                                if let Ok(value) = event_target_value(&ev).parse::<u32>() {
                                    draft.update(|d| d.max_file_size_mb = value);
                                }
                            }
                        />
                        <p class="text-muted">{move || lang.get().t("maxFileSizeDesc")}</p>
                    </div>
                    <div class="form-group">
                        <label for="tess-data">{move || lang.get().t("tesseractDataPath")}</label>
                        <input
                            type="text"
                            id="tess-data"
                            prop:value=move || draft.get().tess_data_path
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                draft.update(|d| d.tess_data_path = value);
                            }
                        />
                        <p class="text-muted">{move || lang.get().t("tesseractDataDesc")}</p>
                    </div>
                </div>
                <button
                    class="btn btn-primary"
                    on:click={
                        let on_save_settings = on_save_settings.clone();
                        move |_| on_save_settings(draft.get_untracked())
                    }
                >
                    {move || lang.get().t("saveSettings")}
                </button>
            </section>

            <section class="card">
                <div class="section-header">
                    <h2>{move || lang.get().t("systemLogs")}</h2>
                    <button
                        class="btn btn-secondary btn-small"
                        on:click={
                            let on_download_logs = on_download_logs.clone();
                            move |_| on_download_logs(())
                        }
                    >
                        {move || lang.get().t("downloadLogs")}
                    </button>
                </div>
                <Show
                    when=move || state.with(|s| !s.log().is_empty())
                    fallback=move || view! { <p class="text-muted">{move || lang.get().t("noLogs")}</p> }
                >
                    <ul class="log-list">
                        <For
                            each=logs
                            key=|entry| entry.id
                            children=move |entry| view! { <LogRow lang=lang entry=entry /> }
                        />
                    </ul>
                </Show>
            </section>
        </div>
    }
}

#[component]
fn LogRow(lang: RwSignal<Language>, entry: LogEntry) -> impl IntoView {
    let (expanded, set_expanded) = signal(false);
    let level = entry.level;
    let details = serde_json::to_string_pretty(&entry.details).unwrap_or_default();
    let has_details = !entry.details.is_null();

    view! {
        <li class="log-entry">
            <span class="text-muted">{entry.timestamp.format("%H:%M:%S").to_string()}</span>
            <span class=level_class(level)>{move || lang.get().t(level.as_str())}</span>
            <span>{entry.message.clone()}</span>
            <Show when=move || has_details>
                <button
                    class="btn btn-tertiary btn-small"
                    on:click=move |_| set_expanded.update(|e| *e = !*e)
                >
                    {move || lang.get().t("viewDetails")}
                </button>
            </Show>
            <Show when=move || expanded.get()>
                <pre class="log-details">{details.clone()}</pre>
            </Show>
        </li>
    }
}
