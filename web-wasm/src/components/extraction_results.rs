//! 抽出結果一覧

use leptos::prelude::*;
use vinscout_common::{AppState, ExtractedFileRecord, ExtractionStatus, Language};

fn badge_class(status: ExtractionStatus) -> &'static str {
    match status {
        ExtractionStatus::Processing => "badge badge-info",
        ExtractionStatus::Success => "badge badge-success",
        ExtractionStatus::Error => "badge badge-error",
    }
}

#[component]
pub fn ExtractionResults(state: RwSignal<AppState>, lang: RwSignal<Language>) -> impl IntoView {
    let records = move || {
        state.with(|s| {
            s.extracted()
                .uploaded_records()
                .map(|(index, record)| (index, record.clone()))
                .collect::<Vec<_>>()
        })
    };

    view! {
        <Show when=move || state.with(|s| s.extracted().uploaded_records().next().is_some())>
            <div class="extraction-results">
                <h4>{move || lang.get().t("extractionResults")}</h4>
                <For
                    each=records
                    key=|(index, record)| (*index, record.status, record.progress, record.identifiers.clone())
                    children=move |(index, record)| view! { <ExtractionRow state=state lang=lang index=index record=record /> }
                />
            </div>
        </Show>
    }
}

#[component]
fn ExtractionRow(
    state: RwSignal<AppState>,
    lang: RwSignal<Language>,
    index: usize,
    record: ExtractedFileRecord,
) -> impl IntoView {
    let status = record.status;
    let progress = record.progress;
    let count = record.identifiers.len();

    let identifiers = record
        .identifiers
        .iter()
        .enumerate()
        .map(|(i, value)| {
            view! {
                <input
                    type="text"
                    class="identifier-input"
                    value=value.clone()
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        state.update(|s| {
                            s.update_extracted_identifier(index, i, value);
                        });
                    }
                />
            }
        })
        .collect_view();

    view! {
        <div class="extraction-row">
            <div class="extraction-header">
                <span class="file-name">{record.display_name().to_string()}</span>
                <span class=badge_class(status)>{move || lang.get().t(status.as_str())}</span>
            </div>
            <Show when=move || status == ExtractionStatus::Processing>
                <div class="progress-bar progress-small">
                    <div class="progress-fill" style=format!("width: {}%", progress) />
                </div>
            </Show>
            <Show when=move || status != ExtractionStatus::Processing>
                <p class="text-muted">
                    {move || {
                        if count == 0 {
                            lang.get().t("noVinsFound").to_string()
                        } else {
                            format!("{} {}", count, lang.get().t("vinsFound"))
                        }
                    }}
                </p>
            </Show>
            <div class="identifier-list">{identifiers}</div>
        </div>
    }
}
