//! アップロード済みファイル一覧

use leptos::prelude::*;
use vinscout_common::{AppState, Language};

#[component]
pub fn UploadedFiles(state: RwSignal<AppState>, lang: RwSignal<Language>) -> impl IntoView {
    let entries = move || state.with(|s| s.intake().entries().to_vec());

    view! {
        <Show when=move || state.with(|s| !s.intake().is_empty())>
            <div class="uploaded-files">
                <h4>{move || lang.get().t("uploadedFiles")}</h4>
                <For
                    each=entries
                    key=|entry| (entry.file.id, entry.upload_progress)
                    children=move |entry| {
                        let icon = entry.file.kind().map_or("📄", |k| k.icon());
                        let uploaded = entry.is_uploaded();
                        view! {
                            <div class="file-row">
                                <span class="file-icon">{icon}</span>
                                <span class="file-name">{entry.file.name.clone()}</span>
                                <span class="text-muted">{entry.file.size_mb()}</span>
                                <Show
                                    when=move || uploaded
                                    fallback=move || view! {
                                        <div class="progress-bar progress-small">
                                            <div
                                                class="progress-fill"
                                                style=format!("width: {}%", entry.upload_progress)
                                            />
                                        </div>
                                    }
                                >
                                    <span class="badge badge-success">"✓"</span>
                                </Show>
                            </div>
                        }
                    }
                />
            </div>
        </Show>
    }
}
