//! エクスポートボタンコンポーネント

use leptos::prelude::*;
use vinscout_common::{AppState, Language};

#[component]
pub fn ExportButtons<FJ, FF>(
    state: RwSignal<AppState>,
    lang: RwSignal<Language>,
    on_export_json: FJ,
    on_download_form: FF,
) -> impl IntoView
where
    FJ: Fn(()) + 'static + Clone,
    FF: Fn(()) + 'static + Clone,
{
    let has_vehicles = move || state.with(|s| !s.vehicles().is_empty());

    view! {
        <div class="export-buttons">
            <button
                class="btn btn-secondary"
                disabled=move || !has_vehicles()
                on:click={
                    let on_export_json = on_export_json.clone();
                    move |_| on_export_json(())
                }
            >
                {move || lang.get().t("exportJson")}
            </button>

            <button
                class="btn btn-secondary"
                disabled=move || !has_vehicles()
                on:click={
                    let on_download_form = on_download_form.clone();
                    move |_| on_download_form(())
                }
            >
                {move || lang.get().t("downloadForm")}
            </button>
        </div>
    }
}
