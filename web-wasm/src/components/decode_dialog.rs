//! 未抽出ファイルの確認ダイアログ

use crate::driver;
use leptos::prelude::*;
use vinscout_common::{AppState, DialogChoice, Language};

#[component]
pub fn DecodeDialog(state: RwSignal<AppState>, lang: RwSignal<Language>) -> impl IntoView {
    let choose = move |choice: DialogChoice| driver::resolve_dialog(state, choice);

    view! {
        <Show when=move || state.with(|s| s.dialog_open())>
            <div class="dialog-backdrop" on:click=move |_| choose(DialogChoice::Dismiss)>
                // 背景クリックだけで閉じる
                <div class="dialog" on:click=|ev| ev.stop_propagation()>
                    <h3>{move || lang.get().t("unextractedFiles")}</h3>
                    <p>{move || lang.get().t("unextractedFilesDesc")}</p>
                    <ul class="dialog-files">
                        {move || {
                            state.with(|s| {
                                s.unextracted_files()
                                    .into_iter()
                                    .map(|f| view! { <li>{f.name.clone()}</li> })
                                    .collect_view()
                            })
                        }}
                    </ul>
                    <div class="dialog-actions">
                        <button class="btn btn-secondary" on:click=move |_| choose(DialogChoice::DecodeAnyway)>
                            {move || lang.get().t("decode")}
                        </button>
                        <button class="btn btn-primary" on:click=move |_| choose(DialogChoice::ExtractThenDecode)>
                            {move || lang.get().t("extract")}
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
