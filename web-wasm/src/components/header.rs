//! ヘッダーコンポーネント

use leptos::prelude::*;
use vinscout_common::Language;

#[component]
pub fn Header(lang: RwSignal<Language>) -> impl IntoView {
    view! {
        <header class="header">
            <div>
                <h1>{move || lang.get().t("title")}</h1>
                <p class="text-muted">{move || lang.get().t("subtitle")}</p>
            </div>
            <button
                class="btn btn-tertiary btn-small lang-toggle"
                on:click=move |_| lang.update(|l| *l = l.toggle())
            >
                // 切り替え先の言語を表示
                {move || lang.get().toggle().code().to_uppercase()}
            </button>
        </header>
    }
}
