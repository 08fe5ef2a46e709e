//! 手動での車両追加

use crate::toast::Toasts;
use leptos::prelude::*;
use vinscout_common::identifier::is_valid_manual_input;
use vinscout_common::{AppState, Language, Notice};

/// 一覧の行（同じ識別子が複数あっても位置で区別する）
fn manual_rows(identifiers: &[String]) -> Vec<(usize, String)> {
    identifiers.iter().cloned().enumerate().collect()
}

#[component]
pub fn ManualEntry(state: RwSignal<AppState>, lang: RwSignal<Language>, toasts: Toasts) -> impl IntoView {
    let (input, set_input) = signal(String::new());

    let add = move || {
        let value = input.get_untracked();
        match state.try_update(|s| s.add_manual_identifier(&value)) {
            Some(Ok(identifier)) => {
                set_input.set(String::new());
                toasts.push(Notice::success(format!("Added {}", identifier.value)));
            }
            Some(Err(e)) => toasts.push(Notice::from(&e)),
            None => {}
        }
    };

    let manual = move || state.with(|s| manual_rows(s.extracted().manual_identifiers()));

    view! {
        <div class="manual-entry">
            <h4>{move || lang.get().t("manualVehicleAddition")}</h4>
            <div class="manual-input-row">
                <input
                    type="text"
                    placeholder=move || lang.get().t("enterVinOrPlate")
                    prop:value=move || input.get()
                    on:input=move |ev| set_input.set(event_target_value(&ev))
                    on:keydown=move |ev: web_sys::KeyboardEvent| {
                        if ev.key() == "Enter" && is_valid_manual_input(&input.get_untracked()) {
                            add();
                        }
                    }
                />
                <button
                    class="btn btn-primary btn-small"
                    disabled=move || !is_valid_manual_input(&input.get())
                    on:click=move |_| add()
                >
                    "+"
                </button>
            </div>
            <p class="text-muted">
                {move || format!("{} / {}", lang.get().t("vinPlaceholder"), lang.get().t("platePlaceholder"))}
            </p>

            <Show when=move || !manual().is_empty()>
                <h5>{move || lang.get().t("manualEntries")}</h5>
                <ul class="manual-list">
                    <For
                        each=manual
                        key=|row| row.clone()
                        children=move |(_, value)| {
                            let target = value.clone();
                            view! {
                                <li>
                                    <span>{value}</span>
                                    <button
                                        class="btn btn-tertiary btn-small"
                                        on:click=move |_| {
                                            state.update(|s| {
                                                s.remove_manual_identifier(&target);
                                            });
                                        }
                                    >
                                        "✕"
                                    </button>
                                </li>
                            }
                        }
                    />
                </ul>
            </Show>
        </div>
    }
}
