//! アップロードエリアコンポーネント

use leptos::html::Input;
use leptos::prelude::*;
use vinscout_common::{DocumentKind, Language, UploadedFile};
use web_sys::{DragEvent, FileList, HtmlInputElement};

/// ブラウザのファイル一覧をメタデータのみの `UploadedFile` に変換
fn collect_files(files: FileList) -> Vec<UploadedFile> {
    (0..files.length())
        .filter_map(|i| files.get(i))
        .map(|file| UploadedFile::with_size(file.name(), file.type_(), file.size() as u64))
        .collect()
}

#[component]
pub fn UploadArea<F>(lang: RwSignal<Language>, on_files_added: F) -> impl IntoView
where
    F: Fn(Vec<UploadedFile>) + 'static + Clone,
{
    let (is_dragover, set_is_dragover) = signal(false);
    let input_ref = NodeRef::<Input>::new();

    let on_drop = {
        let on_files_added = on_files_added.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            set_is_dragover.set(false);

            if let Some(files) = ev.data_transfer().and_then(|dt| dt.files()) {
                on_files_added(collect_files(files));
            }
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(true);
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    // ファイル選択ダイアログを開く
    let on_click = move |_| {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    let on_change = {
        let on_files_added = on_files_added.clone();
        move |ev: web_sys::Event| {
            let input = event_target::<HtmlInputElement>(&ev);
            if let Some(files) = input.files() {
                on_files_added(collect_files(files));
            }
            // 同じファイルを再選択できるように
            input.set_value("");
        }
    };

    view! {
        <div
            class=move || if is_dragover.get() { "upload-area dragover" } else { "upload-area" }
            on:drop=on_drop
            on:dragover=on_dragover
            on:dragleave=on_dragleave
            on:click=on_click
        >
            <input
                node_ref=input_ref
                type="file"
                multiple=true
                accept=DocumentKind::accept_attribute()
                style="display: none"
                on:change=on_change
            />
            <div class="upload-icon">"📄"</div>
            <p>{move || lang.get().t("dropFiles")}</p>
            <p class="text-muted">{move || lang.get().t("supportedFormats")}</p>
        </div>
    }
}
