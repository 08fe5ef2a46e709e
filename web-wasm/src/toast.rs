//! 自動で消える通知

use gloo::timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use vinscout_common::{Notice, NoticeLevel};

/// 表示時間（ミリ秒）
const TOAST_DURATION_MS: u32 = 4000;

#[derive(Clone, Copy)]
pub struct Toasts {
    items: RwSignal<Vec<(u64, Notice)>>,
    next_id: RwSignal<u64>,
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new()
    }
}

impl Toasts {
    pub fn new() -> Self {
        Self {
            items: RwSignal::new(Vec::new()),
            next_id: RwSignal::new(0),
        }
    }

    pub fn push(&self, notice: Notice) {
        let id = self.next_id.get_untracked() + 1;
        self.next_id.set(id);
        self.items.update(|items| items.push((id, notice)));

        let items = self.items;
        spawn_local(async move {
            TimeoutFuture::new(TOAST_DURATION_MS).await;
            items.update(|items| items.retain(|(i, _)| *i != id));
        });
    }

    pub fn extend(&self, notices: impl IntoIterator<Item = Notice>) {
        for notice in notices {
            self.push(notice);
        }
    }
}

fn level_class(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Success => "toast toast-success",
        NoticeLevel::Info => "toast toast-info",
        NoticeLevel::Error => "toast toast-error",
    }
}

#[component]
pub fn ToastList(toasts: Toasts) -> impl IntoView {
    view! {
        <div class="toast-container">
            <For
                each=move || toasts.items.get()
                key=|(id, _)| *id
                children=move |(_, notice)| {
                    view! { <div class=level_class(notice.level)>{notice.message}</div> }
                }
            />
        </div>
    }
}
