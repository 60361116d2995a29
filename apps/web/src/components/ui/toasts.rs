//! Transient notification stack. Toasts are appended by any [`Notifier`]
//! caller and removed again after a fixed delay.

use crate::{
    app_lib::{Notice, Notifier},
    components::ui::AlertKind,
};
use gloo_timers::callback::Timeout;
use leptos::prelude::*;

const TOAST_MILLIS: u32 = 3_000;

#[derive(Clone, Debug, PartialEq, Eq)]
struct Toast {
    id: u64,
    notice: Notice,
}

/// Handle to the toast stack; cheap to copy into closures.
#[derive(Clone, Copy)]
pub struct Toasts {
    items: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u64>,
}

impl Toasts {
    fn new() -> Self {
        Self {
            items: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(0),
        }
    }

    fn dismiss(&self, id: u64) {
        // The owner may already be gone if the app unmounted.
        let _ = self
            .items
            .try_update(|items| items.retain(|toast| toast.id != id));
    }
}

impl Notifier for Toasts {
    fn notify(&self, notice: Notice) {
        self.next_id.update_value(|id| *id += 1);
        let id = self.next_id.get_value();
        self.items.update(|items| items.push(Toast { id, notice }));

        let toasts = *self;
        Timeout::new(TOAST_MILLIS, move || toasts.dismiss(id)).forget();
    }
}

pub fn provide_toasts() -> Toasts {
    let toasts = Toasts::new();
    provide_context(toasts);
    toasts
}

pub fn use_toasts() -> Toasts {
    use_context::<Toasts>().unwrap_or_else(Toasts::new)
}

#[component]
pub fn ToastStack() -> impl IntoView {
    let toasts = use_toasts();

    view! {
        <div class="fixed top-4 right-4 z-50 flex w-80 flex-col gap-2" aria-live="polite">
            <For
                each=move || toasts.items.get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=format!("{} shadow", AlertKind::from(toast.notice.kind).class())>
                            <div class="flex items-start justify-between gap-3">
                                <span>{toast.notice.message}</span>
                                <button
                                    type="button"
                                    class="text-xs opacity-70 hover:opacity-100"
                                    aria-label="Dismiss"
                                    on:click=move |_| toasts.dismiss(id)
                                >
                                    "x"
                                </button>
                            </div>
                        </div>
                    }
                }
            />
        </div>
    }
}
