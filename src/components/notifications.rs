//! Notification Toasts

use leptos::prelude::*;

use crate::store::{store_dismiss_notification, use_app_store, AppStateStoreFields, NotificationKind};

fn toast_class(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Success => "toast toast-success",
        NotificationKind::Error => "toast toast-error",
        NotificationKind::Info => "toast",
    }
}

/// Bottom-right stack of transient messages
#[component]
pub fn Notifications() -> impl IntoView {
    let store = use_app_store();

    view! {
        <div class="toast-stack" role="status">
            <For
                each=move || store.notifications().get()
                key=|n| n.id
                children=move |n| {
                    let id = n.id;
                    view! {
                        <div class=toast_class(n.kind)>
                            <span>{n.message}</span>
                            <button class="icon-btn" on:click=move |_| store_dismiss_notification(&store, id)>"×"</button>
                        </div>
                    }
                }
            />
        </div>
    }
}
