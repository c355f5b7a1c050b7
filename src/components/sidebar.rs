//! Sidebar Navigation

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::pages::Page;
use crate::store::AppStateStoreFields;

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_app_context();
    let current = move || ctx.store.page().get();

    view! {
        <nav class="sidebar">
            <div class="sidebar-brand">
                <span class="brand-mark">"⚙"</span>
                <span class="brand-name">"Garage Manager"</span>
            </div>
            <ul class="sidebar-links">
                {Page::ALL.iter().map(|&page| {
                    view! {
                        <li>
                            <a
                                href=page.hash()
                                class=move || if current() == page { "sidebar-link active" } else { "sidebar-link" }
                                on:click=move |ev| {
                                    ev.prevent_default();
                                    ctx.navigate(page);
                                }
                            >
                                <span class="sidebar-icon">{page.icon()}</span>
                                <span>{page.title()}</span>
                            </a>
                        </li>
                    }
                }).collect_view()}
            </ul>
        </nav>
    }
}
