//! Top Bar
//!
//! Page title and theme toggle.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::store::{store_toggle_theme, AppStateStoreFields};
use crate::theme::Theme;

#[component]
pub fn TopBar() -> impl IntoView {
    let ctx = use_app_context();

    let toggle_theme = move |_| {
        let theme = store_toggle_theme(&ctx.store);
        theme.save();
        log::debug!("[APP] theme -> {}", theme.as_str());
    };

    view! {
        <header class="topbar">
            <h1 class="topbar-title">{move || ctx.store.page().get().title()}</h1>
            <div class="topbar-controls">
                <span class="topbar-date">{chrono::Local::now().format("%a, %d %b %Y").to_string()}</span>
                <button
                    class="btn btn-ghost"
                    title="Toggle theme"
                    on:click=toggle_theme
                >
                    {move || if ctx.store.theme().get() == Theme::Dark { "☀ Light" } else { "☾ Dark" }}
                </button>
            </div>
        </header>
    }
}
