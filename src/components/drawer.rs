//! Drawer Component

use leptos::prelude::*;

/// Right-hand side panel for record details
#[component]
pub fn Drawer(
    #[prop(into)] open: Signal<bool>,
    #[prop(into)] title: Signal<String>,
    #[prop(into)] on_close: Callback<()>,
    children: ChildrenFn,
) -> impl IntoView {
    view! {
        <div
            class=move || if open.get() { "drawer-backdrop visible" } else { "drawer-backdrop" }
            on:click=move |_| on_close.run(())
        ></div>
        <aside class=move || if open.get() { "drawer open" } else { "drawer" }>
            <header class="drawer-header">
                <h2>{move || title.get()}</h2>
                <button class="icon-btn" title="Close" on:click=move |_| on_close.run(())>"×"</button>
            </header>
            <Show when=move || open.get()>
                <div class="drawer-body">{children()}</div>
            </Show>
        </aside>
    }
}
