//! Modal Component

use leptos::prelude::*;

/// Centered dialog over a backdrop. Clicking the backdrop closes it.
#[component]
pub fn Modal(
    #[prop(into)] open: Signal<bool>,
    #[prop(into)] title: Signal<String>,
    #[prop(into)] on_close: Callback<()>,
    #[prop(optional)] wide: bool,
    children: ChildrenFn,
) -> impl IntoView {
    let modal_class = if wide { "modal modal-wide" } else { "modal" };

    view! {
        <Show when=move || open.get()>
            <div class="modal-backdrop" on:click=move |_| on_close.run(())>
                <div class=modal_class on:click=|ev| ev.stop_propagation()>
                    <header class="modal-header">
                        <h2>{move || title.get()}</h2>
                        <button class="icon-btn" title="Close" on:click=move |_| on_close.run(())>"×"</button>
                    </header>
                    <div class="modal-body">{children()}</div>
                </div>
            </div>
        </Show>
    }
}
