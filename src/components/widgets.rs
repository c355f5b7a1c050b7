//! Small Display Widgets

use leptos::prelude::*;

use crate::error::ApiError;

#[component]
pub fn PageHeader(
    #[prop(into)] title: String,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    view! {
        <div class="page-header">
            <h2>{title}</h2>
            <div class="page-actions">{children.map(|c| c())}</div>
        </div>
    }
}

#[component]
pub fn StatCard(
    #[prop(into)] label: String,
    #[prop(into)] value: Signal<String>,
    #[prop(into, optional)] tone: Option<String>,
) -> impl IntoView {
    let class = format!("stat-card {}", tone.unwrap_or_default());
    view! {
        <div class=class>
            <span class="stat-label">{label}</span>
            <span class="stat-value">{move || value.get()}</span>
        </div>
    }
}

#[component]
pub fn SearchInput(
    value: RwSignal<String>,
    #[prop(into, optional)] placeholder: Option<String>,
) -> impl IntoView {
    view! {
        <input
            class="search-input"
            type="search"
            placeholder=placeholder.unwrap_or_else(|| "Search...".to_string())
            prop:value=move || value.get()
            on:input=move |ev| value.set(event_target_value(&ev))
        />
    }
}

#[component]
pub fn EmptyState(#[prop(into)] message: String) -> impl IntoView {
    view! { <div class="empty-state">{message}</div> }
}

/// Loading spinner and error line for a query
#[component]
pub fn QueryStatus(
    loading: ReadSignal<bool>,
    error: ReadSignal<Option<ApiError>>,
) -> impl IntoView {
    view! {
        <Show when=move || loading.get()>
            <div class="loading">"Loading..."</div>
        </Show>
        {move || error.get().map(|e| view! { <div class="query-error">{e.to_string()}</div> })}
    }
}

#[component]
pub fn ExportButton(#[prop(into)] on_export: Callback<()>) -> impl IntoView {
    view! {
        <button class="btn btn-ghost" on:click=move |_| on_export.run(())>"Export CSV"</button>
    }
}
