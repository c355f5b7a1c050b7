//! Form Fields
//!
//! Labelled inputs bound to `RwSignal<String>`, with an optional error line.

use leptos::prelude::*;

use crate::validation::FormErrors;

/// Error message for one field, tracked reactively
pub fn field_error(errors: RwSignal<FormErrors>, field: &'static str) -> Signal<Option<String>> {
    Signal::derive(move || errors.with(|e| e.for_field(field)))
}

#[component]
pub fn TextField(
    #[prop(into)] label: String,
    value: RwSignal<String>,
    #[prop(into, optional)] input_type: Option<String>,
    #[prop(into, optional)] placeholder: Option<String>,
    #[prop(optional)] error: Option<Signal<Option<String>>>,
) -> impl IntoView {
    view! {
        <label class="field">
            <span class="field-label">{label}</span>
            <input
                type=input_type.unwrap_or_else(|| "text".to_string())
                placeholder=placeholder.unwrap_or_default()
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
            {move || error.and_then(|e| e.get()).map(|msg| view! { <span class="field-error">{msg}</span> })}
        </label>
    }
}

/// `options` are (value, label) pairs
#[component]
pub fn SelectField(
    #[prop(into)] label: String,
    value: RwSignal<String>,
    #[prop(into)] options: Signal<Vec<(String, String)>>,
    #[prop(optional)] error: Option<Signal<Option<String>>>,
) -> impl IntoView {
    view! {
        <label class="field">
            <span class="field-label">{label}</span>
            <select
                prop:value=move || value.get()
                on:change=move |ev| value.set(event_target_value(&ev))
            >
                {move || options.get().into_iter().map(|(opt_value, opt_label)| {
                    let selected = value.get_untracked() == opt_value;
                    view! { <option value=opt_value selected=selected>{opt_label}</option> }
                }).collect_view()}
            </select>
            {move || error.and_then(|e| e.get()).map(|msg| view! { <span class="field-error">{msg}</span> })}
        </label>
    }
}

#[component]
pub fn CheckboxField(#[prop(into)] label: String, value: RwSignal<bool>) -> impl IntoView {
    view! {
        <label class="field field-inline">
            <input
                type="checkbox"
                prop:checked=move || value.get()
                on:change=move |ev| value.set(event_target_checked(&ev))
            />
            <span class="field-label">{label}</span>
        </label>
    }
}

/// Form-level error list shown above the submit button
#[component]
pub fn ErrorText(errors: RwSignal<FormErrors>) -> impl IntoView {
    view! {
        <Show when=move || errors.with(|e| !e.is_empty())>
            <ul class="form-errors">
                {move || errors.with(|e| e.messages()).into_iter().map(|m| view! { <li>{m}</li> }).collect_view()}
            </ul>
        </Show>
    }
}
