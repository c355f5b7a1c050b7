//! Row delete with a second click to confirm.
//!
//! The confirmation names the record ("Delete customer Ravi Kumar?") so a
//! mis-click on a busy table is caught. Clicks never reach the row, which
//! may open a drawer of its own.

use leptos::prelude::*;

fn confirm_prompt(subject: &str) -> String {
    let subject = subject.trim();
    if subject.is_empty() {
        "Delete?".to_string()
    } else {
        format!("Delete {}?", subject)
    }
}

#[component]
pub fn DeleteConfirmButton(
    /// What the row is, e.g. "vehicle KA05MN4321"
    #[prop(into)]
    subject: String,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let confirming = RwSignal::new(false);
    let prompt = confirm_prompt(&subject);
    let title = format!("Delete {}", subject.trim());

    move || {
        if !confirming.get() {
            return view! {
                <button
                    class="btn btn-ghost danger"
                    title=title.clone()
                    on:click=move |ev: web_sys::MouseEvent| {
                        ev.stop_propagation();
                        confirming.set(true);
                    }
                >
                    "Delete"
                </button>
            }
            .into_any();
        }
        view! {
            <span class="delete-confirm" on:click=|ev: web_sys::MouseEvent| ev.stop_propagation()>
                <span class="delete-confirm-text">{prompt.clone()}</span>
                <button
                    class="btn btn-danger"
                    on:click=move |_: web_sys::MouseEvent| {
                        confirming.set(false);
                        on_confirm.run(());
                    }
                >
                    "Yes, delete"
                </button>
                <button class="btn btn-ghost" on:click=move |_: web_sys::MouseEvent| confirming.set(false)>
                    "Keep"
                </button>
            </span>
        }
        .into_any()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_names_the_record() {
        assert_eq!(confirm_prompt("work order #12"), "Delete work order #12?");
        assert_eq!(confirm_prompt("  customer Ravi "), "Delete customer Ravi?");
        assert_eq!(confirm_prompt(""), "Delete?");
    }
}
