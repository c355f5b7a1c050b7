//! Services Page

use leptos::prelude::*;

use crate::api::{self, ServiceInput};
use crate::components::{
    field_error, DeleteConfirmButton, EmptyState, ErrorText, ExportButton, FormMode, Modal, PageHeader, QueryStatus,
    SearchInput, TextField,
};
use crate::context::use_app_context;
use crate::export;
use crate::hooks::{run_mutation, submit_form, use_services, SERVICE_CHANGES};
use crate::matching::matches_query;
use crate::models::ServiceItem;
use crate::money::format_currency;
use crate::validation::{non_negative, optional_text, require, FieldError, FormErrors};

/// "1 h 30 min"
pub fn format_duration(minutes: Option<u32>) -> String {
    match minutes {
        None | Some(0) => "-".to_string(),
        Some(m) if m < 60 => format!("{} min", m),
        Some(m) if m % 60 == 0 => format!("{} h", m / 60),
        Some(m) => format!("{} h {} min", m / 60, m % 60),
    }
}

#[component]
pub fn ServicesPage() -> impl IntoView {
    let ctx = use_app_context();
    let services = use_services();
    let search = RwSignal::new(String::new());
    let form = RwSignal::new(None::<FormMode<ServiceItem>>);

    let filtered = Memo::new(move |_| {
        let query = search.get();
        services
            .get_or_default()
            .into_iter()
            .filter(|s| matches_query(&query, &[s.name.as_str(), s.description.as_deref().unwrap_or("")]))
            .collect::<Vec<_>>()
    });

    let export_csv = move |_: ()| {
        if let Err(e) = export::download_csv("services", &filtered.get_untracked()) {
            ctx.notify_error(&e);
        }
    };

    view! {
        <section class="page">
            <PageHeader title="Services">
                <SearchInput value=search placeholder="Search services" />
                <ExportButton on_export=export_csv />
                <button class="btn btn-primary" on:click=move |_| form.set(Some(FormMode::Create))>"+ New service"</button>
            </PageHeader>

            <QueryStatus loading=services.loading error=services.error />

            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Service"</th>
                        <th>"Description"</th>
                        <th class="num">"Price"</th>
                        <th class="num">"Duration"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    {move || filtered.get().into_iter().map(|service| {
                        let id = service.id;
                        let for_edit = service.clone();
                        let subject = format!("service {}", service.name);
                        view! {
                            <tr>
                                <td>{service.name}</td>
                                <td class="muted">{service.description.unwrap_or_default()}</td>
                                <td class="num">{format_currency(Some(service.price))}</td>
                                <td class="num">{format_duration(service.duration_minutes)}</td>
                                <td class="row-actions">
                                    <button class="btn btn-ghost" on:click=move |_| form.set(Some(FormMode::Edit(for_edit.clone())))>
                                        "Edit"
                                    </button>
                                    <DeleteConfirmButton subject=subject on_confirm=move |_: ()| {
                                        run_mutation(ctx, "Service deleted", SERVICE_CHANGES, api::delete_service(id), |_| {});
                                    } />
                                </td>
                            </tr>
                        }
                    }).collect_view()}
                </tbody>
            </table>

            <Show when=move || !services.loading.get() && filtered.with(|f| f.is_empty())>
                <EmptyState message="No services in the catalog" />
            </Show>

            <Modal
                open=Signal::derive(move || form.with(Option::is_some))
                title=Signal::derive(move || form.with(|m| m.as_ref().map(|m| m.title("service")).unwrap_or_default()))
                on_close=move |_: ()| form.set(None)
            >
                <ServiceForm mode=form />
            </Modal>
        </section>
    }
}

fn parse_duration(raw: &str) -> Result<Option<u32>, FieldError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<u32>().map(Some).map_err(|_| FieldError::NotANumber("Duration"))
}

#[component]
fn ServiceForm(mode: RwSignal<Option<FormMode<ServiceItem>>>) -> impl IntoView {
    let ctx = use_app_context();
    let initial = mode.get_untracked().and_then(|m| m.editing().cloned());
    let editing_id = initial.as_ref().map(|s| s.id);

    let name = RwSignal::new(initial.as_ref().map(|s| s.name.clone()).unwrap_or_default());
    let description = RwSignal::new(initial.as_ref().and_then(|s| s.description.clone()).unwrap_or_default());
    let price = RwSignal::new(initial.as_ref().map(|s| s.price.to_string()).unwrap_or_default());
    let duration = RwSignal::new(
        initial
            .as_ref()
            .and_then(|s| s.duration_minutes)
            .map(|d| d.to_string())
            .unwrap_or_default(),
    );
    let errors = RwSignal::new(FormErrors::new());
    let saving = RwSignal::new(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let mut found = FormErrors::new();
        let input = ServiceInput {
            name: found.check(require("Name", &name.get_untracked())),
            description: optional_text(&description.get_untracked()),
            price: found.check(non_negative("Price", &price.get_untracked())),
            duration_minutes: found.check(parse_duration(&duration.get_untracked())),
        };
        let valid = found.is_empty();
        errors.set(found);
        if !valid {
            return;
        }

        let action = async move {
            match editing_id {
                Some(id) => api::update_service(id, &input).await,
                None => api::create_service(&input).await,
            }
        };
        submit_form(ctx, saving, "Service saved", SERVICE_CHANGES, action, move |_| mode.set(None));
    };

    view! {
        <form class="form" on:submit=submit>
            <TextField label="Name" value=name error=field_error(errors, "Name") />
            <TextField label="Description" value=description />
            <TextField label="Price" value=price input_type="number" error=field_error(errors, "Price") />
            <TextField label="Duration (minutes)" value=duration input_type="number" error=field_error(errors, "Duration") />
            <ErrorText errors=errors />
            <div class="form-actions">
                <button type="button" class="btn btn-ghost" on:click=move |_| mode.set(None)>"Cancel"</button>
                <button type="submit" class="btn btn-primary" disabled=move || saving.get()>"Save"</button>
            </div>
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(None), "-");
        assert_eq!(format_duration(Some(45)), "45 min");
        assert_eq!(format_duration(Some(120)), "2 h");
        assert_eq!(format_duration(Some(90)), "1 h 30 min");
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration(" "), Ok(None));
        assert_eq!(parse_duration("30"), Ok(Some(30)));
        assert_eq!(parse_duration("-5"), Err(FieldError::NotANumber("Duration")));
    }
}
