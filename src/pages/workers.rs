//! Workers Page
//!
//! Mechanics and staff. Inactive workers stay listed but are not offered
//! when assigning work orders.

use leptos::prelude::*;

use crate::api::{self, WorkerInput};
use crate::components::{
    field_error, CheckboxField, DeleteConfirmButton, EmptyState, ErrorText, ExportButton, FormMode, Modal, PageHeader,
    QueryStatus, SearchInput, TextField,
};
use crate::context::use_app_context;
use crate::export;
use crate::hooks::{run_mutation, submit_form, use_workers, WORKER_CHANGES};
use crate::matching::matches_query;
use crate::models::Worker;
use crate::money::format_currency;
use crate::validation::{optional_non_negative, optional_text, require, FormErrors};

#[component]
pub fn WorkersPage() -> impl IntoView {
    let ctx = use_app_context();
    let workers = use_workers();
    let search = RwSignal::new(String::new());
    let form = RwSignal::new(None::<FormMode<Worker>>);

    let filtered = Memo::new(move |_| {
        let query = search.get();
        workers
            .get_or_default()
            .into_iter()
            .filter(|w| {
                matches_query(
                    &query,
                    &[w.name.as_str(), w.role.as_deref().unwrap_or(""), w.phone.as_deref().unwrap_or("")],
                )
            })
            .collect::<Vec<_>>()
    });

    let export_csv = move |_: ()| {
        if let Err(e) = export::download_csv("workers", &filtered.get_untracked()) {
            ctx.notify_error(&e);
        }
    };

    view! {
        <section class="page">
            <PageHeader title="Workers">
                <SearchInput value=search placeholder="Search name, role or phone" />
                <ExportButton on_export=export_csv />
                <button class="btn btn-primary" on:click=move |_| form.set(Some(FormMode::Create))>"+ New worker"</button>
            </PageHeader>

            <QueryStatus loading=workers.loading error=workers.error />

            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Name"</th>
                        <th>"Role"</th>
                        <th>"Phone"</th>
                        <th class="num">"Hourly rate"</th>
                        <th>"Status"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    {move || filtered.get().into_iter().map(|worker| {
                        let id = worker.id;
                        let for_edit = worker.clone();
                        let subject = format!("worker {}", worker.name);
                        let toggled = WorkerInput { active: !worker.active, ..WorkerInput::from(&worker) };
                        let toggle_label = if worker.active { "Deactivate" } else { "Activate" };
                        let inactive = !worker.active;
                        let (badge_class, badge_text) = if worker.active {
                            ("badge badge-success", "Active")
                        } else {
                            ("badge badge-muted", "Inactive")
                        };
                        view! {
                            <tr class:inactive=inactive>
                                <td>{worker.name}</td>
                                <td>{worker.role.unwrap_or_default()}</td>
                                <td>{worker.phone.unwrap_or_default()}</td>
                                <td class="num">{format_currency(Some(worker.hourly_rate))}</td>
                                <td>
                                    <span class=badge_class>{badge_text}</span>
                                </td>
                                <td class="row-actions">
                                    <button class="btn btn-ghost" on:click=move |_| {
                                        let input = toggled.clone();
                                        run_mutation(ctx, "Worker updated", WORKER_CHANGES, async move {
                                            api::update_worker(id, &input).await
                                        }, |_| {});
                                    }>
                                        {toggle_label}
                                    </button>
                                    <button class="btn btn-ghost" on:click=move |_| form.set(Some(FormMode::Edit(for_edit.clone())))>
                                        "Edit"
                                    </button>
                                    <DeleteConfirmButton subject=subject on_confirm=move |_: ()| {
                                        run_mutation(ctx, "Worker deleted", WORKER_CHANGES, api::delete_worker(id), |_| {});
                                    } />
                                </td>
                            </tr>
                        }
                    }).collect_view()}
                </tbody>
            </table>

            <Show when=move || !workers.loading.get() && filtered.with(|f| f.is_empty())>
                <EmptyState message="No workers yet" />
            </Show>

            <Modal
                open=Signal::derive(move || form.with(Option::is_some))
                title=Signal::derive(move || form.with(|m| m.as_ref().map(|m| m.title("worker")).unwrap_or_default()))
                on_close=move |_: ()| form.set(None)
            >
                <WorkerForm mode=form />
            </Modal>
        </section>
    }
}

#[component]
fn WorkerForm(mode: RwSignal<Option<FormMode<Worker>>>) -> impl IntoView {
    let ctx = use_app_context();
    let initial = mode.get_untracked().and_then(|m| m.editing().cloned());
    let editing_id = initial.as_ref().map(|w| w.id);
    let seed = initial.as_ref().map(WorkerInput::from);

    let name = RwSignal::new(seed.as_ref().map(|s| s.name.clone()).unwrap_or_default());
    let role = RwSignal::new(seed.as_ref().and_then(|s| s.role.clone()).unwrap_or_default());
    let phone = RwSignal::new(seed.as_ref().and_then(|s| s.phone.clone()).unwrap_or_default());
    let hourly_rate = RwSignal::new(seed.as_ref().map(|s| s.hourly_rate.to_string()).unwrap_or_default());
    let active = RwSignal::new(seed.as_ref().map(|s| s.active).unwrap_or(true));
    let errors = RwSignal::new(FormErrors::new());
    let saving = RwSignal::new(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let mut found = FormErrors::new();
        let input = WorkerInput {
            name: found.check(require("Name", &name.get_untracked())),
            role: optional_text(&role.get_untracked()),
            phone: optional_text(&phone.get_untracked()),
            hourly_rate: found.check(optional_non_negative("Hourly rate", &hourly_rate.get_untracked())),
            active: active.get_untracked(),
        };
        let valid = found.is_empty();
        errors.set(found);
        if !valid {
            return;
        }

        let action = async move {
            match editing_id {
                Some(id) => api::update_worker(id, &input).await,
                None => api::create_worker(&input).await,
            }
        };
        submit_form(ctx, saving, "Worker saved", WORKER_CHANGES, action, move |_| mode.set(None));
    };

    view! {
        <form class="form" on:submit=submit>
            <TextField label="Name" value=name error=field_error(errors, "Name") />
            <TextField label="Role" value=role placeholder="Mechanic, painter, helper..." />
            <TextField label="Phone" value=phone input_type="tel" />
            <TextField label="Hourly rate" value=hourly_rate input_type="number" error=field_error(errors, "Hourly rate") />
            <CheckboxField label="Active" value=active />
            <ErrorText errors=errors />
            <div class="form-actions">
                <button type="button" class="btn btn-ghost" on:click=move |_| mode.set(None)>"Cancel"</button>
                <button type="submit" class="btn btn-primary" disabled=move || saving.get()>"Save"</button>
            </div>
        </form>
    }
}
