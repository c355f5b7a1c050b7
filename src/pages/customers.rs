//! Customers Page
//!
//! Customer list with search, create/edit modal and a detail drawer showing
//! the customer's vehicles and work order history.

use leptos::prelude::*;

use crate::api::{self, CustomerInput};
use crate::billing::WorkOrderTotals;
use crate::components::{
    field_error, DeleteConfirmButton, Drawer, EmptyState, ErrorText, ExportButton, FormMode, Modal, PageHeader,
    QueryStatus, SearchInput, TextField,
};
use crate::context::use_app_context;
use crate::export;
use crate::hooks::{run_mutation, submit_form, use_customers, use_vehicles, use_work_orders, CUSTOMER_CHANGES};
use crate::matching::matches_query;
use crate::models::{Customer, WorkOrderStatus};
use crate::theme::status_badge_class;
use crate::validation::{optional_text, require, FormErrors};

#[component]
pub fn CustomersPage() -> impl IntoView {
    let ctx = use_app_context();
    let customers = use_customers();
    let vehicles = use_vehicles();
    let search = RwSignal::new(String::new());
    let form = RwSignal::new(None::<FormMode<Customer>>);
    let detail = RwSignal::new(None::<Customer>);

    let filtered = Memo::new(move |_| {
        let query = search.get();
        customers
            .get_or_default()
            .into_iter()
            .filter(|c| matches_query(&query, &[c.name.as_str(), c.phone.as_str(), c.email.as_deref().unwrap_or("")]))
            .collect::<Vec<_>>()
    });

    let vehicle_count = move |customer_id: u32| {
        vehicles.data.with(|v| {
            v.as_ref()
                .map(|list| list.iter().filter(|v| v.customer_id == Some(customer_id)).count())
                .unwrap_or(0)
        })
    };

    let export_csv = move |_: ()| {
        if let Err(e) = export::download_csv("customers", &filtered.get_untracked()) {
            ctx.notify_error(&e);
        }
    };

    view! {
        <section class="page">
            <PageHeader title="Customers">
                <SearchInput value=search placeholder="Search name, phone or email" />
                <ExportButton on_export=export_csv />
                <button class="btn btn-primary" on:click=move |_| form.set(Some(FormMode::Create))>
                    "+ New customer"
                </button>
            </PageHeader>

            <QueryStatus loading=customers.loading error=customers.error />

            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Name"</th>
                        <th>"Phone"</th>
                        <th>"Email"</th>
                        <th class="num">"Vehicles"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    {move || filtered.get().into_iter().map(|customer| {
                        let id = customer.id;
                        let for_detail = customer.clone();
                        let for_edit = customer.clone();
                        let subject = format!("customer {}", customer.name);
                        view! {
                            <tr class="clickable" on:click=move |_| detail.set(Some(for_detail.clone()))>
                                <td>{customer.name}</td>
                                <td>{customer.phone}</td>
                                <td>{customer.email.unwrap_or_default()}</td>
                                <td class="num">{move || vehicle_count(id)}</td>
                                <td class="row-actions">
                                    <button
                                        class="btn btn-ghost"
                                        on:click=move |ev| {
                                            ev.stop_propagation();
                                            form.set(Some(FormMode::Edit(for_edit.clone())));
                                        }
                                    >
                                        "Edit"
                                    </button>
                                    <DeleteConfirmButton subject=subject on_confirm=move |_: ()| {
                                        run_mutation(ctx, "Customer deleted", CUSTOMER_CHANGES, api::delete_customer(id), |_| {});
                                    } />
                                </td>
                            </tr>
                        }
                    }).collect_view()}
                </tbody>
            </table>

            <Show when=move || !customers.loading.get() && filtered.with(|f| f.is_empty())>
                <EmptyState message="No customers found" />
            </Show>

            <Modal
                open=Signal::derive(move || form.with(Option::is_some))
                title=Signal::derive(move || form.with(|m| m.as_ref().map(|m| m.title("customer")).unwrap_or_default()))
                on_close=move |_: ()| form.set(None)
            >
                <CustomerForm mode=form />
            </Modal>

            <Drawer
                open=Signal::derive(move || detail.with(Option::is_some))
                title=Signal::derive(move || detail.with(|c| c.as_ref().map(|c| c.name.clone()).unwrap_or_default()))
                on_close=move |_: ()| detail.set(None)
            >
                <CustomerDetail customer=detail />
            </Drawer>
        </section>
    }
}

/// Create/edit form. Reads the mode once on mount; the modal remounts it.
#[component]
fn CustomerForm(mode: RwSignal<Option<FormMode<Customer>>>) -> impl IntoView {
    let ctx = use_app_context();
    let initial = mode
        .get_untracked()
        .and_then(|m| m.editing().cloned());
    let editing_id = initial.as_ref().map(|c| c.id);
    let seed = initial.as_ref().map(CustomerInput::from).unwrap_or_default();

    let name = RwSignal::new(seed.name);
    let phone = RwSignal::new(seed.phone);
    let email = RwSignal::new(seed.email.unwrap_or_default());
    let address = RwSignal::new(seed.address.unwrap_or_default());
    let notes = RwSignal::new(seed.notes.unwrap_or_default());
    let errors = RwSignal::new(FormErrors::new());
    let saving = RwSignal::new(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let mut found = FormErrors::new();
        let input = CustomerInput {
            name: found.check(require("Name", &name.get_untracked())),
            phone: found.check(require("Phone", &phone.get_untracked())),
            email: optional_text(&email.get_untracked()),
            address: optional_text(&address.get_untracked()),
            notes: optional_text(&notes.get_untracked()),
        };
        let valid = found.is_empty();
        errors.set(found);
        if !valid {
            return;
        }

        let action = async move {
            match editing_id {
                Some(id) => api::update_customer(id, &input).await,
                None => api::create_customer(&input).await,
            }
        };
        submit_form(ctx, saving, "Customer saved", CUSTOMER_CHANGES, action, move |_| mode.set(None));
    };

    view! {
        <form class="form" on:submit=submit>
            <TextField label="Name" value=name error=field_error(errors, "Name") />
            <TextField label="Phone" value=phone input_type="tel" error=field_error(errors, "Phone") />
            <TextField label="Email" value=email input_type="email" />
            <TextField label="Address" value=address />
            <TextField label="Notes" value=notes />
            <ErrorText errors=errors />
            <div class="form-actions">
                <button type="button" class="btn btn-ghost" on:click=move |_| mode.set(None)>"Cancel"</button>
                <button type="submit" class="btn btn-primary" disabled=move || saving.get()>"Save"</button>
            </div>
        </form>
    }
}

#[component]
fn CustomerDetail(customer: RwSignal<Option<Customer>>) -> impl IntoView {
    let vehicles = use_vehicles();
    let orders = use_work_orders(Signal::derive(|| None::<WorkOrderStatus>));
    let customer_id = move || customer.with(|c| c.as_ref().map(|c| c.id));

    let owned_vehicles = move || {
        let id = customer_id();
        vehicles
            .get_or_default()
            .into_iter()
            .filter(|v| v.customer_id.is_some() && v.customer_id == id)
            .collect::<Vec<_>>()
    };
    let history = move || {
        let id = customer_id();
        orders
            .get_or_default()
            .into_iter()
            .filter(|o| Some(o.customer_id) == id)
            .collect::<Vec<_>>()
    };
    let lifetime_value = move || {
        history()
            .iter()
            .map(|o| WorkOrderTotals::for_order(o).total)
            .sum::<crate::money::Money>()
            .to_string()
    };

    view! {
        <div class="detail">
            {move || customer.get().map(|c| view! {
                <dl class="detail-grid">
                    <dt>"Phone"</dt><dd>{c.phone}</dd>
                    <dt>"Email"</dt><dd>{c.email.unwrap_or_else(|| "-".into())}</dd>
                    <dt>"Address"</dt><dd>{c.address.unwrap_or_else(|| "-".into())}</dd>
                    <dt>"Notes"</dt><dd>{c.notes.unwrap_or_else(|| "-".into())}</dd>
                </dl>
            })}

            <h3>"Vehicles"</h3>
            <ul class="detail-list">
                {move || owned_vehicles().into_iter().map(|v| view! { <li>{v.label()}</li> }).collect_view()}
            </ul>

            <h3>"Work orders"</h3>
            <p class="muted">"Lifetime value: " {lifetime_value}</p>
            <ul class="detail-list">
                {move || history().into_iter().map(|o| {
                    let total = WorkOrderTotals::for_order(&o).total.to_string();
                    view! {
                        <li>
                            <span>"#" {o.id}</span>
                            <span class=status_badge_class(o.status)>{o.status.label()}</span>
                            <span class="num">{total}</span>
                        </li>
                    }
                }).collect_view()}
            </ul>
        </div>
    }
}
