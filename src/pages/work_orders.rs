//! Work Orders Page
//!
//! List with status filter, inline status change and invoice download.
//! The creation modal matches the typed customer and vehicle against
//! existing records and only creates what is new.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, CustomerInput, VehicleInput};
use crate::billing::{LineItem, WorkOrderTotals};
use crate::components::{
    field_error, DeleteConfirmButton, EmptyState, ErrorText, ExportButton, Modal, PageHeader, QueryStatus, SearchInput,
    SelectField, TextField,
};
use crate::context::use_app_context;
use crate::draft::{CreatedRecords, Resolution, WorkOrderDraft};
use crate::export;
use crate::hooks::{
    mutate, run_mutation, submit_form, submit_work_order, use_customers, use_inventory, use_services, use_vehicles,
    use_work_orders, use_workers, PARTIAL_SUBMIT_CHANGES, WORK_ORDER_CHANGES, WORK_ORDER_FLOW_CHANGES,
};
use crate::matching::matches_query;
use crate::models::{Customer, PartLine, ServiceLine, WorkOrder, WorkOrderStatus};
use crate::money::parse_amount;
use crate::store::NotificationKind;
use crate::theme::status_badge_class;
use crate::validation::{optional_non_negative, optional_text, require, FieldError, FieldResult, FormErrors};

fn customer_name(order: &WorkOrder) -> String {
    order
        .customer
        .as_ref()
        .map(|c| c.name.clone())
        .unwrap_or_else(|| format!("Customer #{}", order.customer_id))
}

fn vehicle_label(order: &WorkOrder) -> String {
    order
        .vehicle
        .as_ref()
        .map(|v| v.label())
        .unwrap_or_else(|| format!("Vehicle #{}", order.vehicle_id))
}

/// "2026-10-19T08:30:00Z" -> "2026-10-19"
fn created_day(order: &WorkOrder) -> String {
    order
        .created_at
        .as_deref()
        .map(|c| c.chars().take(10).collect())
        .unwrap_or_default()
}

fn require_lines(services: usize, parts: usize) -> FieldResult<()> {
    if services + parts == 0 {
        Err(FieldError::Required("Services or parts"))
    } else {
        Ok(())
    }
}

/// Options for the inline status select. An unrecognised server status is
/// listed too so the select shows what the order really has.
fn status_choices(current: WorkOrderStatus) -> Vec<WorkOrderStatus> {
    let mut choices = WorkOrderStatus::ALL.to_vec();
    if current == WorkOrderStatus::Unknown {
        choices.insert(0, WorkOrderStatus::Unknown);
    }
    choices
}

#[component]
pub fn WorkOrdersPage() -> impl IntoView {
    let ctx = use_app_context();
    let status_filter = RwSignal::new(String::new());
    let status = Signal::derive(move || WorkOrderStatus::parse(&status_filter.get()));
    let orders = use_work_orders(status);
    let search = RwSignal::new(String::new());
    let creating = RwSignal::new(false);

    let filtered = Memo::new(move |_| {
        let query = search.get();
        orders
            .get_or_default()
            .into_iter()
            .filter(|o| {
                let id = o.id.to_string();
                let customer = customer_name(o);
                let vehicle = vehicle_label(o);
                matches_query(&query, &[id.as_str(), customer.as_str(), vehicle.as_str()])
            })
            .collect::<Vec<_>>()
    });

    let open_count = move || orders.data.with(|d| {
        d.as_ref()
            .map(|list| list.iter().filter(|o| o.status.is_open()).count())
            .unwrap_or(0)
    });

    let status_options = Signal::derive(|| {
        std::iter::once((String::new(), "All statuses".to_string()))
            .chain(WorkOrderStatus::ALL.iter().map(|s| (s.as_str().to_string(), s.label().to_string())))
            .collect::<Vec<_>>()
    });

    let export_csv = move |_: ()| {
        if let Err(e) = export::download_csv("work-orders", &filtered.get_untracked()) {
            ctx.notify_error(&e);
        }
    };

    view! {
        <section class="page">
            <PageHeader title="Work Orders">
                <SearchInput value=search placeholder="Search #, customer or vehicle" />
                <SelectField label="Status" value=status_filter options=status_options />
                <ExportButton on_export=export_csv />
                <button class="btn btn-primary" on:click=move |_| creating.set(true)>"+ New work order"</button>
            </PageHeader>

            <QueryStatus loading=orders.loading error=orders.error />
            <p class="muted">{move || format!("{} shown, {} open", filtered.with(Vec::len), open_count())}</p>

            <table class="data-table">
                <thead>
                    <tr>
                        <th>"#"</th>
                        <th>"Customer"</th>
                        <th>"Vehicle"</th>
                        <th>"Status"</th>
                        <th class="num">"Total"</th>
                        <th>"Created"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    {move || filtered.get().into_iter().map(|order| {
                        let id = order.id;
                        let subject = format!("work order #{}", id);
                        let current = order.status;
                        let total = WorkOrderTotals::for_order(&order).total.to_string();
                        view! {
                            <tr>
                                <td class="mono">{id}</td>
                                <td>{customer_name(&order)}</td>
                                <td>{vehicle_label(&order)}</td>
                                <td>
                                    <select
                                        class=status_badge_class(current)
                                        on:change=move |ev| {
                                            let select: web_sys::HtmlSelectElement = event_target(&ev);
                                            let Some(next) = WorkOrderStatus::parse(&select.value()) else {
                                                return;
                                            };
                                            if next == current {
                                                return;
                                            }
                                            spawn_local(async move {
                                                let action = api::update_work_order_status(id, next);
                                                if mutate(ctx, "Status updated", WORK_ORDER_CHANGES, action).await.is_none() {
                                                    select.set_value(current.as_str());
                                                }
                                            });
                                        }
                                    >
                                        {status_choices(current).into_iter().map(|s| {
                                            let unknown = s == WorkOrderStatus::Unknown;
                                            view! {
                                                <option value=s.as_str() selected={s == current} disabled=unknown>{s.label()}</option>
                                            }
                                        }).collect_view()}
                                    </select>
                                </td>
                                <td class="num">{total}</td>
                                <td>{created_day(&order)}</td>
                                <td class="row-actions">
                                    <button class="btn btn-ghost" title="Download invoice" on:click=move |_| {
                                        ctx.notify(NotificationKind::Info, format!("Preparing invoice #{}", id));
                                        spawn_local(async move {
                                            if let Err(e) = api::download_invoice(id).await {
                                                ctx.notify_error(&e);
                                            }
                                        });
                                    }>
                                        "Invoice"
                                    </button>
                                    <DeleteConfirmButton subject=subject on_confirm=move |_: ()| {
                                        run_mutation(ctx, "Work order deleted", WORK_ORDER_CHANGES, api::delete_work_order(id), |_| {});
                                    } />
                                </td>
                            </tr>
                        }
                    }).collect_view()}
                </tbody>
            </table>

            <Show when=move || !orders.loading.get() && filtered.with(|f| f.is_empty())>
                <EmptyState message="No work orders" />
            </Show>

            <Modal
                open=creating
                title="New work order".to_string()
                on_close=move |_: ()| creating.set(false)
                wide=true
            >
                <WorkOrderForm open=creating />
            </Modal>
        </section>
    }
}

#[component]
fn WorkOrderForm(open: RwSignal<bool>) -> impl IntoView {
    let ctx = use_app_context();
    let customers = use_customers();
    let vehicles = use_vehicles();
    let catalog = use_services();
    let inventory = use_inventory();
    let workers = use_workers();

    let customer_name = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let make = RwSignal::new(String::new());
    let model = RwSignal::new(String::new());
    let registration = RwSignal::new(String::new());
    let vin = RwSignal::new(String::new());
    let services = RwSignal::new(Vec::<ServiceLine>::new());
    let parts = RwSignal::new(Vec::<PartLine>::new());
    let worker_ids = RwSignal::new(Vec::<u32>::new());
    let discount = RwSignal::new(String::new());
    let parking = RwSignal::new(String::new());
    let notes = RwSignal::new(String::new());
    let service_pick = RwSignal::new(String::new());
    let part_pick = RwSignal::new(String::new());
    let errors = RwSignal::new(FormErrors::new());
    let saving = RwSignal::new(false);
    let created = RwSignal::new(CreatedRecords::default());

    // Lenient snapshot for matching and the live totals; submit validates
    let draft = Memo::new(move |_| WorkOrderDraft {
        customer: CustomerInput {
            name: customer_name.get().trim().to_string(),
            phone: phone.get().trim().to_string(),
            ..Default::default()
        },
        vehicle: VehicleInput {
            make: make.get().trim().to_string(),
            model: model.get().trim().to_string(),
            registration_number: registration.get().trim().to_uppercase(),
            vin: optional_text(&vin.get()).map(|v| v.to_uppercase()),
            ..Default::default()
        },
        services: services.get(),
        parts: parts.get(),
        worker_ids: worker_ids.get(),
        discount: parse_amount(&discount.get()),
        parking_charge: parse_amount(&parking.get()),
        notes: optional_text(&notes.get()),
    });

    let known = Memo::new(move |_| created.with(|c| c.merge_into(customers.get_or_default(), vehicles.get_or_default())));
    let resolution = Memo::new(move |_| known.with(|(customers, vehicles)| draft.with(|d| d.resolve(customers, vehicles))));
    let matched_customer = Memo::new(move |_| {
        let id = resolution.get().customer_id?;
        known.with(|(customers, _)| customers.iter().find(|c| c.id == id).cloned())
    });
    let totals = Memo::new(move |_| draft.with(WorkOrderDraft::totals));

    // Picking one of a known customer's vehicles fills the vehicle fields
    let known_vehicles = move || {
        let Some(Customer { id, .. }) = matched_customer.get() else {
            return Vec::new();
        };
        known.with(|(_, vehicles)| vehicles.iter().filter(|v| v.customer_id == Some(id)).cloned().collect::<Vec<_>>())
    };

    let add_service = move |_: web_sys::MouseEvent| {
        let Ok(id) = service_pick.get_untracked().parse::<u32>() else {
            return;
        };
        let Some(item) = catalog.get_or_default().into_iter().find(|s| s.id == id) else {
            return;
        };
        services.update(|lines| {
            lines.push(ServiceLine { service_id: Some(item.id), name: item.name, quantity: 1.0, unit_price: item.price })
        });
        service_pick.set(String::new());
    };

    let add_part = move |_: web_sys::MouseEvent| {
        let Ok(id) = part_pick.get_untracked().parse::<u32>() else {
            return;
        };
        let Some(item) = inventory.get_or_default().into_iter().find(|i| i.id == id) else {
            return;
        };
        if let Some(existing) = parts.with_untracked(|lines| lines.iter().position(|l| l.inventory_id == Some(id))) {
            parts.update(|lines| lines[existing].quantity += 1.0);
        } else {
            parts.update(|lines| {
                lines.push(PartLine { inventory_id: Some(item.id), name: item.name, quantity: 1.0, unit_price: item.unit_price })
            });
        }
        part_pick.set(String::new());
    };

    let service_options = Signal::derive(move || {
        std::iter::once((String::new(), "Add a service...".to_string()))
            .chain(catalog.get_or_default().into_iter().map(|s| {
                let price = crate::money::format_currency(Some(s.price));
                (s.id.to_string(), format!("{} - {}", s.name, price))
            }))
            .collect::<Vec<_>>()
    });
    let part_options = Signal::derive(move || {
        std::iter::once((String::new(), "Add a part...".to_string()))
            .chain(
                inventory
                    .get_or_default()
                    .into_iter()
                    .filter(|i| i.quantity > 0.0)
                    .map(|i| (i.id.to_string(), format!("{} ({} in stock)", i.name, i.quantity))),
            )
            .collect::<Vec<_>>()
    });

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let mut found = FormErrors::new();
        found.check(require("Customer name", &customer_name.get_untracked()));
        found.check(require("Phone", &phone.get_untracked()));
        found.check(require("Registration", &registration.get_untracked()));
        found.check(optional_non_negative("Discount", &discount.get_untracked()));
        found.check(optional_non_negative("Parking", &parking.get_untracked()));
        let (service_count, part_count) = draft.with_untracked(|d| (d.services.len(), d.parts.len()));
        found.check(require_lines(service_count, part_count));
        let Resolution { vehicle_id, .. } = resolution.get_untracked();
        if vehicle_id.is_none() {
            found.check(require("Make", &make.get_untracked()));
            found.check(require("Model", &model.get_untracked()));
        }
        let valid = found.is_empty();
        errors.set(found);
        if !valid {
            return;
        }

        let submission = submit_work_order(draft.get_untracked(), resolution.get_untracked(), move |record| {
            created.update(|c| c.push(record))
        });
        let action = async move {
            let result = submission.await;
            if result.is_err() && !created.with_untracked(CreatedRecords::is_empty) {
                ctx.invalidate(PARTIAL_SUBMIT_CHANGES);
            }
            result
        };
        submit_form(ctx, saving, "Work order created", WORK_ORDER_FLOW_CHANGES, action, move |order: WorkOrder| {
            log::info!("[WORK ORDER] #{} created", order.id);
            open.set(false);
        });
    };

    view! {
        <form class="form work-order-form" on:submit=submit>
            <fieldset>
                <legend>"Customer"</legend>
                <TextField label="Name" value=customer_name error=field_error(errors, "Customer name") />
                <TextField label="Phone" value=phone input_type="tel" error=field_error(errors, "Phone") />
                {move || match matched_customer.get() {
                    Some(c) => view! { <span class="badge badge-success">"Existing customer: " {c.name}</span> }.into_any(),
                    None => view! { <span class="badge badge-muted">"New customer"</span> }.into_any(),
                }}
            </fieldset>

            <fieldset>
                <legend>"Vehicle"</legend>
                <div class="chip-row">
                    {move || known_vehicles().into_iter().map(|v| {
                        let label = v.label();
                        view! {
                            <button type="button" class="chip" on:click=move |_| {
                                make.set(v.make.clone());
                                model.set(v.model.clone());
                                registration.set(v.registration_number.clone());
                                vin.set(v.vin.clone().unwrap_or_default());
                            }>
                                {label}
                            </button>
                        }
                    }).collect_view()}
                </div>
                <TextField label="Registration" value=registration error=field_error(errors, "Registration") />
                <TextField label="Make" value=make error=field_error(errors, "Make") />
                <TextField label="Model" value=model error=field_error(errors, "Model") />
                <TextField label="VIN" value=vin />
                {move || match resolution.get().vehicle_id {
                    Some(_) => view! { <span class="badge badge-success">"Existing vehicle"</span> }.into_any(),
                    None => view! { <span class="badge badge-muted">"New vehicle"</span> }.into_any(),
                }}
            </fieldset>

            <fieldset>
                <legend>"Services"</legend>
                <div class="picker">
                    <SelectField label="Service" value=service_pick options=service_options />
                    <button type="button" class="btn btn-ghost" on:click=add_service>"Add"</button>
                </div>
                <LineTable
                    rows=Signal::derive(move || services.get().iter().map(|l| (l.name.clone(), l.quantity, l.line_total().to_string())).collect::<Vec<_>>())
                    on_quantity=move |(index, qty): (usize, f64)| services.update(|lines| {
                        if let Some(line) = lines.get_mut(index) {
                            line.quantity = qty;
                        }
                    })
                    on_remove=move |index: usize| services.update(|lines| {
                        if index < lines.len() {
                            lines.remove(index);
                        }
                    })
                />
            </fieldset>

            <fieldset>
                <legend>"Parts"</legend>
                <div class="picker">
                    <SelectField label="Part" value=part_pick options=part_options />
                    <button type="button" class="btn btn-ghost" on:click=add_part>"Add"</button>
                </div>
                <LineTable
                    rows=Signal::derive(move || parts.get().iter().map(|l| (l.name.clone(), l.quantity, l.line_total().to_string())).collect::<Vec<_>>())
                    on_quantity=move |(index, qty): (usize, f64)| parts.update(|lines| {
                        if let Some(line) = lines.get_mut(index) {
                            line.quantity = qty;
                        }
                    })
                    on_remove=move |index: usize| parts.update(|lines| {
                        if index < lines.len() {
                            lines.remove(index);
                        }
                    })
                />
            </fieldset>

            <fieldset>
                <legend>"Assigned workers"</legend>
                <div class="chip-row">
                    {move || workers.get_or_default().into_iter().filter(|w| w.active).map(|w| {
                        let id = w.id;
                        view! {
                            <label class="field field-inline">
                                <input
                                    type="checkbox"
                                    prop:checked=move || worker_ids.with(|ids| ids.contains(&id))
                                    on:change=move |ev| {
                                        let checked = event_target_checked(&ev);
                                        worker_ids.update(|ids| {
                                            ids.retain(|x| *x != id);
                                            if checked {
                                                ids.push(id);
                                            }
                                        });
                                    }
                                />
                                <span>{w.name}</span>
                            </label>
                        }
                    }).collect_view()}
                </div>
            </fieldset>

            <fieldset class="form-grid">
                <TextField label="Discount" value=discount input_type="number" error=field_error(errors, "Discount") />
                <TextField label="Parking charge" value=parking input_type="number" error=field_error(errors, "Parking") />
                <TextField label="Notes" value=notes />
            </fieldset>

            <dl class="totals">
                <dt>"Services"</dt><dd>{move || totals.get().services.to_string()}</dd>
                <dt>"Parts"</dt><dd>{move || totals.get().parts.to_string()}</dd>
                <dt>"Discount"</dt><dd>{move || (-totals.get().discount).to_string()}</dd>
                <dt>"GST (18%)"</dt><dd>{move || totals.get().taxes.to_string()}</dd>
                <dt>"Parking"</dt><dd>{move || totals.get().parking.to_string()}</dd>
                <dt class="grand">"Total"</dt>
                <dd class="grand" class:negative=move || totals.get().total.is_negative()>{move || totals.get().total.to_string()}</dd>
            </dl>

            <ErrorText errors=errors />
            <div class="form-actions">
                <button type="button" class="btn btn-ghost" on:click=move |_| open.set(false)>"Cancel"</button>
                <button type="submit" class="btn btn-primary" disabled=move || saving.get()>"Create work order"</button>
            </div>
        </form>
    }
}

/// Editable line items: (name, quantity, formatted line total)
#[component]
fn LineTable(
    #[prop(into)] rows: Signal<Vec<(String, f64, String)>>,
    #[prop(into)] on_quantity: Callback<(usize, f64)>,
    #[prop(into)] on_remove: Callback<usize>,
) -> impl IntoView {
    view! {
        <table class="line-table">
            <tbody>
                {move || rows.get().into_iter().enumerate().map(|(index, (name, quantity, total))| view! {
                    <tr>
                        <td>{name}</td>
                        <td class="num">
                            <input
                                type="number"
                                min="0"
                                step="any"
                                prop:value=quantity.to_string()
                                on:change=move |ev| {
                                    let qty = parse_amount(&event_target_value(&ev)).max(0.0);
                                    on_quantity.run((index, qty));
                                }
                            />
                        </td>
                        <td class="num">{total}</td>
                        <td>
                            <button type="button" class="icon-btn" title="Remove" on:click=move |_| on_remove.run(index)>
                                "×"
                            </button>
                        </td>
                    </tr>
                }).collect_view()}
            </tbody>
        </table>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_labels_fall_back_to_ids() {
        let order: WorkOrder = serde_json::from_value(json!({
            "id": 8,
            "customer_id": 2,
            "vehicle_id": 5,
            "status": "pending",
            "created_at": "2026-10-19T08:30:00Z"
        }))
        .unwrap();
        assert_eq!(customer_name(&order), "Customer #2");
        assert_eq!(vehicle_label(&order), "Vehicle #5");
        assert_eq!(created_day(&order), "2026-10-19");
    }

    #[test]
    fn test_unknown_status_is_listed_only_when_current() {
        assert_eq!(status_choices(WorkOrderStatus::Pending), WorkOrderStatus::ALL.to_vec());
        let choices = status_choices(WorkOrderStatus::Unknown);
        assert_eq!(choices[0], WorkOrderStatus::Unknown);
        assert_eq!(choices.len(), WorkOrderStatus::ALL.len() + 1);
    }

    #[test]
    fn test_require_lines() {
        assert!(require_lines(0, 0).is_err());
        assert!(require_lines(1, 0).is_ok());
        assert!(require_lines(0, 2).is_ok());
    }
}
