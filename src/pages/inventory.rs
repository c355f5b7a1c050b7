//! Inventory Page
//!
//! Parts on hand. Rows at or below their reorder level are highlighted.

use leptos::prelude::*;

use crate::api::{self, InventoryInput};
use crate::components::{
    field_error, CheckboxField, DeleteConfirmButton, EmptyState, ErrorText, ExportButton, FormMode, Modal, PageHeader,
    QueryStatus, SearchInput, StatCard, TextField,
};
use crate::context::use_app_context;
use crate::export;
use crate::hooks::{run_mutation, submit_form, use_inventory, INVENTORY_CHANGES};
use crate::matching::matches_query;
use crate::models::InventoryItem;
use crate::money::{format_currency, Money};
use crate::validation::{non_negative, optional_non_negative, optional_text, require, FormErrors};

/// Value of everything on the shelf
pub fn stock_value(items: &[InventoryItem]) -> Money {
    items
        .iter()
        .map(|i| Money::from_amount(i.unit_price).times(i.quantity))
        .sum()
}

#[component]
pub fn InventoryPage() -> impl IntoView {
    let ctx = use_app_context();
    let inventory = use_inventory();
    let search = RwSignal::new(String::new());
    let low_only = RwSignal::new(false);
    let form = RwSignal::new(None::<FormMode<InventoryItem>>);

    let filtered = Memo::new(move |_| {
        let query = search.get();
        let low = low_only.get();
        inventory
            .get_or_default()
            .into_iter()
            .filter(|i| !low || i.is_low_stock())
            .filter(|i| {
                matches_query(
                    &query,
                    &[i.name.as_str(), i.sku.as_deref().unwrap_or(""), i.category.as_deref().unwrap_or("")],
                )
            })
            .collect::<Vec<_>>()
    });

    let total_value = Signal::derive(move || stock_value(&inventory.get_or_default()).to_string());
    let low_count = Signal::derive(move || {
        inventory
            .get_or_default()
            .iter()
            .filter(|i| i.is_low_stock())
            .count()
            .to_string()
    });

    let export_csv = move |_: ()| {
        if let Err(e) = export::download_csv("inventory", &filtered.get_untracked()) {
            ctx.notify_error(&e);
        }
    };

    view! {
        <section class="page">
            <PageHeader title="Inventory">
                <SearchInput value=search placeholder="Search name, SKU or category" />
                <ExportButton on_export=export_csv />
                <button class="btn btn-primary" on:click=move |_| form.set(Some(FormMode::Create))>"+ New part"</button>
            </PageHeader>

            <div class="stat-row">
                <StatCard label="Stock value" value=total_value />
                <StatCard label="Low stock" value=low_count tone="warning" />
            </div>
            <CheckboxField label="Low stock only" value=low_only />

            <QueryStatus loading=inventory.loading error=inventory.error />

            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Name"</th>
                        <th>"SKU"</th>
                        <th>"Category"</th>
                        <th class="num">"Qty"</th>
                        <th class="num">"Reorder at"</th>
                        <th class="num">"Unit price"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    {move || filtered.get().into_iter().map(|item| {
                        let id = item.id;
                        let row_class = if item.is_low_stock() { "low-stock" } else { "" };
                        let for_edit = item.clone();
                        let subject = format!("part {}", item.name);
                        view! {
                            <tr class=row_class>
                                <td>{item.name}</td>
                                <td class="mono">{item.sku.unwrap_or_default()}</td>
                                <td>{item.category.unwrap_or_default()}</td>
                                <td class="num">{item.quantity}</td>
                                <td class="num">{item.reorder_level}</td>
                                <td class="num">{format_currency(Some(item.unit_price))}</td>
                                <td class="row-actions">
                                    <button class="btn btn-ghost" on:click=move |_| form.set(Some(FormMode::Edit(for_edit.clone())))>
                                        "Edit"
                                    </button>
                                    <DeleteConfirmButton subject=subject on_confirm=move |_: ()| {
                                        run_mutation(ctx, "Part deleted", INVENTORY_CHANGES, api::delete_inventory_item(id), |_| {});
                                    } />
                                </td>
                            </tr>
                        }
                    }).collect_view()}
                </tbody>
            </table>

            <Show when=move || !inventory.loading.get() && filtered.with(|f| f.is_empty())>
                <EmptyState message="No parts found" />
            </Show>

            <Modal
                open=Signal::derive(move || form.with(Option::is_some))
                title=Signal::derive(move || form.with(|m| m.as_ref().map(|m| m.title("part")).unwrap_or_default()))
                on_close=move |_: ()| form.set(None)
            >
                <InventoryForm mode=form />
            </Modal>
        </section>
    }
}

#[component]
fn InventoryForm(mode: RwSignal<Option<FormMode<InventoryItem>>>) -> impl IntoView {
    let ctx = use_app_context();
    let initial = mode.get_untracked().and_then(|m| m.editing().cloned());
    let editing_id = initial.as_ref().map(|i| i.id);
    let seed = initial.as_ref().map(InventoryInput::from).unwrap_or_default();
    let number = |v: f64| if editing_id.is_some() { v.to_string() } else { String::new() };

    let name = RwSignal::new(seed.name);
    let sku = RwSignal::new(seed.sku.unwrap_or_default());
    let category = RwSignal::new(seed.category.unwrap_or_default());
    let quantity = RwSignal::new(number(seed.quantity));
    let unit_price = RwSignal::new(number(seed.unit_price));
    let reorder_level = RwSignal::new(number(seed.reorder_level));
    let errors = RwSignal::new(FormErrors::new());
    let saving = RwSignal::new(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let mut found = FormErrors::new();
        let input = InventoryInput {
            name: found.check(require("Name", &name.get_untracked())),
            sku: optional_text(&sku.get_untracked()),
            category: optional_text(&category.get_untracked()),
            quantity: found.check(non_negative("Quantity", &quantity.get_untracked())),
            unit_price: found.check(non_negative("Unit price", &unit_price.get_untracked())),
            reorder_level: found.check(optional_non_negative("Reorder level", &reorder_level.get_untracked())),
        };
        let valid = found.is_empty();
        errors.set(found);
        if !valid {
            return;
        }

        let action = async move {
            match editing_id {
                Some(id) => api::update_inventory_item(id, &input).await,
                None => api::create_inventory_item(&input).await,
            }
        };
        submit_form(ctx, saving, "Part saved", INVENTORY_CHANGES, action, move |_| mode.set(None));
    };

    view! {
        <form class="form form-grid" on:submit=submit>
            <TextField label="Name" value=name error=field_error(errors, "Name") />
            <TextField label="SKU" value=sku />
            <TextField label="Category" value=category />
            <TextField label="Quantity" value=quantity input_type="number" error=field_error(errors, "Quantity") />
            <TextField label="Unit price" value=unit_price input_type="number" error=field_error(errors, "Unit price") />
            <TextField label="Reorder level" value=reorder_level input_type="number" error=field_error(errors, "Reorder level") />
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

    fn item(qty: f64, price: f64) -> InventoryItem {
        InventoryItem {
            id: 1,
            name: "Spark plug".into(),
            sku: None,
            category: None,
            quantity: qty,
            unit_price: price,
            reorder_level: 5.0,
        }
    }

    #[test]
    fn test_stock_value() {
        let items = vec![item(4.0, 120.0), item(10.0, 35.5)];
        assert_eq!(stock_value(&items), Money::from_amount(835.0));
        assert!(items[0].is_low_stock());
        assert!(!items[1].is_low_stock());
    }
}
