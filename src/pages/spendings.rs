//! Spendings Page
//!
//! Garage expenses. The category filter is applied by the backend; the
//! month filter and the period total are computed here.

use chrono::NaiveDate;
use leptos::prelude::*;

use crate::api::{self, SpendingInput};
use crate::components::{
    field_error, DeleteConfirmButton, EmptyState, ErrorText, ExportButton, FormMode, Modal, PageHeader, QueryStatus,
    SelectField, StatCard, TextField,
};
use crate::context::use_app_context;
use crate::export;
use crate::hooks::{run_mutation, submit_form, use_spendings, SPENDING_CHANGES};
use crate::models::Spending;
use crate::money::{format_currency, Money};
use crate::validation::{date, non_negative, optional_text, require, FormErrors};

pub const CATEGORIES: [&str; 7] = ["Rent", "Salaries", "Parts", "Utilities", "Tools", "Maintenance", "Other"];
pub const PAYMENT_METHODS: [&str; 4] = ["Cash", "UPI", "Card", "Bank transfer"];

/// `period` is an `<input type="month">` value ("2026-10"); empty matches all
pub fn in_period(day: NaiveDate, period: &str) -> bool {
    let period = period.trim();
    period.is_empty() || day.format("%Y-%m").to_string() == period
}

pub fn period_total(spendings: &[Spending]) -> Money {
    spendings.iter().map(|s| Money::from_amount(s.amount)).sum()
}

fn options(values: &[&str], any_label: &str) -> Vec<(String, String)> {
    std::iter::once((String::new(), any_label.to_string()))
        .chain(values.iter().map(|v| (v.to_string(), v.to_string())))
        .collect()
}

#[component]
pub fn SpendingsPage() -> impl IntoView {
    let ctx = use_app_context();
    let category = RwSignal::new(String::new());
    let period = RwSignal::new(chrono::Local::now().format("%Y-%m").to_string());
    let spendings = use_spendings(category.into());
    let form = RwSignal::new(None::<FormMode<Spending>>);

    let filtered = Memo::new(move |_| {
        let period = period.get();
        let mut list: Vec<Spending> = spendings
            .get_or_default()
            .into_iter()
            .filter(|s| in_period(s.date, &period))
            .collect();
        list.sort_by(|a, b| b.date.cmp(&a.date));
        list
    });
    let total = Signal::derive(move || filtered.with(|list| period_total(list)).to_string());

    let export_csv = move |_: ()| {
        if let Err(e) = export::download_csv("spendings", &filtered.get_untracked()) {
            ctx.notify_error(&e);
        }
    };

    view! {
        <section class="page">
            <PageHeader title="Spendings">
                <SelectField label="Category" value=category options=Signal::derive(|| options(&CATEGORIES, "All categories")) />
                <TextField label="Month" value=period input_type="month" />
                <ExportButton on_export=export_csv />
                <button class="btn btn-primary" on:click=move |_| form.set(Some(FormMode::Create))>"+ New spending"</button>
            </PageHeader>

            <div class="stat-row">
                <StatCard label="Total for period" value=total tone="danger" />
            </div>

            <QueryStatus loading=spendings.loading error=spendings.error />

            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Date"</th>
                        <th>"Category"</th>
                        <th>"Description"</th>
                        <th>"Paid by"</th>
                        <th class="num">"Amount"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    {move || filtered.get().into_iter().map(|spending| {
                        let id = spending.id;
                        let for_edit = spending.clone();
                        let subject = format!("{} spending", spending.category);
                        view! {
                            <tr>
                                <td>{spending.date.format("%d %b %Y").to_string()}</td>
                                <td>{spending.category}</td>
                                <td>{spending.description.unwrap_or_default()}</td>
                                <td>{spending.payment_method.unwrap_or_default()}</td>
                                <td class="num">{format_currency(Some(spending.amount))}</td>
                                <td class="row-actions">
                                    <button class="btn btn-ghost" on:click=move |_| form.set(Some(FormMode::Edit(for_edit.clone())))>
                                        "Edit"
                                    </button>
                                    <DeleteConfirmButton subject=subject on_confirm=move |_: ()| {
                                        run_mutation(ctx, "Spending deleted", SPENDING_CHANGES, api::delete_spending(id), |_| {});
                                    } />
                                </td>
                            </tr>
                        }
                    }).collect_view()}
                </tbody>
            </table>

            <Show when=move || !spendings.loading.get() && filtered.with(|f| f.is_empty())>
                <EmptyState message="No spendings for this period" />
            </Show>

            <Modal
                open=Signal::derive(move || form.with(Option::is_some))
                title=Signal::derive(move || form.with(|m| m.as_ref().map(|m| m.title("spending")).unwrap_or_default()))
                on_close=move |_: ()| form.set(None)
            >
                <SpendingForm mode=form />
            </Modal>
        </section>
    }
}

#[component]
fn SpendingForm(mode: RwSignal<Option<FormMode<Spending>>>) -> impl IntoView {
    let ctx = use_app_context();
    let initial = mode.get_untracked().and_then(|m| m.editing().cloned());
    let editing_id = initial.as_ref().map(|s| s.id);
    let today = chrono::Local::now().date_naive();

    let category = RwSignal::new(initial.as_ref().map(|s| s.category.clone()).unwrap_or_else(|| CATEGORIES[0].to_string()));
    let description = RwSignal::new(initial.as_ref().and_then(|s| s.description.clone()).unwrap_or_default());
    let amount = RwSignal::new(initial.as_ref().map(|s| s.amount.to_string()).unwrap_or_default());
    let day = RwSignal::new(initial.as_ref().map(|s| s.date).unwrap_or(today).format("%Y-%m-%d").to_string());
    let payment_method = RwSignal::new(initial.as_ref().and_then(|s| s.payment_method.clone()).unwrap_or_default());
    let errors = RwSignal::new(FormErrors::new());
    let saving = RwSignal::new(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let mut found = FormErrors::new();
        let input = SpendingInput {
            category: found.check(require("Category", &category.get_untracked())),
            description: optional_text(&description.get_untracked()),
            amount: found.check(non_negative("Amount", &amount.get_untracked())),
            date: found.check(date("Date", &day.get_untracked())),
            payment_method: optional_text(&payment_method.get_untracked()),
        };
        let valid = found.is_empty();
        errors.set(found);
        if !valid {
            return;
        }

        let action = async move {
            match editing_id {
                Some(id) => api::update_spending(id, &input).await,
                None => api::create_spending(&input).await,
            }
        };
        submit_form(ctx, saving, "Spending saved", SPENDING_CHANGES, action, move |_| mode.set(None));
    };

    view! {
        <form class="form" on:submit=submit>
            <SelectField
                label="Category"
                value=category
                options=Signal::derive(|| CATEGORIES.iter().map(|c| (c.to_string(), c.to_string())).collect::<Vec<_>>())
                error=field_error(errors, "Category")
            />
            <TextField label="Amount" value=amount input_type="number" error=field_error(errors, "Amount") />
            <TextField label="Date" value=day input_type="date" error=field_error(errors, "Date") />
            <TextField label="Description" value=description />
            <SelectField label="Payment method" value=payment_method options=Signal::derive(|| options(&PAYMENT_METHODS, "-")) />
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

    fn spending(day: NaiveDate, amount: f64) -> Spending {
        Spending { id: 1, category: "Rent".into(), description: None, amount, date: day, payment_method: None }
    }

    #[test]
    fn test_in_period() {
        let day = NaiveDate::from_ymd_opt(2026, 10, 3).unwrap();
        assert!(in_period(day, "2026-10"));
        assert!(in_period(day, ""));
        assert!(!in_period(day, "2026-09"));
    }

    #[test]
    fn test_period_total_in_paise() {
        let day = NaiveDate::from_ymd_opt(2026, 10, 3).unwrap();
        let list = vec![spending(day, 0.1), spending(day, 0.2), spending(day, 1200.0)];
        assert_eq!(period_total(&list).paise(), 120030);
    }

    #[test]
    fn test_filter_options_start_with_any() {
        let opts = options(&CATEGORIES, "All categories");
        assert_eq!(opts[0], (String::new(), "All categories".to_string()));
        assert_eq!(opts.len(), CATEGORIES.len() + 1);
    }
}
