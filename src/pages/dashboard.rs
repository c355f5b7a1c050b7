//! Dashboard Page

use leptos::prelude::*;

use crate::billing::WorkOrderTotals;
use crate::components::{EmptyState, PageHeader, QueryStatus, StatCard};
use crate::context::use_app_context;
use crate::hooks::use_dashboard;
use crate::models::DashboardSummary;
use crate::money::{format_currency, Money};
use crate::pages::Page;
use crate::theme::status_badge_class;

/// Revenue minus spendings for the current month
pub fn monthly_net(summary: &DashboardSummary) -> Money {
    Money::from_amount(summary.revenue_this_month) - Money::from_amount(summary.spendings_this_month)
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let ctx = use_app_context();
    let summary = use_dashboard();

    let stat = move |f: fn(&DashboardSummary) -> String| {
        Signal::derive(move || summary.data.with(|s| s.as_ref().map(f).unwrap_or_else(|| "-".to_string())))
    };

    view! {
        <section class="page">
            <PageHeader title="Dashboard">
                <button class="btn btn-primary" on:click=move |_| ctx.navigate(Page::WorkOrders)>"Work orders"</button>
            </PageHeader>

            <QueryStatus loading=summary.loading error=summary.error />

            <div class="stat-row">
                <StatCard label="Customers" value=stat(|s| s.total_customers.to_string()) />
                <StatCard label="Vehicles" value=stat(|s| s.total_vehicles.to_string()) />
                <StatCard label="Open work orders" value=stat(|s| s.open_work_orders.to_string()) tone="warning" />
                <StatCard label="Completed" value=stat(|s| s.completed_work_orders.to_string()) tone="success" />
            </div>
            <div class="stat-row">
                <StatCard label="Revenue this month" value=stat(|s| format_currency(Some(s.revenue_this_month))) tone="success" />
                <StatCard label="Spendings this month" value=stat(|s| format_currency(Some(s.spendings_this_month))) tone="danger" />
                <StatCard label="Net" value=stat(|s| monthly_net(s).to_string()) />
            </div>

            <div class="two-column">
                <article class="card">
                    <h3>"Recent work orders"</h3>
                    {move || {
                        let recent = summary.data.with(|s| s.as_ref().map(|s| s.recent_work_orders.clone()).unwrap_or_default());
                        if recent.is_empty() {
                            return view! { <EmptyState message="Nothing yet" /> }.into_any();
                        }
                        view! {
                            <ul class="detail-list">
                                {recent.into_iter().map(|o| {
                                    let who = o.customer.as_ref().map(|c| c.name.clone()).unwrap_or_else(|| format!("#{}", o.customer_id));
                                    let total = WorkOrderTotals::for_order(&o).total.to_string();
                                    view! {
                                        <li>
                                            <span class="mono">"#" {o.id}</span>
                                            <span>{who}</span>
                                            <span class=status_badge_class(o.status)>{o.status.label()}</span>
                                            <span class="num">{total}</span>
                                        </li>
                                    }
                                }).collect_view()}
                            </ul>
                        }
                        .into_any()
                    }}
                </article>

                <article class="card">
                    <h3>"Low stock"</h3>
                    {move || {
                        let low = summary.data.with(|s| s.as_ref().map(|s| s.low_stock_items.clone()).unwrap_or_default());
                        if low.is_empty() {
                            return view! { <EmptyState message="Stock levels look fine" /> }.into_any();
                        }
                        view! {
                            <ul class="detail-list">
                                {low.into_iter().map(|i| view! {
                                    <li class="low-stock">
                                        <span>{i.name}</span>
                                        <span class="num">{format!("{} left (reorder at {})", i.quantity, i.reorder_level)}</span>
                                    </li>
                                }).collect_view()}
                            </ul>
                            <button class="btn btn-ghost" on:click=move |_| ctx.navigate(Page::Inventory)>"Open inventory"</button>
                        }
                        .into_any()
                    }}
                </article>
            </div>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_monthly_net_from_string_amounts() {
        let summary: DashboardSummary = serde_json::from_value(json!({
            "total_customers": 12,
            "revenue_this_month": "45000.50",
            "spendings_this_month": 12000
        }))
        .unwrap();
        assert_eq!(monthly_net(&summary), Money::from_amount(33000.5));
        assert!(summary.low_stock_items.is_empty());
    }
}
