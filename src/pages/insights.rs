//! Insights Page
//!
//! Aggregates from the backend drawn as horizontal bars scaled to the
//! largest value in each section.

use leptos::prelude::*;

use crate::components::{EmptyState, PageHeader, QueryStatus};
use crate::hooks::use_insights;
use crate::models::InsightsSummary;
use crate::money::format_currency;

/// Bar width as a percentage of `max`, clamped to 0..=100
pub fn bar_percent(value: f64, max: f64) -> f64 {
    if !value.is_finite() || !max.is_finite() || max <= 0.0 || value <= 0.0 {
        return 0.0;
    }
    (value / max * 100.0).min(100.0)
}

/// (label, value, display text)
type BarRow = (String, f64, String);

fn revenue_rows(s: &InsightsSummary) -> Vec<BarRow> {
    s.revenue_by_month
        .iter()
        .map(|m| (m.month.clone(), m.amount, format_currency(Some(m.amount))))
        .collect()
}

fn spending_rows(s: &InsightsSummary) -> Vec<BarRow> {
    s.spending_by_category
        .iter()
        .map(|c| (c.category.clone(), c.amount, format_currency(Some(c.amount))))
        .collect()
}

fn service_rows(s: &InsightsSummary) -> Vec<BarRow> {
    s.top_services
        .iter()
        .map(|n| (n.name.clone(), n.count as f64, format!("{} jobs, {}", n.count, format_currency(Some(n.revenue)))))
        .collect()
}

fn worker_rows(s: &InsightsSummary) -> Vec<BarRow> {
    s.worker_performance
        .iter()
        .map(|w| {
            (
                w.name.clone(),
                w.revenue,
                format!("{} completed, {}", w.completed_orders, format_currency(Some(w.revenue))),
            )
        })
        .collect()
}

#[component]
fn BarChart(#[prop(into)] title: String, #[prop(into)] rows: Signal<Vec<BarRow>>) -> impl IntoView {
    view! {
        <article class="card">
            <h3>{title}</h3>
            {move || {
                let rows = rows.get();
                if rows.is_empty() {
                    return view! { <EmptyState message="No data" /> }.into_any();
                }
                let max = rows.iter().map(|(_, v, _)| *v).fold(0.0, f64::max);
                view! {
                    <div class="bar-chart">
                        {rows.into_iter().map(|(label, value, text)| {
                            let width = format!("width: {:.1}%", bar_percent(value, max));
                            view! {
                                <div class="bar-row">
                                    <span class="bar-label">{label}</span>
                                    <div class="bar-track"><div class="bar-fill" style=width></div></div>
                                    <span class="bar-value">{text}</span>
                                </div>
                            }
                        }).collect_view()}
                    </div>
                }
                .into_any()
            }}
        </article>
    }
}

#[component]
pub fn InsightsPage() -> impl IntoView {
    let insights = use_insights();
    let rows = move |f: fn(&InsightsSummary) -> Vec<BarRow>| {
        Signal::derive(move || insights.data.with(|s| s.as_ref().map(f).unwrap_or_default()))
    };

    view! {
        <section class="page">
            <PageHeader title="Insights" />
            <QueryStatus loading=insights.loading error=insights.error />
            <div class="two-column">
                <BarChart title="Revenue by month" rows=rows(revenue_rows) />
                <BarChart title="Spending by category" rows=rows(spending_rows) />
                <BarChart title="Top services" rows=rows(service_rows) />
                <BarChart title="Worker performance" rows=rows(worker_rows) />
            </div>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bar_percent() {
        assert_eq!(bar_percent(50.0, 200.0), 25.0);
        assert_eq!(bar_percent(200.0, 200.0), 100.0);
        assert_eq!(bar_percent(10.0, 0.0), 0.0);
        assert_eq!(bar_percent(-5.0, 100.0), 0.0);
        assert_eq!(bar_percent(f64::NAN, 100.0), 0.0);
    }

    #[test]
    fn test_rows_from_summary() {
        let summary: InsightsSummary = serde_json::from_value(json!({
            "top_services": [{ "name": "Oil change", "count": 14, "revenue": "16800" }],
            "worker_performance": [{ "worker_id": 2, "name": "Suresh", "completed_orders": 9, "revenue": 54000 }]
        }))
        .unwrap();
        assert!(revenue_rows(&summary).is_empty());
        assert_eq!(service_rows(&summary)[0], ("Oil change".to_string(), 14.0, "14 jobs, ₹16,800.00".to_string()));
        assert_eq!(worker_rows(&summary)[0].2, "9 completed, ₹54,000.00");
    }
}
