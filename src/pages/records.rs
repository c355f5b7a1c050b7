//! Records Page
//!
//! Customer records browser: each hit is a customer with their vehicles and
//! visit statistics. The search box is debounced before it reaches the
//! query key, so typing does not fire one request per keystroke.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{EmptyState, PageHeader, QueryStatus, SearchInput};
use crate::hooks::use_metadata;
use crate::models::{MetadataRecord, RecordStats};
use crate::money::format_currency;

const DEBOUNCE_MS: u32 = 300;

/// Mirror `source` into the returned signal once it has been still for `ms`
pub fn use_debounced(source: RwSignal<String>, ms: u32) -> Signal<String> {
    let settled = RwSignal::new(source.get_untracked());
    let ticket = StoredValue::new(0u64);

    Effect::new(move |_| {
        let value = source.get();
        ticket.update_value(|t| *t += 1);
        let mine = ticket.get_value();
        spawn_local(async move {
            TimeoutFuture::new(ms).await;
            if ticket.get_value() == mine {
                settled.set(value);
            }
        });
    });

    settled.into()
}

fn stats_line(stats: Option<&RecordStats>) -> String {
    let Some(stats) = stats else {
        return "No visits yet".to_string();
    };
    let last = stats
        .last_visit
        .map(|d| format!(", last visit {}", d.format("%d %b %Y")))
        .unwrap_or_default();
    format!(
        "{} work order{}, {} spent{}",
        stats.work_order_count,
        if stats.work_order_count == 1 { "" } else { "s" },
        format_currency(Some(stats.total_spent)),
        last
    )
}

#[component]
pub fn RecordsPage() -> impl IntoView {
    let search = RwSignal::new(String::new());
    let term = use_debounced(search, DEBOUNCE_MS);
    let records = use_metadata(term);

    view! {
        <section class="page">
            <PageHeader title="Records">
                <SearchInput value=search placeholder="Search customer, phone, plate or VIN" />
            </PageHeader>

            <QueryStatus loading=records.loading error=records.error />

            <div class="card-grid">
                {move || records.get_or_default().into_iter().map(|record| view! { <RecordCard record=record /> }).collect_view()}
            </div>

            <Show when=move || !records.loading.get() && records.data.with(|d| d.as_ref().is_some_and(Vec::is_empty))>
                <EmptyState message="No matching records" />
            </Show>
        </section>
    }
}

#[component]
fn RecordCard(record: MetadataRecord) -> impl IntoView {
    let summary = stats_line(record.stats.as_ref());
    let customer = record.customer;

    view! {
        <article class="card record-card">
            <header>
                <h3>{customer.name}</h3>
                <span class="muted">{customer.phone}</span>
            </header>
            <p class="muted">{summary}</p>
            <ul class="detail-list">
                {record.vehicles.into_iter().map(|v| view! {
                    <li>
                        <span>{v.label()}</span>
                        {v.vin.map(|vin| view! { <span class="mono muted">{vin}</span> })}
                    </li>
                }).collect_view()}
            </ul>
        </article>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_stats_line() {
        assert_eq!(stats_line(None), "No visits yet");
        let stats = RecordStats {
            work_order_count: 1,
            total_spent: 2360.0,
            last_visit: NaiveDate::from_ymd_opt(2026, 9, 4),
        };
        assert_eq!(stats_line(Some(&stats)), "1 work order, ₹2,360.00 spent, last visit 04 Sep 2026");
        let many = RecordStats { work_order_count: 3, total_spent: 0.0, last_visit: None };
        assert_eq!(stats_line(Some(&many)), "3 work orders, ₹0.00 spent");
    }
}
