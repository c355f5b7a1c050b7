//! Data Hooks
//!
//! One query hook per entity, plus mutation helpers that invalidate the
//! cache keys a change can affect and report the outcome as a toast.

use std::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::context::AppContext;
use crate::draft::{CreatedRecord, Resolution, WorkOrderDraft};
use crate::error::ApiError;
use crate::models::*;
use crate::query::{use_query, QueryState};

pub mod keys {
    pub const CUSTOMERS: &str = "customers";
    pub const VEHICLES: &str = "vehicles";
    pub const WORK_ORDERS: &str = "work-orders";
    pub const INVENTORY: &str = "inventory";
    pub const SERVICES: &str = "services";
    pub const WORKERS: &str = "workers";
    pub const SPENDINGS: &str = "spendings";
    pub const DASHBOARD: &str = "dashboard/summary";
    pub const INSIGHTS: &str = "insights/summary";
    pub const METADATA: &str = "metadata";

    use crate::api::with_query;
    use crate::models::WorkOrderStatus;

    /// Filtered keys double as the request path
    pub fn work_orders(status: Option<WorkOrderStatus>) -> String {
        with_query(WORK_ORDERS, &[("status", status.map(|s| s.as_str()).unwrap_or(""))])
    }

    pub fn spendings(category: &str) -> String {
        with_query(SPENDINGS, &[("category", category)])
    }

    pub fn metadata(search: &str) -> String {
        with_query(METADATA, &[("search", search.trim())])
    }
}

// Keys touched by each kind of mutation
pub const CUSTOMER_CHANGES: &[&str] = &["customers", "metadata", "dashboard"];
pub const VEHICLE_CHANGES: &[&str] = &["vehicles", "metadata", "dashboard"];
pub const WORK_ORDER_CHANGES: &[&str] = &["work-orders", "inventory", "dashboard", "insights", "metadata"];
pub const INVENTORY_CHANGES: &[&str] = &["inventory", "dashboard"];
pub const SERVICE_CHANGES: &[&str] = &["services", "insights"];
pub const WORKER_CHANGES: &[&str] = &["workers", "insights"];
pub const SPENDING_CHANGES: &[&str] = &["spendings", "dashboard", "insights"];

// ========================
// Queries
// ========================

pub fn use_customers() -> QueryState<Vec<Customer>> {
    use_query(|| keys::CUSTOMERS.to_string(), |_| api::list_customers())
}

pub fn use_vehicles() -> QueryState<Vec<Vehicle>> {
    use_query(|| keys::VEHICLES.to_string(), |_| api::list_vehicles())
}

pub fn use_inventory() -> QueryState<Vec<InventoryItem>> {
    use_query(|| keys::INVENTORY.to_string(), |_| api::list_inventory())
}

pub fn use_services() -> QueryState<Vec<ServiceItem>> {
    use_query(|| keys::SERVICES.to_string(), |_| api::list_services())
}

pub fn use_workers() -> QueryState<Vec<Worker>> {
    use_query(|| keys::WORKERS.to_string(), |_| api::list_workers())
}

pub fn use_work_orders(status: Signal<Option<WorkOrderStatus>>) -> QueryState<Vec<WorkOrder>> {
    use_query(
        move || keys::work_orders(status.get()),
        |key| async move { api::list_work_orders(&key).await },
    )
}

pub fn use_spendings(category: Signal<String>) -> QueryState<Vec<Spending>> {
    use_query(
        move || keys::spendings(&category.get()),
        |key| async move { api::list_spendings(&key).await },
    )
}

pub fn use_dashboard() -> QueryState<DashboardSummary> {
    use_query(|| keys::DASHBOARD.to_string(), |_| api::dashboard_summary())
}

pub fn use_insights() -> QueryState<InsightsSummary> {
    use_query(|| keys::INSIGHTS.to_string(), |_| api::insights_summary())
}

pub fn use_metadata(search: Signal<String>) -> QueryState<Vec<MetadataRecord>> {
    use_query(
        move || keys::metadata(&search.get()),
        |key| async move { api::search_metadata(&key).await },
    )
}

// ========================
// Mutations
// ========================

/// Await `action`; on success invalidate `changes` and toast `success`.
/// Returns `None` after toasting the error.
pub async fn mutate<T, Fut>(ctx: AppContext, success: &'static str, changes: &'static [&'static str], action: Fut) -> Option<T>
where
    Fut: Future<Output = Result<T, ApiError>>,
{
    match action.await {
        Ok(value) => {
            ctx.invalidate(changes);
            ctx.notify_success(success);
            Some(value)
        }
        Err(err) => {
            ctx.notify_error(&err);
            None
        }
    }
}

/// Run `action`; on success invalidate `changes`, toast `success` and call
/// `on_done`. Failures are toasted and nothing else happens.
pub fn run_mutation<T, Fut, D>(ctx: AppContext, success: &'static str, changes: &'static [&'static str], action: Fut, on_done: D)
where
    T: 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
    D: FnOnce(T) + 'static,
{
    spawn_local(async move {
        if let Some(value) = mutate(ctx, success, changes, action).await {
            on_done(value);
        }
    });
}

/// `run_mutation` for forms: `saving` is held while the request runs so the
/// submit button can be disabled. A failed submit leaves the form open.
pub fn submit_form<T, Fut, D>(
    ctx: AppContext,
    saving: RwSignal<bool>,
    success: &'static str,
    changes: &'static [&'static str],
    action: Fut,
    on_done: D,
) where
    T: 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
    D: FnOnce(T) + 'static,
{
    saving.set(true);
    spawn_local(async move {
        let result = mutate(ctx, success, changes, action).await;
        saving.set(false);
        if let Some(value) = result {
            on_done(value);
        }
    });
}

/// Create whatever the draft does not resolve to, then the work order itself.
/// Each record created on the way is handed to `record` as soon as it
/// exists, so a later step failing does not lose it.
pub async fn submit_work_order<R>(draft: WorkOrderDraft, resolution: Resolution, record: R) -> Result<WorkOrder, ApiError>
where
    R: Fn(CreatedRecord),
{
    let customer_id = match resolution.customer_id {
        Some(id) => id,
        None => {
            let created = api::create_customer(&draft.customer).await?;
            log::info!("[WORK ORDER] created customer #{}", created.id);
            let id = created.id;
            record(CreatedRecord::Customer(created));
            id
        }
    };
    let vehicle_id = match resolution.vehicle_id {
        Some(id) => id,
        None => {
            let created = api::create_vehicle(&draft.vehicle_for(customer_id)).await?;
            log::info!("[WORK ORDER] created vehicle #{}", created.id);
            let id = created.id;
            record(CreatedRecord::Vehicle(created));
            id
        }
    };
    api::create_work_order(&draft.to_input(customer_id, vehicle_id)).await
}

/// Refreshed after a submit that created records and then failed
pub const PARTIAL_SUBMIT_CHANGES: &[&str] = &["customers", "vehicles", "metadata", "dashboard"];

/// Work order creation may add customers and vehicles too
pub const WORK_ORDER_FLOW_CHANGES: &[&str] = &[
    "work-orders",
    "customers",
    "vehicles",
    "inventory",
    "dashboard",
    "insights",
    "metadata",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WorkOrderStatus;
    use crate::query::{key_matches, QueryCache};
    use serde_json::json;

    /// One settled entry for every key the pages use
    fn seeded() -> QueryCache {
        let all = [
            keys::CUSTOMERS.to_string(),
            keys::VEHICLES.to_string(),
            keys::work_orders(None),
            keys::work_orders(Some(WorkOrderStatus::InProgress)),
            keys::INVENTORY.to_string(),
            keys::SERVICES.to_string(),
            keys::WORKERS.to_string(),
            keys::spendings(""),
            keys::spendings("Rent"),
            keys::DASHBOARD.to_string(),
            keys::INSIGHTS.to_string(),
            keys::metadata("ravi"),
        ];
        let mut cache = QueryCache::default();
        for key in all {
            cache.begin(&key);
            cache.fulfill(&key, json!([]));
        }
        cache
    }

    fn stale_after(changes: &[&str]) -> Vec<String> {
        let mut cache = seeded();
        for prefix in changes {
            cache.invalidate(prefix);
        }
        let mut stale: Vec<String> = cache.keys().filter(|k| cache.lookup(k).is_some_and(|e| e.stale)).cloned().collect();
        stale.sort();
        stale
    }

    #[test]
    fn test_filtered_keys_are_request_paths() {
        assert_eq!(keys::work_orders(None), "work-orders");
        assert_eq!(keys::work_orders(Some(WorkOrderStatus::Pending)), "work-orders?status=pending");
        assert_eq!(keys::spendings("Spare parts"), "spendings?category=Spare%20parts");
        assert_eq!(keys::metadata("  ravi "), "metadata?search=ravi");
        assert_eq!(keys::metadata("   "), "metadata");
    }

    #[test]
    fn test_customer_changes_reach_dashboard_and_search() {
        assert_eq!(
            stale_after(CUSTOMER_CHANGES),
            vec!["customers", "dashboard/summary", "metadata?search=ravi"]
        );
        assert_eq!(
            stale_after(VEHICLE_CHANGES),
            vec!["dashboard/summary", "metadata?search=ravi", "vehicles"]
        );
    }

    #[test]
    fn test_work_order_changes_cover_filtered_lists() {
        let in_progress = keys::work_orders(Some(WorkOrderStatus::InProgress));
        let stale = stale_after(WORK_ORDER_CHANGES);
        assert!(stale.contains(&"work-orders".to_string()));
        assert!(stale.contains(&in_progress));
        assert!(stale.contains(&"inventory".to_string()));
        assert!(stale.contains(&"insights/summary".to_string()));
        assert!(!stale.contains(&"customers".to_string()));

        let flow = stale_after(WORK_ORDER_FLOW_CHANGES);
        assert!(flow.contains(&in_progress));
        for key in ["customers", "vehicles", "dashboard/summary", "metadata?search=ravi"] {
            assert!(flow.contains(&key.to_string()), "{} not refreshed", key);
        }
        assert!(!flow.contains(&"workers".to_string()));
    }

    #[test]
    fn test_catalog_and_spending_changes() {
        assert_eq!(stale_after(INVENTORY_CHANGES), vec!["dashboard/summary", "inventory"]);
        assert_eq!(stale_after(SERVICE_CHANGES), vec!["insights/summary", "services"]);
        assert_eq!(stale_after(WORKER_CHANGES), vec!["insights/summary", "workers"]);
        assert_eq!(
            stale_after(SPENDING_CHANGES),
            vec!["dashboard/summary", "insights/summary", "spendings", "spendings?category=Rent"]
        );
        assert_eq!(
            stale_after(PARTIAL_SUBMIT_CHANGES),
            vec!["customers", "dashboard/summary", "metadata?search=ravi", "vehicles"]
        );
    }

    #[test]
    fn test_every_change_prefix_hits_something() {
        let cache = seeded();
        let all = [
            CUSTOMER_CHANGES,
            VEHICLE_CHANGES,
            WORK_ORDER_CHANGES,
            INVENTORY_CHANGES,
            SERVICE_CHANGES,
            WORKER_CHANGES,
            SPENDING_CHANGES,
            WORK_ORDER_FLOW_CHANGES,
            PARTIAL_SUBMIT_CHANGES,
        ];
        for changes in all {
            for prefix in changes.iter() {
                assert!(cache.keys().any(|k| key_matches(k, prefix)), "{} matches no key", prefix);
            }
        }
    }
}
