//! Pages
//!
//! One module per sidebar entry. The active page is shell state and is
//! mirrored into `location.hash` as `#/<slug>`.

mod customers;
mod dashboard;
mod insights;
mod inventory;
mod records;
mod services;
mod spendings;
mod vehicles;
mod work_orders;
mod workers;

use leptos::prelude::*;

use crate::store::{use_app_store, AppStateStoreFields};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Page {
    #[default]
    Dashboard,
    WorkOrders,
    Customers,
    Vehicles,
    Records,
    Inventory,
    Services,
    Workers,
    Spendings,
    Insights,
}

impl Page {
    pub const ALL: [Page; 10] = [
        Page::Dashboard,
        Page::WorkOrders,
        Page::Customers,
        Page::Vehicles,
        Page::Records,
        Page::Inventory,
        Page::Services,
        Page::Workers,
        Page::Spendings,
        Page::Insights,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::WorkOrders => "Work Orders",
            Page::Customers => "Customers",
            Page::Vehicles => "Vehicles",
            Page::Records => "Records",
            Page::Inventory => "Inventory",
            Page::Services => "Services",
            Page::Workers => "Workers",
            Page::Spendings => "Spendings",
            Page::Insights => "Insights",
        }
    }

    pub fn hash(&self) -> &'static str {
        match self {
            Page::Dashboard => "#/dashboard",
            Page::WorkOrders => "#/work-orders",
            Page::Customers => "#/customers",
            Page::Vehicles => "#/vehicles",
            Page::Records => "#/records",
            Page::Inventory => "#/inventory",
            Page::Services => "#/services",
            Page::Workers => "#/workers",
            Page::Spendings => "#/spendings",
            Page::Insights => "#/insights",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Page::Dashboard => "▦",
            Page::WorkOrders => "🔧",
            Page::Customers => "👤",
            Page::Vehicles => "🚗",
            Page::Records => "🗂",
            Page::Inventory => "📦",
            Page::Services => "🛠",
            Page::Workers => "👷",
            Page::Spendings => "💸",
            Page::Insights => "📈",
        }
    }

    /// Unknown or empty hashes land on the dashboard
    pub fn from_hash(hash: &str) -> Page {
        let slug = hash.trim_start_matches('#').trim_matches('/');
        let slug = slug.split(['?', '/']).next().unwrap_or("");
        Page::ALL
            .into_iter()
            .find(|p| p.hash().trim_start_matches("#/") == slug)
            .unwrap_or_default()
    }
}

/// Renders whichever page the store points at
#[component]
pub fn PageView() -> impl IntoView {
    let store = use_app_store();

    move || match store.page().get() {
        Page::Dashboard => view! { <dashboard::DashboardPage /> }.into_any(),
        Page::WorkOrders => view! { <work_orders::WorkOrdersPage /> }.into_any(),
        Page::Customers => view! { <customers::CustomersPage /> }.into_any(),
        Page::Vehicles => view! { <vehicles::VehiclesPage /> }.into_any(),
        Page::Records => view! { <records::RecordsPage /> }.into_any(),
        Page::Inventory => view! { <inventory::InventoryPage /> }.into_any(),
        Page::Services => view! { <services::ServicesPage /> }.into_any(),
        Page::Workers => view! { <workers::WorkersPage /> }.into_any(),
        Page::Spendings => view! { <spendings::SpendingsPage /> }.into_any(),
        Page::Insights => view! { <insights::InsightsPage /> }.into_any(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hash() {
        assert_eq!(Page::from_hash("#/customers"), Page::Customers);
        assert_eq!(Page::from_hash("#/work-orders/"), Page::WorkOrders);
        assert_eq!(Page::from_hash("#/records?search=ravi"), Page::Records);
        assert_eq!(Page::from_hash(""), Page::Dashboard);
        assert_eq!(Page::from_hash("#/nowhere"), Page::Dashboard);
    }

    #[test]
    fn test_every_page_round_trips() {
        for page in Page::ALL {
            assert_eq!(Page::from_hash(page.hash()), page);
        }
    }
}
