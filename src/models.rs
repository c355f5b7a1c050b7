//! Frontend Models
//!
//! Data structures matching backend entities.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Customer (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Vehicle (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: u32,
    #[serde(default)]
    pub customer_id: Option<u32>,
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub registration_number: String,
    #[serde(default)]
    pub vin: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub mileage: Option<f64>,
    #[serde(default)]
    pub color: Option<String>,
}

impl Vehicle {
    pub fn label(&self) -> String {
        let name = format!("{} {}", self.make, self.model).trim().to_string();
        if self.registration_number.is_empty() {
            name
        } else {
            format!("{} ({})", name, self.registration_number)
        }
    }
}

/// Inventory part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub quantity: f64,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub unit_price: f64,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub reorder_level: f64,
}

impl InventoryItem {
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.reorder_level
    }
}

/// Service catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceItem {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub price: f64,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub hourly_rate: f64,
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

/// Garage expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spending {
    pub id: u32,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub amount: f64,
    pub date: NaiveDate,
    #[serde(default)]
    pub payment_method: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkOrderStatus {
    Pending,
    InProgress,
    Completed,
    Delivered,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl WorkOrderStatus {
    pub const ALL: [WorkOrderStatus; 5] = [
        WorkOrderStatus::Pending,
        WorkOrderStatus::InProgress,
        WorkOrderStatus::Completed,
        WorkOrderStatus::Delivered,
        WorkOrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkOrderStatus::Pending => "pending",
            WorkOrderStatus::InProgress => "in_progress",
            WorkOrderStatus::Completed => "completed",
            WorkOrderStatus::Delivered => "delivered",
            WorkOrderStatus::Cancelled => "cancelled",
            WorkOrderStatus::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WorkOrderStatus::Pending => "Pending",
            WorkOrderStatus::InProgress => "In progress",
            WorkOrderStatus::Completed => "Completed",
            WorkOrderStatus::Delivered => "Delivered",
            WorkOrderStatus::Cancelled => "Cancelled",
            WorkOrderStatus::Unknown => "Unknown",
        }
    }

    pub fn parse(value: &str) -> Option<WorkOrderStatus> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }

    /// Still occupying a bay
    pub fn is_open(&self) -> bool {
        matches!(self, WorkOrderStatus::Pending | WorkOrderStatus::InProgress)
    }
}

/// Service line on a work order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceLine {
    #[serde(default)]
    pub service_id: Option<u32>,
    pub name: String,
    #[serde(default = "one", deserialize_with = "lenient::f64")]
    pub quantity: f64,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub unit_price: f64,
}

/// Part line on a work order, drawn from inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartLine {
    #[serde(default)]
    pub inventory_id: Option<u32>,
    pub name: String,
    #[serde(default = "one", deserialize_with = "lenient::f64")]
    pub quantity: f64,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub unit_price: f64,
}

fn one() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkOrder {
    pub id: u32,
    pub customer_id: u32,
    pub vehicle_id: u32,
    pub status: WorkOrderStatus,
    #[serde(default)]
    pub services: Vec<ServiceLine>,
    #[serde(default)]
    pub parts: Vec<PartLine>,
    #[serde(default)]
    pub worker_ids: Vec<u32>,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub discount: f64,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub parking_charge: f64,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub taxes: f64,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub total: f64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    /// Embedded by list endpoints
    #[serde(default)]
    pub customer: Option<Customer>,
    #[serde(default)]
    pub vehicle: Option<Vehicle>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    #[serde(default)]
    pub total_customers: u32,
    #[serde(default)]
    pub total_vehicles: u32,
    #[serde(default)]
    pub open_work_orders: u32,
    #[serde(default)]
    pub completed_work_orders: u32,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub revenue_this_month: f64,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub spendings_this_month: f64,
    #[serde(default)]
    pub low_stock_items: Vec<InventoryItem>,
    #[serde(default)]
    pub recent_work_orders: Vec<WorkOrder>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAmount {
    pub month: String,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAmount {
    pub category: String,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedCount {
    pub name: String,
    #[serde(default)]
    pub count: u32,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerStat {
    pub worker_id: u32,
    pub name: String,
    #[serde(default)]
    pub completed_orders: u32,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightsSummary {
    #[serde(default)]
    pub revenue_by_month: Vec<MonthlyAmount>,
    #[serde(default)]
    pub spending_by_category: Vec<CategoryAmount>,
    #[serde(default)]
    pub top_services: Vec<NamedCount>,
    #[serde(default)]
    pub worker_performance: Vec<WorkerStat>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordStats {
    #[serde(default)]
    pub work_order_count: u32,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub total_spent: f64,
    #[serde(default)]
    pub last_visit: Option<NaiveDate>,
}

/// Customer + vehicles + statistics, used by the records browser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataRecord {
    pub customer: Customer,
    #[serde(default)]
    pub vehicles: Vec<Vehicle>,
    #[serde(default)]
    pub stats: Option<RecordStats>,
}

/// Numbers from the backend may arrive as JSON numbers, numeric strings
/// (decimal columns) or null. Anything unparsable decodes as zero.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn to_f64(value: Value) -> Option<f64> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        }
    }

    pub fn f64<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        Ok(to_f64(Value::deserialize(d)?).unwrap_or(0.0))
    }

    pub fn opt_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        Ok(to_f64(Value::deserialize(d)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_inventory_numbers_as_strings_or_null() {
        let item: InventoryItem = serde_json::from_value(json!({
            "id": 4,
            "name": "Oil filter",
            "quantity": "12",
            "unit_price": null,
            "reorder_level": "n/a"
        }))
        .unwrap();
        assert_eq!(item.quantity, 12.0);
        assert_eq!(item.unit_price, 0.0);
        assert_eq!(item.reorder_level, 0.0);
        assert!(!item.is_low_stock());
    }

    #[test]
    fn test_unknown_status_does_not_fail() {
        let order: WorkOrder = serde_json::from_value(json!({
            "id": 1,
            "customer_id": 2,
            "vehicle_id": 3,
            "status": "awaiting_parts",
            "total": "1180.00"
        }))
        .unwrap();
        assert_eq!(order.status, WorkOrderStatus::Unknown);
        assert_eq!(order.total, 1180.0);
        assert!(order.services.is_empty());
    }

    #[test]
    fn test_status_round_trip_names() {
        assert_eq!(WorkOrderStatus::parse("in_progress"), Some(WorkOrderStatus::InProgress));
        assert_eq!(WorkOrderStatus::parse("unknown"), None);
        assert!(WorkOrderStatus::Pending.is_open());
        assert!(!WorkOrderStatus::Delivered.is_open());
    }

    #[test]
    fn test_vehicle_label() {
        let vehicle: Vehicle = serde_json::from_value(json!({
            "id": 9,
            "make": "Maruti",
            "model": "Swift",
            "registration_number": "KA01AB1234"
        }))
        .unwrap();
        assert_eq!(vehicle.label(), "Maruti Swift (KA01AB1234)");
        assert_eq!(vehicle.mileage, None);
    }
}
