//! CSV Export
//!
//! Table pages export what they currently show.

use crate::billing::WorkOrderTotals;
use crate::browser;
use crate::error::{js_message, ApiError};
use crate::models::{Customer, InventoryItem, ServiceItem, Spending, Vehicle, WorkOrder, Worker};

/// Quote a field when it contains a separator, quote or line break.
pub fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

pub fn to_csv(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut out = String::new();
    let header_line: Vec<String> = headers.iter().map(|h| escape_field(h)).collect();
    out.push_str(&header_line.join(","));
    for row in rows {
        out.push('\n');
        let line: Vec<String> = row.iter().map(|f| escape_field(f)).collect();
        out.push_str(&line.join(","));
    }
    out
}

/// Entities that can be exported as a CSV row
pub trait CsvRow {
    fn headers() -> &'static [&'static str];
    fn row(&self) -> Vec<String>;
}

pub fn rows_to_csv<T: CsvRow>(items: &[T]) -> String {
    let rows: Vec<Vec<String>> = items.iter().map(CsvRow::row).collect();
    to_csv(T::headers(), &rows)
}

fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn amount(value: f64) -> String {
    format!("{:.2}", if value.is_finite() { value } else { 0.0 })
}

impl CsvRow for Customer {
    fn headers() -> &'static [&'static str] {
        &["ID", "Name", "Phone", "Email", "Address"]
    }
    fn row(&self) -> Vec<String> {
        vec![self.id.to_string(), self.name.clone(), self.phone.clone(), opt(&self.email), opt(&self.address)]
    }
}

impl CsvRow for Vehicle {
    fn headers() -> &'static [&'static str] {
        &["ID", "Customer ID", "Make", "Model", "Year", "Registration", "VIN", "Mileage"]
    }
    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.customer_id.map(|id| id.to_string()).unwrap_or_default(),
            self.make.clone(),
            self.model.clone(),
            self.year.map(|y| y.to_string()).unwrap_or_default(),
            self.registration_number.clone(),
            opt(&self.vin),
            self.mileage.map(|m| format!("{}", m)).unwrap_or_default(),
        ]
    }
}

impl CsvRow for InventoryItem {
    fn headers() -> &'static [&'static str] {
        &["ID", "Name", "SKU", "Category", "Quantity", "Unit Price", "Reorder Level"]
    }
    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            opt(&self.sku),
            opt(&self.category),
            format!("{}", self.quantity),
            amount(self.unit_price),
            format!("{}", self.reorder_level),
        ]
    }
}

impl CsvRow for ServiceItem {
    fn headers() -> &'static [&'static str] {
        &["ID", "Name", "Description", "Price", "Duration (min)"]
    }
    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            opt(&self.description),
            amount(self.price),
            self.duration_minutes.map(|d| d.to_string()).unwrap_or_default(),
        ]
    }
}

impl CsvRow for Worker {
    fn headers() -> &'static [&'static str] {
        &["ID", "Name", "Role", "Phone", "Hourly Rate", "Active"]
    }
    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            opt(&self.role),
            opt(&self.phone),
            amount(self.hourly_rate),
            if self.active { "yes" } else { "no" }.to_string(),
        ]
    }
}

impl CsvRow for Spending {
    fn headers() -> &'static [&'static str] {
        &["ID", "Date", "Category", "Description", "Amount", "Payment Method"]
    }
    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.date.format("%Y-%m-%d").to_string(),
            self.category.clone(),
            opt(&self.description),
            amount(self.amount),
            opt(&self.payment_method),
        ]
    }
}

impl CsvRow for WorkOrder {
    fn headers() -> &'static [&'static str] {
        &["ID", "Customer", "Vehicle", "Status", "Services", "Parts", "Discount", "Parking", "Taxes", "Total", "Created"]
    }
    fn row(&self) -> Vec<String> {
        let totals = WorkOrderTotals::for_order(self);
        vec![
            self.id.to_string(),
            self.customer.as_ref().map(|c| c.name.clone()).unwrap_or_else(|| format!("#{}", self.customer_id)),
            self.vehicle.as_ref().map(Vehicle::label).unwrap_or_else(|| format!("#{}", self.vehicle_id)),
            self.status.label().to_string(),
            amount(totals.services.as_amount()),
            amount(totals.parts.as_amount()),
            amount(totals.discount.as_amount()),
            amount(totals.parking.as_amount()),
            amount(totals.taxes.as_amount()),
            amount(totals.total.as_amount()),
            opt(&self.created_at),
        ]
    }
}

/// "customers-2026-10-19.csv"
pub fn export_filename(prefix: &str, today: chrono::NaiveDate) -> String {
    format!("{}-{}.csv", prefix, today.format("%Y-%m-%d"))
}

/// Trigger a browser download of `items` as CSV
pub fn download_csv<T: CsvRow>(prefix: &str, items: &[T]) -> Result<(), ApiError> {
    let content = rows_to_csv(items);
    let filename = export_filename(prefix, chrono::Local::now().date_naive());
    log::info!("[EXPORT] {} rows -> {}", items.len(), filename);
    browser::download_text(&filename, &content, "text/csv;charset=utf-8")
        .map_err(|e| ApiError::Browser(js_message(&e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_escape_plain_field_unchanged() {
        assert_eq!(escape_field("Oil filter"), "Oil filter");
        assert_eq!(escape_field(""), "");
    }

    #[test]
    fn test_escape_quotes_commas_and_newlines() {
        assert_eq!(escape_field("Brake pads, front"), "\"Brake pads, front\"");
        assert_eq!(escape_field("12\" wiper"), "\"12\"\" wiper\"");
        assert_eq!(escape_field("line1\nline2"), "\"line1\nline2\"");
        assert_eq!(escape_field("a\rb"), "\"a\rb\"");
    }

    #[test]
    fn test_to_csv_layout() {
        let csv = to_csv(&["Name", "Note"], &[vec!["Ravi".into(), "VIP, pays cash".into()]]);
        assert_eq!(csv, "Name,Note\nRavi,\"VIP, pays cash\"");
    }

    #[test]
    fn test_spending_rows() {
        let spending = Spending {
            id: 3,
            category: "Utilities".into(),
            description: Some("Power bill, Oct".into()),
            amount: 2450.5,
            date: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
            payment_method: None,
        };
        let csv = rows_to_csv(&[spending]);
        assert_eq!(
            csv,
            "ID,Date,Category,Description,Amount,Payment Method\n3,2026-10-01,Utilities,\"Power bill, Oct\",2450.50,"
        );
    }

    #[test]
    fn test_export_filename() {
        let day = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(export_filename("customers", day), "customers-2026-10-19.csv");
    }
}
