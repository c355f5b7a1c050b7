//! Work Order Endpoints

use serde::Serialize;

use super::{delete, get_blob, get_json, patch_json, post_json};
use crate::browser;
use crate::error::{js_message, ApiError};
use crate::models::{PartLine, ServiceLine, WorkOrder, WorkOrderStatus};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkOrderInput {
    pub customer_id: u32,
    pub vehicle_id: u32,
    pub status: WorkOrderStatus,
    pub services: Vec<ServiceLine>,
    pub parts: Vec<PartLine>,
    pub worker_ids: Vec<u32>,
    pub discount: f64,
    pub parking_charge: f64,
    pub taxes: f64,
    pub total: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Serialize)]
struct StatusArgs {
    status: WorkOrderStatus,
}

/// `path` carries the status filter, e.g. `work-orders?status=pending`
pub async fn list_work_orders(path: &str) -> Result<Vec<WorkOrder>, ApiError> {
    get_json(path).await
}

pub async fn create_work_order(input: &WorkOrderInput) -> Result<WorkOrder, ApiError> {
    post_json("work-orders", input).await
}

pub async fn update_work_order_status(id: u32, status: WorkOrderStatus) -> Result<WorkOrder, ApiError> {
    patch_json(&format!("work-orders/{}/status", id), &StatusArgs { status }).await
}

pub async fn delete_work_order(id: u32) -> Result<(), ApiError> {
    delete(&format!("work-orders/{}", id)).await
}

/// Fetch the invoice PDF and hand it to the browser as a download
pub async fn download_invoice(id: u32) -> Result<(), ApiError> {
    let blob = get_blob(&format!("work-orders/{}/invoice", id), "application/pdf").await?;
    browser::download_blob(&invoice_filename(id), &blob).map_err(|e| ApiError::Browser(js_message(&e)))
}

pub fn invoice_filename(id: u32) -> String {
    format!("invoice-{:05}.pdf", id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoice_filename() {
        assert_eq!(invoice_filename(42), "invoice-00042.pdf");
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let body = serde_json::to_string(&StatusArgs { status: WorkOrderStatus::InProgress }).unwrap();
        assert_eq!(body, r#"{"status":"in_progress"}"#);
    }
}
