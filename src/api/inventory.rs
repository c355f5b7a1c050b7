//! Inventory Endpoints

use serde::Serialize;

use super::{delete, get_json, post_json, put_json};
use crate::error::ApiError;
use crate::models::InventoryItem;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InventoryInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub quantity: f64,
    pub unit_price: f64,
    pub reorder_level: f64,
}

impl From<&InventoryItem> for InventoryInput {
    fn from(i: &InventoryItem) -> Self {
        Self {
            name: i.name.clone(),
            sku: i.sku.clone(),
            category: i.category.clone(),
            quantity: i.quantity,
            unit_price: i.unit_price,
            reorder_level: i.reorder_level,
        }
    }
}

pub async fn list_inventory() -> Result<Vec<InventoryItem>, ApiError> {
    get_json("inventory").await
}

pub async fn create_inventory_item(input: &InventoryInput) -> Result<InventoryItem, ApiError> {
    post_json("inventory", input).await
}

pub async fn update_inventory_item(id: u32, input: &InventoryInput) -> Result<InventoryItem, ApiError> {
    put_json(&format!("inventory/{}", id), input).await
}

pub async fn delete_inventory_item(id: u32) -> Result<(), ApiError> {
    delete(&format!("inventory/{}", id)).await
}
