//! Service Catalog Endpoints

use serde::Serialize;

use super::{delete, get_json, post_json, put_json};
use crate::error::ApiError;
use crate::models::ServiceItem;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ServiceInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
}

pub async fn list_services() -> Result<Vec<ServiceItem>, ApiError> {
    get_json("services").await
}

pub async fn create_service(input: &ServiceInput) -> Result<ServiceItem, ApiError> {
    post_json("services", input).await
}

pub async fn update_service(id: u32, input: &ServiceInput) -> Result<ServiceItem, ApiError> {
    put_json(&format!("services/{}", id), input).await
}

pub async fn delete_service(id: u32) -> Result<(), ApiError> {
    delete(&format!("services/{}", id)).await
}
