//! Customer Endpoints

use serde::Serialize;

use super::{delete, get_json, post_json, put_json};
use crate::error::ApiError;
use crate::models::Customer;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CustomerInput {
    pub name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<&Customer> for CustomerInput {
    fn from(c: &Customer) -> Self {
        Self {
            name: c.name.clone(),
            phone: c.phone.clone(),
            email: c.email.clone(),
            address: c.address.clone(),
            notes: c.notes.clone(),
        }
    }
}

pub async fn list_customers() -> Result<Vec<Customer>, ApiError> {
    get_json("customers").await
}

pub async fn create_customer(input: &CustomerInput) -> Result<Customer, ApiError> {
    post_json("customers", input).await
}

pub async fn update_customer(id: u32, input: &CustomerInput) -> Result<Customer, ApiError> {
    put_json(&format!("customers/{}", id), input).await
}

pub async fn delete_customer(id: u32) -> Result<(), ApiError> {
    delete(&format!("customers/{}", id)).await
}
