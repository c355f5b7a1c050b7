//! Spending Endpoints

use chrono::NaiveDate;
use serde::Serialize;

use super::{delete, get_json, post_json, put_json};
use crate::error::ApiError;
use crate::models::Spending;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendingInput {
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub amount: f64,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
}

/// `path` carries the category filter, e.g. `spendings?category=Rent`
pub async fn list_spendings(path: &str) -> Result<Vec<Spending>, ApiError> {
    get_json(path).await
}

pub async fn create_spending(input: &SpendingInput) -> Result<Spending, ApiError> {
    post_json("spendings", input).await
}

pub async fn update_spending(id: u32, input: &SpendingInput) -> Result<Spending, ApiError> {
    put_json(&format!("spendings/{}", id), input).await
}

pub async fn delete_spending(id: u32) -> Result<(), ApiError> {
    delete(&format!("spendings/{}", id)).await
}
