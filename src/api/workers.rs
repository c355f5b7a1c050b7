//! Worker Endpoints

use serde::Serialize;

use super::{delete, get_json, post_json, put_json};
use crate::error::ApiError;
use crate::models::Worker;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkerInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub hourly_rate: f64,
    pub active: bool,
}

impl From<&Worker> for WorkerInput {
    fn from(w: &Worker) -> Self {
        Self {
            name: w.name.clone(),
            role: w.role.clone(),
            phone: w.phone.clone(),
            hourly_rate: w.hourly_rate,
            active: w.active,
        }
    }
}

pub async fn list_workers() -> Result<Vec<Worker>, ApiError> {
    get_json("workers").await
}

pub async fn create_worker(input: &WorkerInput) -> Result<Worker, ApiError> {
    post_json("workers", input).await
}

pub async fn update_worker(id: u32, input: &WorkerInput) -> Result<Worker, ApiError> {
    put_json(&format!("workers/{}", id), input).await
}

pub async fn delete_worker(id: u32) -> Result<(), ApiError> {
    delete(&format!("workers/{}", id)).await
}
