//! Vehicle Endpoints

use serde::Serialize;

use super::{delete, get_json, post_json, put_json};
use crate::error::ApiError;
use crate::models::Vehicle;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VehicleInput {
    pub customer_id: Option<u32>,
    pub make: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    pub registration_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mileage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl From<&Vehicle> for VehicleInput {
    fn from(v: &Vehicle) -> Self {
        Self {
            customer_id: v.customer_id,
            make: v.make.clone(),
            model: v.model.clone(),
            year: v.year,
            registration_number: v.registration_number.clone(),
            vin: v.vin.clone(),
            mileage: v.mileage,
            color: v.color.clone(),
        }
    }
}

pub async fn list_vehicles() -> Result<Vec<Vehicle>, ApiError> {
    get_json("vehicles").await
}

pub async fn create_vehicle(input: &VehicleInput) -> Result<Vehicle, ApiError> {
    post_json("vehicles", input).await
}

pub async fn update_vehicle(id: u32, input: &VehicleInput) -> Result<Vehicle, ApiError> {
    put_json(&format!("vehicles/{}", id), input).await
}

pub async fn delete_vehicle(id: u32) -> Result<(), ApiError> {
    delete(&format!("vehicles/{}", id)).await
}
