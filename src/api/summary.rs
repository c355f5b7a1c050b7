//! Aggregate Endpoints
//!
//! Dashboard, insights and the customer metadata browser.

use super::get_json;
use crate::error::ApiError;
use crate::models::{DashboardSummary, InsightsSummary, MetadataRecord};

pub async fn dashboard_summary() -> Result<DashboardSummary, ApiError> {
    get_json("dashboard/summary").await
}

pub async fn insights_summary() -> Result<InsightsSummary, ApiError> {
    get_json("insights/summary").await
}

/// `path` carries the search term, e.g. `metadata?search=ravi`
pub async fn search_metadata(path: &str) -> Result<Vec<MetadataRecord>, ApiError> {
    get_json(path).await
}
