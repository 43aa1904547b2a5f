//! Sales Calls
//!
//! Daily counts, machines and the sale recorded after each payment.

use super::{ApiClient, ApiError, Method};
use crate::models::{DailyCount, Machine, SaleRecord};

pub async fn list_daily_counts(api: &ApiClient) -> Result<Vec<DailyCount>, ApiError> {
    api.get("dailycounts/").await
}

pub async fn list_today_counts(api: &ApiClient) -> Result<Vec<DailyCount>, ApiError> {
    api.get("dailycounts/?range=today").await
}

pub async fn list_machines(api: &ApiClient) -> Result<Vec<Machine>, ApiError> {
    api.get("machines/").await
}

pub async fn record_sale(api: &ApiClient, sale: &SaleRecord) -> Result<(), ApiError> {
    api.send_json_discard(Method::Post, "record_sale/", sale).await
}
