//! Bottle Slot Calls

use serde::Serialize;

use super::{ApiClient, ApiError, Method};
use crate::models::Bottle;

#[derive(Serialize)]
struct LiquidArgs<'a> {
    liquid_name: &'a str,
}

pub async fn list_bottles(api: &ApiClient) -> Result<Vec<Bottle>, ApiError> {
    api.get("bottles/").await
}

pub async fn create_bottle(api: &ApiClient, bottle: &Bottle) -> Result<Bottle, ApiError> {
    api.send_json(Method::Post, "bottles/", bottle).await
}

pub async fn assign_liquid(api: &ApiClient, bottle_number: u32, liquid_name: &str) -> Result<(), ApiError> {
    let path = format!("bottles/{bottle_number}/");
    api.send_json_discard(Method::Patch, &path, &LiquidArgs { liquid_name }).await
}
