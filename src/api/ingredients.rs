//! Ingredient Calls

use super::{ApiClient, ApiError, Method};
use crate::models::{Ingredient, IngredientInput};

pub async fn list_ingredients(api: &ApiClient) -> Result<Vec<Ingredient>, ApiError> {
    api.get("ingredients/").await
}

pub async fn create_ingredient(api: &ApiClient, input: &IngredientInput) -> Result<Ingredient, ApiError> {
    api.send_json(Method::Post, "ingredients/", input).await
}

pub async fn update_ingredient(api: &ApiClient, id: u32, input: &IngredientInput) -> Result<Ingredient, ApiError> {
    api.send_json(Method::Patch, &format!("ingredients/{id}/"), input).await
}

pub async fn delete_ingredient(api: &ApiClient, id: u32) -> Result<(), ApiError> {
    api.delete(&format!("ingredients/{id}/")).await
}
