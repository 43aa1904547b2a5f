//! Recipe Calls
//!
//! Recipes are addressed by name, so every path segment is percent-encoded.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use super::{ApiClient, ApiError, Method};
use crate::models::Recipe;

/// Characters left alone by `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// `recipes/{name}/` with the name encoded as a single path segment.
pub fn recipe_path(name: &str) -> String {
    format!("recipes/{}/", utf8_percent_encode(name, COMPONENT))
}

// ========================
// Commands
// ========================

pub async fn list_recipes(api: &ApiClient) -> Result<Vec<Recipe>, ApiError> {
    api.get("recipes/").await
}

pub async fn create_recipe(api: &ApiClient, recipe: &Recipe) -> Result<Recipe, ApiError> {
    api.send_json(Method::Post, "recipes/", recipe).await
}

/// PATCH the recipe stored under `original_name`, which may differ from
/// `recipe.recipe_name` after a rename.
pub async fn update_recipe(api: &ApiClient, original_name: &str, recipe: &Recipe) -> Result<Recipe, ApiError> {
    api.send_json(Method::Patch, &recipe_path(original_name), recipe).await
}

pub async fn delete_recipe(api: &ApiClient, name: &str) -> Result<(), ApiError> {
    api.delete(&recipe_path(name)).await
}
