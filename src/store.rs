//! Global Kiosk State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The store lives
//! at the application root so timers started by a page can still reach it
//! after that page unmounts.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{Bottle, DailyCount, Ingredient, Machine, Recipe, Toast};

/// Global kiosk state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct KioskState {
    /// Recipes shown on the owner dashboard
    pub recipes: Vec<Recipe>,
    /// Bottle slot assignments
    pub bottles: Vec<Bottle>,
    pub ingredients: Vec<Ingredient>,
    /// Sales, either today's or the full history depending on the page
    pub daily_counts: Vec<DailyCount>,
    pub machines: Vec<Machine>,
    /// Visible toasts, oldest first
    pub toasts: Vec<Toast>,
    pub next_toast_id: u64,
}

/// Type alias for the store
pub type KioskStore = Store<KioskState>;

/// Get the kiosk store from context
pub fn use_kiosk_store() -> KioskStore {
    expect_context::<KioskStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Insert or replace a recipe by name
pub fn store_upsert_recipe(store: &KioskStore, original_name: &str, recipe: Recipe) {
    let recipes = store.recipes();
    let mut recipes = recipes.write();
    match recipes.iter_mut().find(|r| r.recipe_name == original_name) {
        Some(existing) => *existing = recipe,
        None => recipes.push(recipe),
    }
}

/// Insert or replace an ingredient by ID
pub fn store_upsert_ingredient(store: &KioskStore, ingredient: Ingredient) {
    let ingredients = store.ingredients();
    let mut ingredients = ingredients.write();
    match ingredients.iter_mut().find(|i| i.id == ingredient.id) {
        Some(existing) => *existing = ingredient,
        None => ingredients.push(ingredient),
    }
}

/// Remove an ingredient from the store by ID
pub fn store_remove_ingredient(store: &KioskStore, ingredient_id: u32) {
    store.ingredients().write().retain(|i| i.id != ingredient_id);
}

/// Append a toast and return its ID
pub fn store_push_toast(store: &KioskStore, mut toast: Toast) -> u64 {
    let id = store.next_toast_id().get_untracked() + 1;
    store.next_toast_id().set(id);
    toast.id = id;
    store.toasts().write().push(toast);
    id
}

/// Remove a toast, returning it when it was still visible
pub fn store_take_toast(store: &KioskStore, toast_id: u64) -> Option<Toast> {
    let toasts = store.toasts();
    let mut toasts = toasts.write();
    let index = toasts.iter().position(|t| t.id == toast_id)?;
    Some(toasts.remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ToastKind;

    fn toast(message: &str) -> Toast {
        Toast {
            id: 0,
            message: message.to_string(),
            kind: ToastKind::Info,
            action: None,
        }
    }

    #[test]
    fn toasts_get_fresh_ids_and_leave_once() {
        let owner = Owner::new();
        owner.set();
        let store = KioskStore::new(KioskState::default());

        let first = store_push_toast(&store, toast("Saved"));
        let second = store_push_toast(&store, toast("Deleted"));
        assert_ne!(first, second);
        assert_eq!(store.toasts().get_untracked().len(), 2);

        let taken = store_take_toast(&store, first).map(|t| t.message);
        assert_eq!(taken.as_deref(), Some("Saved"));
        assert!(store_take_toast(&store, first).is_none());
        assert_eq!(store.toasts().get_untracked().len(), 1);
    }
}
