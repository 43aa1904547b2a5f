//! Recipe Modal Component
//!
//! Create or edit a recipe: name, price, media and per-bottle volumes.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::context::use_kiosk;
use crate::models::{Recipe, RecipeIssue, ToastKind, BOTTLE_SLOTS};
use crate::store::{store_upsert_recipe, KioskStateStoreFields};

/// Recipe being edited and the name it is stored under, if any
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDraft {
    pub original_name: Option<String>,
    pub recipe: Recipe,
}

impl RecipeDraft {
    pub fn create() -> Self {
        Self {
            original_name: None,
            recipe: Recipe::draft(),
        }
    }

    pub fn edit(recipe: Recipe) -> Self {
        Self {
            original_name: Some(recipe.recipe_name.clone()),
            recipe,
        }
    }
}

fn blank_to_none(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[component]
pub fn RecipeModal(draft: RecipeDraft, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let ctx = use_kiosk();
    let bottles = ctx.store.bottles();
    let is_new = draft.original_name.is_none();

    let name = RwSignal::new(draft.recipe.recipe_name.clone());
    let price = RwSignal::new(draft.recipe.price.to_string());
    let video_url = RwSignal::new(draft.recipe.video_url.clone().unwrap_or_default());
    let image_url = RwSignal::new(draft.recipe.image_url.clone().unwrap_or_default());
    let volumes = RwSignal::new(draft.recipe.volumes.clone());
    let (issues, set_issues) = signal(Vec::<RecipeIssue>::new());
    let (saving, set_saving) = signal(false);
    let draft = StoredValue::new(draft);

    let bottle_label = move |slot: usize| {
        bottles
            .get()
            .iter()
            .find(|b| b.bottle_number as usize == slot)
            .map(|b| b.liquid_name.clone())
            .filter(|liquid| !liquid.is_empty())
            .map_or_else(|| format!("Bottle {slot}"), |liquid| format!("Bottle {slot} ({liquid})"))
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }

        let (original_name, mut recipe) = draft.with_value(|d| (d.original_name.clone(), d.recipe.clone()));
        recipe.recipe_name = name.get_untracked().trim().to_string();
        // Unparseable prices count as negative so validation rejects them
        recipe.price = price.get_untracked().trim().parse().unwrap_or(-1.0);
        recipe.video_url = blank_to_none(video_url.get_untracked());
        recipe.image_url = blank_to_none(image_url.get_untracked());
        recipe.volumes = volumes.get_untracked();

        let problems = recipe.validate();
        if !problems.is_empty() {
            set_issues.set(problems);
            return;
        }
        set_issues.set(Vec::new());
        set_saving.set(true);

        spawn_local(async move {
            let client = ctx.api();
            let result = match &original_name {
                Some(original) => api::update_recipe(&client, original, &recipe).await,
                None => api::create_recipe(&client, &recipe).await,
            };
            match result {
                Ok(saved) => {
                    let key = original_name.unwrap_or_else(|| saved.recipe_name.clone());
                    store_upsert_recipe(&ctx.store, &key, saved);
                    ctx.toast(if is_new { "Recipe created" } else { "Recipe updated" }, ToastKind::Success);
                    on_close.run(());
                }
                Err(err) => {
                    log::error!("[API] saving recipe failed: {err}");
                    ctx.toast(format!("Failed to save recipe: {}", err.detail()), ToastKind::Error);
                    let _ = set_saving.try_set(false);
                }
            }
        });
    };

    view! {
        <div class="modal-backdrop" on:click=move |_| on_close.run(())>
            <form class="modal recipe-modal" on:submit=on_submit on:click=|ev| ev.stop_propagation()>
                <h2>{if is_new { "Add Recipe" } else { "Edit Recipe" }}</h2>

                <Show when=move || !issues.get().is_empty()>
                    <ul class="form-errors">
                        {move || issues.get().into_iter().map(|issue| view! { <li>{issue.to_string()}</li> }).collect_view()}
                    </ul>
                </Show>

                <label>"Recipe name"</label>
                <input
                    prop:value=move || name.get()
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
                <label>"Price (₹)"</label>
                <input
                    type="number"
                    min="0"
                    step="0.01"
                    prop:value=move || price.get()
                    on:input=move |ev| price.set(event_target_value(&ev))
                />
                <label>"Video URL"</label>
                <input
                    prop:value=move || video_url.get()
                    on:input=move |ev| video_url.set(event_target_value(&ev))
                />
                <label>"Image URL"</label>
                <input
                    prop:value=move || image_url.get()
                    on:input=move |ev| image_url.set(event_target_value(&ev))
                />

                <div class="bottle-volumes">
                    {(1..=BOTTLE_SLOTS).map(|slot| view! {
                        <label class="bottle-volume">
                            <span>{move || bottle_label(slot)}</span>
                            <input
                                type="number"
                                min="0"
                                prop:value=move || volumes.with(|v| v.get(slot)).to_string()
                                on:input=move |ev| {
                                    let ml = event_target_value(&ev).parse().unwrap_or(0.0);
                                    volumes.update(|v| v.set(slot, ml));
                                }
                            />
                            <span class="unit">"ml"</span>
                        </label>
                    }).collect_view()}
                </div>

                <div class="modal-actions">
                    <button type="button" class="btn-secondary" on:click=move |_| on_close.run(())>"Cancel"</button>
                    <button type="submit" class="btn-primary" disabled=move || saving.get()>
                        {move || if saving.get() { "Saving..." } else { "Save" }}
                    </button>
                </div>
            </form>
        </div>
    }
}
