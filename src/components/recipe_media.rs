//! Recipe Media Component
//!
//! Still image when the recipe has one, otherwise its looping clip.

use leptos::prelude::*;

use crate::models::{Recipe, IDLE_VIDEO};

#[component]
pub fn RecipeMedia(recipe: Recipe, #[prop(default = "recipe-media")] class: &'static str) -> impl IntoView {
    match recipe.image_url.filter(|url| !url.is_empty()) {
        Some(image) => view! {
            <img class=class src=image alt=recipe.recipe_name />
        }
        .into_any(),
        None => {
            let video = recipe.video_url.unwrap_or_else(|| IDLE_VIDEO.to_string());
            view! {
                <video class=class src=video muted=true loop=true autoplay=true playsinline=true />
            }
            .into_any()
        }
    }
}
