//! Product Browser
//!
//! Drink grid for the logged-in customer. The menu is re-read on a fixed
//! period while the page is mounted; when the backend cannot be reached a
//! built-in demo menu is shown instead.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::api;
use crate::components::{KioskHeader, RecipeMedia};
use crate::context::use_kiosk;
use crate::models::{fallback_menu, prepare_menu, Recipe};
use crate::session::{use_logout, use_route_guard, Requirement};

#[component]
pub fn ProductsPage() -> impl IntoView {
    if !use_route_guard(&[Requirement::Customer]) {
        return ().into_any();
    }

    let ctx = use_kiosk();
    let config = ctx.config();
    let navigate = use_navigate();
    let logout = use_logout(None);

    // None while the first load is in flight
    let (menu, set_menu) = signal::<Option<Vec<Recipe>>>(None);
    let (offline, set_offline) = signal(false);

    let refresh = move || {
        spawn_local(async move {
            match api::list_recipes(&ctx.api()).await {
                Ok(recipes) => {
                    let _ = set_menu.try_set(Some(prepare_menu(recipes)));
                    let _ = set_offline.try_set(false);
                }
                Err(err) => {
                    log::warn!("[API] menu refresh failed: {err}");
                    let _ = set_offline.try_set(true);
                    // Keep whatever is on screen; only an empty grid gets the demo menu
                    let _ = set_menu.try_update(|current| {
                        if current.as_ref().map_or(true, Vec::is_empty) {
                            *current = Some(fallback_menu());
                        }
                    });
                }
            }
        });
    };

    refresh();
    match set_interval_with_handle(refresh, config.menu_refresh()) {
        Ok(handle) => on_cleanup(move || handle.clear()),
        Err(err) => log::error!("[API] could not schedule menu refresh: {err:?}"),
    }

    let select = move |recipe: Recipe| {
        ctx.with_session(|session| session.set_selected_item(&recipe));
        navigate("/confirm", Default::default());
    };

    view! {
        <div class="kiosk-page">
            <KioskHeader
                title="Select Your Drink"
                subtitle="Touch to choose"
                timeout_secs=config.idle_timeout_secs
                on_timeout=logout
            >
                <button class="btn-secondary" on:click=move |_| refresh()>"Refresh"</button>
                <button class="btn-danger" on:click=move |_| logout.run(())>"Back"</button>
            </KioskHeader>

            <main class="kiosk-main">
                <Show when=move || offline.get()>
                    <div class="notice">"Unable to load the latest menu. Showing what we have."</div>
                </Show>
                {move || match menu.get() {
                    None => view! {
                        <div class="product-grid loading">
                            {(0..6).map(|_| view! { <div class="product-card skeleton" /> }).collect_view()}
                        </div>
                    }
                    .into_any(),
                    Some(recipes) if recipes.is_empty() => view! {
                        <div class="empty-state">"No drinks available"</div>
                    }
                    .into_any(),
                    Some(recipes) => {
                        let select = select.clone();
                        view! {
                            <div class="product-grid">
                                {recipes
                                    .into_iter()
                                    .map(|recipe| {
                                        let select = select.clone();
                                        let chosen = recipe.clone();
                                        view! {
                                            <div class="product-card" on:click=move |_| select(chosen.clone())>
                                                <RecipeMedia recipe=recipe.clone() />
                                                <div class="product-body">
                                                    <h3>{recipe.recipe_name.clone()}</h3>
                                                    <p class="muted">"Handcrafted beverage"</p>
                                                    <div class="product-footer">
                                                        <span class="price">{recipe.display_price()}</span>
                                                        <span class="btn-primary">"Select"</span>
                                                    </div>
                                                </div>
                                            </div>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                        }
                        .into_any()
                    }
                }}
            </main>
        </div>
    }
    .into_any()
}
