//! Ingredient Management
//!
//! Create, rename, toggle cold storage and delete. This page uses the longer
//! owner idle timeout and logs out to the owner login.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::api;
use crate::components::{DeleteConfirmButton, KioskHeader};
use crate::context::{use_kiosk, KioskContext};
use crate::models::{Ingredient, IngredientInput, ToastKind};
use crate::session::{use_logout, use_route_guard, Requirement};
use crate::store::{store_remove_ingredient, store_upsert_ingredient, KioskStateStoreFields};

async fn load_ingredients(ctx: KioskContext) {
    match api::list_ingredients(&ctx.api()).await {
        Ok(ingredients) => ctx.store.ingredients().set(ingredients),
        Err(err) => {
            log::error!("[API] could not load ingredients: {err}");
            ctx.toast("Unable to load ingredients", ToastKind::Error);
        }
    }
}

fn remove_ingredient(ctx: KioskContext, ingredient: Ingredient) {
    spawn_local(async move {
        match api::delete_ingredient(&ctx.api(), ingredient.id).await {
            Ok(()) => {
                store_remove_ingredient(&ctx.store, ingredient.id);
                ctx.toast(format!("Deleted '{}'", ingredient.name), ToastKind::Success);
            }
            Err(err) => {
                log::error!("[API] deleting ingredient {} failed: {err}", ingredient.id);
                ctx.toast("Delete failed", ToastKind::Error);
            }
        }
    });
}

#[component]
pub fn IngredientsPage() -> impl IntoView {
    if !use_route_guard(&[Requirement::Owner]) {
        return ().into_any();
    }

    let ctx = use_kiosk();
    let config = ctx.config();
    let navigate = use_navigate();
    let logout = use_logout(Some(config.owner_landing_route.clone()));

    let ingredients = ctx.store.ingredients();
    let (loading, set_loading) = signal(true);
    let name = RwSignal::new(String::new());
    let is_cold = RwSignal::new(false);
    let (editing, set_editing) = signal::<Option<u32>>(None);
    let (saving, set_saving) = signal(false);

    spawn_local(async move {
        load_ingredients(ctx).await;
        let _ = set_loading.try_set(false);
    });

    let reset_form = move || {
        name.set(String::new());
        is_cold.set(false);
        set_editing.set(None);
    };

    let start_edit = move |ingredient: Ingredient| {
        name.set(ingredient.name);
        is_cold.set(ingredient.is_cold);
        set_editing.set(Some(ingredient.id));
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        let Some(input) = IngredientInput::new(&name.get_untracked(), is_cold.get_untracked()) else {
            ctx.toast("Name is required", ToastKind::Error);
            return;
        };
        let editing_id = editing.get_untracked();
        set_saving.set(true);

        spawn_local(async move {
            let client = ctx.api();
            let result = match editing_id {
                Some(id) => api::update_ingredient(&client, id, &input).await,
                None => api::create_ingredient(&client, &input).await,
            };
            let _ = set_saving.try_set(false);
            match result {
                Ok(saved) => {
                    store_upsert_ingredient(&ctx.store, saved);
                    let message = if editing_id.is_some() { "Ingredient updated" } else { "Ingredient created" };
                    ctx.toast(message, ToastKind::Success);
                    // Form signals die with the page
                    if name.try_set(String::new()).is_none() {
                        is_cold.set(false);
                        set_editing.set(None);
                    }
                }
                Err(err) => {
                    log::error!("[API] saving ingredient failed: {err}");
                    ctx.toast("Save failed", ToastKind::Error);
                }
            }
        });
    };

    view! {
        <div class="owner-page">
            <KioskHeader
                title="Ingredients"
                subtitle="Manage the liquids your recipes use"
                timeout_secs=config.owner_idle_timeout_secs
                on_timeout=logout
            >
                <button class="btn-secondary" on:click=move |_| navigate("/owner/dashboard", Default::default())>
                    "Back"
                </button>
                <button class="btn-danger" on:click=move |_| logout.run(())>"Logout"</button>
            </KioskHeader>

            <main class="owner-main single">
                <form class="card ingredient-form" on:submit=on_submit>
                    <h2>{move || if editing.get().is_some() { "Edit Ingredient" } else { "New Ingredient" }}</h2>
                    <input
                        placeholder="Ingredient name"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                    />
                    <label class="checkbox">
                        <input
                            type="checkbox"
                            prop:checked=move || is_cold.get()
                            on:change=move |ev| is_cold.set(event_target_checked(&ev))
                        />
                        "Cold"
                    </label>
                    <div class="button-row">
                        <button type="submit" class="btn-primary" disabled=move || saving.get()>
                            {move || if editing.get().is_some() { "Update" } else { "Create" }}
                        </button>
                        <Show when=move || editing.get().is_some()>
                            <button type="button" class="btn-secondary" on:click=move |_| reset_form()>
                                "Cancel"
                            </button>
                        </Show>
                    </div>
                </form>

                <section class="card ingredient-list">
                    {move || {
                        if loading.get() {
                            view! { <p class="muted">"Loading..."</p> }.into_any()
                        } else if ingredients.with(Vec::is_empty) {
                            view! { <p class="muted">"No ingredients yet"</p> }.into_any()
                        } else {
                            view! {
                                <ul>
                                    <For
                                        each=move || ingredients.get()
                                        key=|ingredient| (ingredient.id, ingredient.name.clone(), ingredient.is_cold)
                                        children=move |ingredient: Ingredient| {
                                            let cold = ingredient.is_cold;
                                            let editable = ingredient.clone();
                                            let doomed = ingredient.clone();
                                            view! {
                                                <li class="ingredient-row">
                                                    <span class="ingredient-name">{ingredient.name}</span>
                                                    {cold.then(|| view! { <span class="badge cold">"Cold"</span> })}
                                                    <button class="btn-edit" on:click=move |_| start_edit(editable.clone())>
                                                        "Edit"
                                                    </button>
                                                    <DeleteConfirmButton
                                                        button_class="btn-delete"
                                                        on_confirm=move |_| remove_ingredient(ctx, doomed.clone())
                                                    />
                                                </li>
                                            }
                                        }
                                    />
                                </ul>
                            }
                            .into_any()
                        }
                    }}
                </section>
            </main>
        </div>
    }
    .into_any()
}
