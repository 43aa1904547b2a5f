//! Owner Dashboard
//!
//! Recipe grid with add/edit/delete-with-undo, the bottle slot editor and
//! today's sales summary.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use super::local_time;
use crate::api;
use crate::components::{BottleEditor, DeleteConfirmButton, KioskHeader, RecipeDraft, RecipeMedia, RecipeModal};
use crate::context::{use_kiosk, KioskContext};
use crate::models::{DailyCount, Recipe, SalesSummary, ToastKind};
use crate::session::{use_logout, use_route_guard, Requirement};
use crate::store::KioskStateStoreFields;
use crate::undo::{delete_recipe_with_undo, reload_recipes};

const RECENT_SALES: usize = 8;

async fn load_dashboard(ctx: KioskContext) {
    reload_recipes(ctx).await;

    let client = ctx.api();
    match api::list_bottles(&client).await {
        Ok(bottles) => ctx.store.bottles().set(bottles),
        Err(err) => {
            log::error!("[API] could not load bottles: {err}");
            ctx.toast("Failed to load bottles", ToastKind::Error);
        }
    }
    match api::list_today_counts(&client).await {
        Ok(counts) => ctx.store.daily_counts().set(counts),
        Err(err) => {
            log::error!("[API] could not load today's sales: {err}");
            ctx.toast("Failed to load sales", ToastKind::Error);
        }
    }
}

/// Newest first, at most `RECENT_SALES`
fn recent_sales(counts: &[DailyCount]) -> Vec<DailyCount> {
    let mut sorted = counts.to_vec();
    sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    sorted.truncate(RECENT_SALES);
    sorted
}

#[component]
pub fn OwnerDashboardPage() -> impl IntoView {
    if !use_route_guard(&[Requirement::Owner]) {
        return ().into_any();
    }

    let ctx = use_kiosk();
    let navigate = use_navigate();
    let logout = use_logout(None);
    let owner_name = ctx
        .with_session(|session| session.current_user())
        .and_then(|user| user.display_name().map(str::to_string))
        .unwrap_or_else(|| "Owner".to_string());

    let recipes = ctx.store.recipes();
    let daily_counts = ctx.store.daily_counts();
    let (loading, set_loading) = signal(true);
    let (recipe_modal, set_recipe_modal) = signal::<Option<RecipeDraft>>(None);
    let (bottle_editor, set_bottle_editor) = signal(false);

    spawn_local(async move {
        load_dashboard(ctx).await;
        let _ = set_loading.try_set(false);
    });

    let summary = Memo::new(move |_| daily_counts.with(|counts| SalesSummary::of(counts)));
    let go = move |path: &'static str| {
        let navigate = navigate.clone();
        move |_: leptos::ev::MouseEvent| navigate(path, Default::default())
    };

    let recipe_card = move |recipe: Recipe| {
        let name = recipe.recipe_name.clone();
        let editing = recipe.clone();
        view! {
            <div class="recipe-card">
                <RecipeMedia recipe=recipe.clone() class="recipe-thumb" />
                <div class="recipe-info">
                    <h3>{recipe.recipe_name.clone()}</h3>
                    <p class="price">{recipe.display_price()}</p>
                    <p class="muted">{recipe.volume_summary()}</p>
                </div>
                <div class="recipe-actions">
                    <button
                        class="btn-edit"
                        on:click=move |_| set_recipe_modal.set(Some(RecipeDraft::edit(editing.clone())))
                    >
                        "✏️ Edit"
                    </button>
                    <DeleteConfirmButton
                        button_class="btn-delete"
                        label="🗑️ Delete"
                        on_confirm=move |_| delete_recipe_with_undo(ctx, name.clone())
                    />
                </div>
            </div>
        }
    };

    view! {
        <div class="owner-page">
            <KioskHeader title="MIXION Owner" timeout_secs=ctx.config().idle_timeout_secs on_timeout=logout>
                <span class="owner-name">{owner_name}</span>
                <button class="btn-secondary" on:click=go("/owner/ingredients")>"🧪 Ingredients"</button>
                <button class="btn-secondary" on:click=go("/owner/sales-details")>"📊 Sales"</button>
                <button class="btn-secondary" on:click=move |_| set_bottle_editor.set(true)>"🍾 Edit Bottles"</button>
                <button class="btn-primary" on:click=move |_| set_recipe_modal.set(Some(RecipeDraft::create()))>
                    "+ Add Recipe"
                </button>
                <button class="btn-danger" on:click=move |_| logout.run(())>"Logout"</button>
            </KioskHeader>

            <main class="owner-main">
                <section class="owner-recipes">
                    <h2>"Recipes"</h2>
                    <p class="muted">"Manage your drink recipes and ingredients"</p>
                    {move || {
                        if loading.get() {
                            view! {
                                <div class="recipe-grid loading">
                                    {(0..4).map(|_| view! { <div class="recipe-card skeleton" /> }).collect_view()}
                                </div>
                            }
                            .into_any()
                        } else if recipes.with(Vec::is_empty) {
                            view! {
                                <div class="empty-state">"No recipes yet. Create one to get started!"</div>
                            }
                            .into_any()
                        } else {
                            view! {
                                <div class="recipe-grid">
                                    <For
                                        each=move || recipes.get()
                                        key=|recipe| recipe.recipe_name.clone()
                                        children=recipe_card
                                    />
                                </div>
                            }
                            .into_any()
                        }
                    }}
                </section>

                <aside class="owner-summary">
                    <h2>"Today's Summary"</h2>
                    <p class="muted">"Real-time sales metrics"</p>
                    <div class="stat-card">
                        <p class="muted">"Sales Today"</p>
                        <p class="stat-value">{move || summary.get().count}</p>
                    </div>
                    <div class="stat-card">
                        <p class="muted">"Total Revenue"</p>
                        <p class="stat-value">{move || format!("₹{:.2}", summary.get().revenue)}</p>
                    </div>
                    <div class="recent-sales">
                        <h3>"Recent Transactions"</h3>
                        {move || {
                            let recent = daily_counts.with(|counts| recent_sales(counts));
                            if recent.is_empty() {
                                view! { <p class="muted">"No sales yet today"</p> }.into_any()
                            } else {
                                recent
                                    .into_iter()
                                    .map(|sale| view! {
                                        <div class="recent-sale">
                                            <span>{local_time(&sale.timestamp)}</span>
                                            <span>{sale.recipe.clone().unwrap_or_else(|| "-".to_string())}</span>
                                            <span class="price">{format!("₹{}", sale.amount)}</span>
                                        </div>
                                    })
                                    .collect_view()
                                    .into_any()
                            }
                        }}
                    </div>
                </aside>
            </main>

            {move || recipe_modal.get().map(|draft| view! {
                <RecipeModal draft=draft on_close=move |_| set_recipe_modal.set(None) />
            })}
            <Show when=move || bottle_editor.get()>
                <BottleEditor on_close=move |_| set_bottle_editor.set(false) />
            </Show>
        </div>
    }
    .into_any()
}
