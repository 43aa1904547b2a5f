//! Order Confirmation

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::{KioskHeader, RecipeMedia};
use crate::context::use_kiosk;
use crate::session::{use_logout, use_route_guard, Requirement};

#[component]
pub fn ConfirmPage() -> impl IntoView {
    if !use_route_guard(&[Requirement::Customer, Requirement::SelectedItem]) {
        return ().into_any();
    }

    let ctx = use_kiosk();
    let navigate = use_navigate();
    let logout = use_logout(None);
    let Some(recipe) = ctx.with_session(|session| session.selected_item()) else {
        return ().into_any();
    };

    let go = move |path: &'static str| {
        let navigate = navigate.clone();
        move |_: leptos::ev::MouseEvent| navigate(path, Default::default())
    };

    view! {
        <div class="kiosk-page">
            <KioskHeader
                title="Confirm Your Selection"
                subtitle="Review before proceeding"
                timeout_secs=ctx.config().idle_timeout_secs
                on_timeout=logout
            />
            <main class="kiosk-main centered">
                <div class="card confirm-card">
                    <span class="badge">"Ready to Order"</span>
                    <h2>{recipe.recipe_name.clone()}</h2>
                    <RecipeMedia recipe=recipe.clone() class="confirm-media" />
                    <p class="muted">"Total Amount"</p>
                    <p class="price-large">{recipe.display_price()}</p>
                    <div class="button-row">
                        <button class="btn-secondary" on:click=go("/products")>"Back"</button>
                        <button class="btn-primary" on:click=go("/payment")>"Proceed to Payment"</button>
                    </div>
                </div>
            </main>
        </div>
    }
    .into_any()
}
