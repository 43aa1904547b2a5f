//! "Another One?" Prompt

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::KioskHeader;
use crate::context::use_kiosk;
use crate::session::{use_logout, use_route_guard, Requirement};

#[component]
pub fn AskPage() -> impl IntoView {
    if !use_route_guard(&[Requirement::Customer]) {
        return ().into_any();
    }

    let ctx = use_kiosk();
    let navigate = use_navigate();
    let logout = use_logout(None);

    view! {
        <div class="kiosk-page full-page">
            <KioskHeader
                title="Enjoy Your Drink!"
                subtitle="Thank you for your order"
                timeout_secs=ctx.config().idle_timeout_secs
                on_timeout=logout
            />
            <main class="kiosk-main centered">
                <div class="card ask-card">
                    <div class="ask-icon">"🍹"</div>
                    <h2>"Another one?"</h2>
                    <p class="muted">"Would you like to order another drink?"</p>
                    <div class="button-row">
                        <button class="btn-primary" on:click=move |_| navigate("/products", Default::default())>
                            "Yes, Another One! 🎉"
                        </button>
                        <button class="btn-secondary" on:click=move |_| logout.run(())>"No, Exit"</button>
                    </div>
                </div>
            </main>
        </div>
    }
    .into_any()
}
