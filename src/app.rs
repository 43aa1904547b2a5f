//! MIXION Kiosk App
//!
//! Root component: shared state, routes and the toast layer.

use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;
use mixion_core::KioskConfig;

use crate::components::{PageFrame, ToastHost};
use crate::context::KioskContext;
use crate::pages::*;
use crate::store::{KioskState, KioskStore};

#[component]
pub fn App() -> impl IntoView {
    let config = KioskConfig::from_build_env();
    log::info!("[APP] backend at {}", config.api_base);

    // Store and context live as long as the app so deletion timers outlive pages
    let store = KioskStore::new(KioskState::default());
    provide_context(store);
    provide_context(KioskContext::new(config, store));

    view! {
        <Router>
            <Routes fallback=|| view! { <PageFrame><p class="empty-state">"Page not found."</p></PageFrame> }>
                <Route path=path!("/") view=HomePage />
                <Route path=path!("/start") view=StartPage />
                <Route path=path!("/login") view=LoginPage />
                <Route path=path!("/signup") view=SignupPage />
                <Route path=path!("/owner-login") view=OwnerLoginPage />
                <Route path=path!("/products") view=ProductsPage />
                <Route path=path!("/confirm") view=ConfirmPage />
                <Route path=path!("/payment") view=PaymentPage />
                <Route path=path!("/ask") view=AskPage />
                <Route path=path!("/owner/dashboard") view=OwnerDashboardPage />
                <Route path=path!("/owner/ingredients") view=IngredientsPage />
                <Route path=path!("/owner/sales-details") view=SalesDetailsPage />
            </Routes>
        </Router>
        <ToastHost />
    }
}
