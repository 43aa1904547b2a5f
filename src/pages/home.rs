//! Attract Screen
//!
//! Looping signage shown while the kiosk is unattended.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::models::IDLE_VIDEO;

#[component]
pub fn HomePage() -> impl IntoView {
    let navigate = use_navigate();
    let start = move |_| navigate("/start", Default::default());

    view! {
        <div class="attract-screen" on:click=start>
            <video class="attract-video" src=IDLE_VIDEO muted=true loop=true autoplay=true playsinline=true />
            <div class="attract-overlay">
                <h1 class="attract-brand">"MIXION"</h1>
                <p class="attract-tagline">"Fresh drinks, mixed to order"</p>
                <p class="attract-cta">"Tap to start"</p>
            </div>
        </div>
    }
}
