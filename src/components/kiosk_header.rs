//! Kiosk Header Component
//!
//! Sticky page header with the idle countdown and optional actions.

use leptos::prelude::*;

use crate::components::IdleTimer;

#[component]
pub fn KioskHeader(
    title: &'static str,
    #[prop(optional)] subtitle: Option<&'static str>,
    #[prop(into)] timeout_secs: Signal<u32>,
    #[prop(into)] on_timeout: Callback<()>,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    view! {
        <header class="kiosk-header">
            <div class="kiosk-title">
                <h1>{title}</h1>
                {subtitle.map(|text| view! { <p class="kiosk-subtitle">{text}</p> })}
            </div>
            <div class="kiosk-header-actions">
                <IdleTimer timeout_secs=timeout_secs on_timeout=on_timeout />
                {children.map(|children| children())}
            </div>
        </header>
    }
}
