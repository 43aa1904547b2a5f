//! Page Frame Component
//!
//! Header and footer around the public, non-fullscreen pages.

use leptos::prelude::*;

#[component]
pub fn PageFrame(children: Children) -> impl IntoView {
    view! {
        <div class="page-frame">
            <header class="frame-header">
                <a href="/" class="brand">"MIXION"</a>
                <span class="frame-subtitle">"Kiosk demo"</span>
            </header>
            <main class="frame-main">{children()}</main>
            <footer class="frame-footer">"© MIXION"</footer>
        </div>
    }
}
