//! Idle Timer Component
//!
//! Shows the inactivity countdown and runs `on_timeout` when it reaches zero.

use leptos::prelude::*;
use leptos_idle::use_idle_watchdog;

#[component]
pub fn IdleTimer(
    #[prop(into)] timeout_secs: Signal<u32>,
    #[prop(into)] on_timeout: Callback<()>,
) -> impl IntoView {
    let watchdog = use_idle_watchdog(timeout_secs, on_timeout);
    let remaining = watchdog.remaining;

    let timer_class = move || {
        if remaining.get() <= 5 {
            "idle-timer urgent"
        } else {
            "idle-timer"
        }
    };

    view! {
        <div class=timer_class>
            {move || format!("Auto logout in {}s", remaining.get())}
        </div>
    }
}
