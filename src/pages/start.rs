//! Role Chooser

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::PageFrame;

#[component]
pub fn StartPage() -> impl IntoView {
    let navigate = use_navigate();
    let go = move |path: &'static str| {
        let navigate = navigate.clone();
        move |_: leptos::ev::MouseEvent| navigate(path, Default::default())
    };

    view! {
        <PageFrame>
            <div class="card role-chooser">
                <h1>"Welcome"</h1>
                <p class="muted">"Please choose how you'd like to proceed"</p>
                <button class="btn-primary btn-block" on:click=go("/login?role=customer")>"Customer Login"</button>
                <button class="btn-outline btn-block" on:click=go("/owner-login")>"Owner Login"</button>
                <button class="btn-link" on:click=go("/")>"Back to Home"</button>
            </div>
        </PageFrame>
    }
}
