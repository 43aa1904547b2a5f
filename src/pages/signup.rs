//! Customer Registration

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::api;
use crate::components::PageFrame;
use crate::context::use_kiosk;
use crate::models::Registration;

#[component]
pub fn SignupPage() -> impl IntoView {
    let ctx = use_kiosk();
    let navigate = use_navigate();

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }
        set_loading.set(true);
        set_error.set(None);

        let registration = Registration {
            name: name.get_untracked().trim().to_string(),
            email: email.get_untracked().trim().to_string(),
            password: password.get_untracked(),
        };
        let navigate = navigate.clone();
        spawn_local(async move {
            let result = api::register(&ctx.api(), &registration).await;
            let _ = set_loading.try_set(false);
            match result {
                Ok(user) => {
                    ctx.with_session(|session| session.set_current_user(&user));
                    navigate("/products", Default::default());
                }
                Err(err) => {
                    log::warn!("[SESSION] registration failed: {err}");
                    let _ = set_error.try_set(Some(err.detail()));
                }
            }
        });
    };

    view! {
        <PageFrame>
            <form class="card auth-form" on:submit=on_submit>
                <h1>"Create Account"</h1>
                <label>"Full name"</label>
                <input prop:value=move || name.get() on:input=move |ev| name.set(event_target_value(&ev)) />
                <label>"Email"</label>
                <input
                    type="email"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <label>"Password"</label>
                <input
                    type="password"
                    autocomplete="new-password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                {move || error.get().map(|message| view! { <div class="form-error">{message}</div> })}
                <button class="btn-primary btn-block" disabled=move || loading.get()>
                    {move || if loading.get() { "Creating..." } else { "Create account" }}
                </button>
                <a href="/login" class="btn-link">"Already have an account? Sign in"</a>
            </form>
        </PageFrame>
    }
}
