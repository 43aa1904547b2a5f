//! Login Pages
//!
//! Customer and owner sign-in share one form; they differ in where a
//! successful login lands and whether the role is checked.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::api;
use crate::components::PageFrame;
use crate::context::use_kiosk;
use crate::models::Credentials;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginRole {
    Customer,
    Owner,
}

impl LoginRole {
    fn title(self) -> &'static str {
        match self {
            LoginRole::Customer => "Customer Login",
            LoginRole::Owner => "Owner Login",
        }
    }

    fn landing(self) -> &'static str {
        match self {
            LoginRole::Customer => "/products",
            LoginRole::Owner => "/owner/dashboard",
        }
    }
}

/// `/login`, optionally with `?role=owner`
#[component]
pub fn LoginPage() -> impl IntoView {
    let query = use_query_map();
    let role = move || match query.read().get("role").as_deref() {
        Some("owner") => LoginRole::Owner,
        _ => LoginRole::Customer,
    };

    view! {
        <PageFrame>
            {move || view! { <LoginForm role=role() /> }}
        </PageFrame>
    }
}

#[component]
pub fn OwnerLoginPage() -> impl IntoView {
    view! {
        <PageFrame>
            <LoginForm role=LoginRole::Owner />
        </PageFrame>
    }
}

#[component]
fn LoginForm(role: LoginRole) -> impl IntoView {
    let ctx = use_kiosk();
    let navigate = use_navigate();

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

        let credentials = Credentials {
            email: email.get_untracked().trim().to_string(),
            password: password.get_untracked(),
        };
        let navigate = navigate.clone();
        spawn_local(async move {
            let result = api::login(&ctx.api(), &credentials).await;
            let _ = set_loading.try_set(false);
            match result {
                Ok(user) if role == LoginRole::Owner && !user.is_owner() => {
                    log::warn!("[SESSION] owner login refused for role {:?}", user.role);
                    let _ = set_error.try_set(Some("This account does not have owner access".to_string()));
                }
                Ok(user) => {
                    ctx.with_session(|session| session.set_current_user(&user));
                    log::info!("[SESSION] signed in as {}", user.display_name().unwrap_or("unknown"));
                    navigate(role.landing(), Default::default());
                }
                Err(err) => {
                    log::warn!("[SESSION] login failed: {err}");
                    let _ = set_error.try_set(Some(err.detail()));
                }
            }
        });
    };

    view! {
        <form class="card auth-form" on:submit=on_submit>
            <h1>{role.title()}</h1>
            <label>"Email"</label>
            <input
                type="email"
                autocomplete="username"
                prop:value=move || email.get()
                on:input=move |ev| email.set(event_target_value(&ev))
            />
            <label>"Password"</label>
            <input
                type="password"
                autocomplete="current-password"
                prop:value=move || password.get()
                on:input=move |ev| password.set(event_target_value(&ev))
            />
            {move || error.get().map(|message| view! { <div class="form-error">{message}</div> })}
            <button class="btn-primary btn-block" disabled=move || loading.get()>
                {move || if loading.get() { "Signing in..." } else { "Sign in" }}
            </button>
            <Show when=move || role == LoginRole::Customer>
                <a href="/signup" class="btn-link">"Create account"</a>
            </Show>
        </form>
    }
}
