//! Simulated Payment
//!
//! Walks through processing and dispensing on timers, records the sale and
//! moves on to the "another one?" prompt. A failed sale record is reported
//! but never blocks the customer.

use std::time::Duration;

use gloo_timers::future::sleep;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::api;
use crate::components::KioskHeader;
use crate::context::{use_kiosk, KioskContext};
use crate::models::{PaymentMethod, PaymentStatus, SaleRecord, ToastKind};
use crate::session::{use_logout, use_route_guard, Requirement};

fn ms(value: u32) -> Duration {
    Duration::from_millis(u64::from(value))
}

async fn record(ctx: KioskContext, sale: SaleRecord) {
    match api::record_sale(&ctx.api(), &sale).await {
        Ok(()) => log::info!("[API] sale recorded: {} via {}", sale.recipe_name, sale.payment_method.id()),
        Err(err) => {
            log::error!("[API] recording sale failed: {err}");
            ctx.toast("Could not record the sale", ToastKind::Error);
        }
    }
}

#[component]
pub fn PaymentPage() -> impl IntoView {
    if !use_route_guard(&[Requirement::Customer, Requirement::SelectedItem]) {
        return ().into_any();
    }

    let ctx = use_kiosk();
    let config = ctx.config();
    let processing = ms(config.processing_ms);
    let dispensing = ms(config.dispensing_ms);
    let navigate = use_navigate();
    let logout = use_logout(None);
    let Some(recipe) = ctx.with_session(|session| session.selected_item()) else {
        return ().into_any();
    };

    let (status, set_status) = signal(PaymentStatus::Idle);
    let (selected, set_selected) = signal::<Option<PaymentMethod>>(None);
    let order = StoredValue::new(recipe.clone());

    let pay = move |method: PaymentMethod| {
        if status.get_untracked() != PaymentStatus::Idle {
            return;
        }
        set_selected.set(Some(method));
        set_status.set(PaymentStatus::Processing);

        let customer = ctx.with_session(|session| session.current_user());
        let sale = order.with_value(|recipe| SaleRecord::new(recipe, method, customer.as_ref()));
        let navigate = navigate.clone();
        spawn_local(async move {
            sleep(processing).await;
            if set_status.try_set(PaymentStatus::Dispensing).is_some() {
                // Page is gone
                return;
            }
            sleep(dispensing).await;
            spawn_local(record(ctx, sale));
            if status.try_get_untracked().is_some() {
                navigate("/ask", Default::default());
            }
        });
    };

    view! {
        <div class="kiosk-page">
            <KioskHeader
                title="Payment"
                subtitle="Choose your payment method"
                timeout_secs=config.idle_timeout_secs
                on_timeout=logout
            />
            <main class="kiosk-main centered">
                <div class="card payment-card">
                    {move || match status.get() {
                        PaymentStatus::Idle => {
                            let pay = pay.clone();
                            view! {
                                <div class="order-summary">
                                    <p class="muted">"Order Summary"</p>
                                    <h2>{recipe.recipe_name.clone()}</h2>
                                    <p class="price-large">{recipe.display_price()}</p>
                                </div>
                                <p class="muted">"Select Payment Method"</p>
                                <div class="payment-methods">
                                    {PaymentMethod::ALL
                                        .into_iter()
                                        .map(|method| {
                                            let pay = pay.clone();
                                            let class = move || {
                                                if selected.get() == Some(method) {
                                                    "payment-method selected"
                                                } else {
                                                    "payment-method"
                                                }
                                            };
                                            view! {
                                                <button class=class on:click=move |_| pay(method)>
                                                    <span class="payment-icon">{method.icon()}</span>
                                                    <span>{method.label()}</span>
                                                </button>
                                            }
                                        })
                                        .collect_view()}
                                </div>
                            }
                            .into_any()
                        }
                        busy => view! {
                            <div class="payment-progress">
                                <div class="spinner" />
                                <p>{busy.message()}</p>
                                {move || selected.get().map(|m| view! { <p class="muted">{format!("Paid with {}", m.label())}</p> })}
                            </div>
                        }
                        .into_any(),
                    }}
                </div>
            </main>
        </div>
    }
    .into_any()
}
