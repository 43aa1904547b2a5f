//! Sales Details
//!
//! Full sales history with recipe, machine and customer filters.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use super::{local_date_time, machine_label};
use crate::api;
use crate::components::KioskHeader;
use crate::context::{use_kiosk, KioskContext};
use crate::models::{SalesFilter, SalesSummary, ToastKind};
use crate::session::{use_logout, use_route_guard, Requirement};
use crate::store::KioskStateStoreFields;
use crate::undo::reload_recipes;

async fn load_sales(ctx: KioskContext) {
    let client = ctx.api();
    match api::list_daily_counts(&client).await {
        Ok(counts) => ctx.store.daily_counts().set(counts),
        Err(err) => {
            log::error!("[API] could not load sales: {err}");
            ctx.toast("Unable to load sales", ToastKind::Error);
        }
    }
    reload_recipes(ctx).await;
    match api::list_machines(&client).await {
        Ok(machines) => ctx.store.machines().set(machines),
        Err(err) => log::warn!("[API] could not load machines: {err}"),
    }
}

#[component]
pub fn SalesDetailsPage() -> impl IntoView {
    if !use_route_guard(&[Requirement::Owner]) {
        return ().into_any();
    }

    let ctx = use_kiosk();
    let navigate = use_navigate();
    let logout = use_logout(None);

    let daily_counts = ctx.store.daily_counts();
    let recipes = ctx.store.recipes();
    let machines = ctx.store.machines();
    let (loading, set_loading) = signal(true);
    let filter = RwSignal::new(SalesFilter::default());

    spawn_local(async move {
        load_sales(ctx).await;
        let _ = set_loading.try_set(false);
    });

    let filtered = Memo::new(move |_| {
        filter.with(|filter| daily_counts.with(|counts| filter.apply(counts).into_iter().cloned().collect::<Vec<_>>()))
    });
    let summary = Memo::new(move |_| filtered.with(|sales| SalesSummary::of(sales)));

    view! {
        <div class="owner-page">
            <KioskHeader
                title="Sales Details"
                subtitle="All sales transactions with filters"
                timeout_secs=ctx.config().idle_timeout_secs
                on_timeout=logout
            >
                <button class="btn-secondary" on:click=move |_| navigate("/owner/dashboard", Default::default())>
                    "Back"
                </button>
            </KioskHeader>

            <main class="owner-main single">
                <div class="card sales-filters">
                    <select on:change=move |ev| filter.update(|f| f.recipe = event_target_value(&ev))>
                        <option value="">"All recipes"</option>
                        {move || recipes.get().into_iter().map(|r| {
                            let value = r.recipe_name.clone();
                            view! { <option value=value>{r.recipe_name}</option> }
                        }).collect_view()}
                    </select>
                    <select on:change=move |ev| filter.update(|f| f.machine = event_target_value(&ev))>
                        <option value="">"All machines"</option>
                        {move || machines.get().into_iter().map(|m| {
                            let label = m.display_name().to_string();
                            view! { <option value=m.machine_id>{label}</option> }
                        }).collect_view()}
                    </select>
                    <input
                        placeholder="Customer"
                        prop:value=move || filter.with(|f| f.customer.clone())
                        on:input=move |ev| filter.update(|f| f.customer = event_target_value(&ev))
                    />
                    <span class="muted">
                        {move || {
                            let SalesSummary { count, revenue } = summary.get();
                            format!("{count} sales, ₹{revenue:.2}")
                        }}
                    </span>
                </div>

                <table class="sales-table">
                    <thead>
                        <tr>
                            <th>"Time"</th>
                            <th>"Recipe"</th>
                            <th>"Customer"</th>
                            <th>"Machine"</th>
                            <th>"Amount"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            if loading.get() {
                                return view! { <tr><td colspan="5">"Loading..."</td></tr> }.into_any();
                            }
                            let sales = filtered.get();
                            if sales.is_empty() {
                                return view! { <tr><td colspan="5">"No sales match these filters"</td></tr> }.into_any();
                            }
                            sales
                                .into_iter()
                                .map(|sale| view! {
                                    <tr>
                                        <td>{local_date_time(&sale.timestamp)}</td>
                                        <td>{sale.recipe.clone().unwrap_or_else(|| "-".to_string())}</td>
                                        <td>{sale.customer.clone().unwrap_or_else(|| "-".to_string())}</td>
                                        <td>{machine_label(&sale)}</td>
                                        <td>{format!("₹{}", sale.amount)}</td>
                                    </tr>
                                })
                                .collect_view()
                                .into_any()
                        }}
                    </tbody>
                </table>
            </main>
        </div>
    }
    .into_any()
}
