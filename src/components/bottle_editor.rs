//! Bottle Editor Component
//!
//! Assigns a liquid to each machine slot. Only slots that changed are sent.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ApiError};
use crate::context::{use_kiosk, KioskContext};
use crate::models::{changed_bottles, Bottle, ToastKind, BOTTLE_SLOTS};
use crate::store::KioskStateStoreFields;

/// One entry per slot, filled from the known bottles.
fn full_rack(known: &[Bottle]) -> Vec<Bottle> {
    (1..=BOTTLE_SLOTS as u32)
        .map(|n| {
            known
                .iter()
                .find(|b| b.bottle_number == n)
                .cloned()
                .unwrap_or(Bottle {
                    bottle_number: n,
                    liquid_name: String::new(),
                })
        })
        .collect()
}

async fn save_changes(ctx: KioskContext, before: Vec<Bottle>, after: Vec<Bottle>) -> Result<usize, ApiError> {
    let client = ctx.api();
    let changed = changed_bottles(&before, &after);
    for bottle in &changed {
        let exists = before.iter().any(|b| b.bottle_number == bottle.bottle_number);
        if exists {
            api::assign_liquid(&client, bottle.bottle_number, &bottle.liquid_name).await?;
        } else if !bottle.liquid_name.trim().is_empty() {
            api::create_bottle(&client, bottle).await?;
        }
    }
    Ok(changed.len())
}

#[component]
pub fn BottleEditor(#[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let ctx = use_kiosk();
    let before = ctx.store.bottles().get_untracked();
    let rack = RwSignal::new(full_rack(&before));
    let before = StoredValue::new(before);
    let (saving, set_saving) = signal(false);

    let save = move |_| {
        if saving.get_untracked() {
            return;
        }
        set_saving.set(true);
        let after: Vec<Bottle> = rack
            .get_untracked()
            .into_iter()
            .map(|mut b| {
                b.liquid_name = b.liquid_name.trim().to_string();
                b
            })
            .collect();
        let before = before.get_value();

        spawn_local(async move {
            match save_changes(ctx, before, after).await {
                Ok(count) => {
                    log::info!("[API] {count} bottle slot(s) updated");
                    match api::list_bottles(&ctx.api()).await {
                        Ok(bottles) => ctx.store.bottles().set(bottles),
                        Err(err) => log::warn!("[API] reloading bottles failed: {err}"),
                    }
                    ctx.toast("Bottles updated successfully", ToastKind::Success);
                    on_close.run(());
                }
                Err(err) => {
                    log::error!("[API] updating bottles failed: {err}");
                    ctx.toast("Failed to update bottles", ToastKind::Error);
                    let _ = set_saving.try_set(false);
                }
            }
        });
    };

    view! {
        <div class="modal-backdrop" on:click=move |_| on_close.run(())>
            <div class="modal bottle-editor" on:click=|ev| ev.stop_propagation()>
                <h2>"Bottle Slots"</h2>
                <div class="bottle-grid">
                    {(0..BOTTLE_SLOTS).map(|index| view! {
                        <label class="bottle-slot">
                            <span>{format!("Bottle {}", index + 1)}</span>
                            <input
                                placeholder="Liquid name"
                                prop:value=move || rack.with(|r| r[index].liquid_name.clone())
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    rack.update(|r| r[index].liquid_name = value);
                                }
                            />
                        </label>
                    }).collect_view()}
                </div>
                <div class="modal-actions">
                    <button class="btn-secondary" on:click=move |_| on_close.run(())>"Cancel"</button>
                    <button class="btn-primary" on:click=save disabled=move || saving.get()>
                        {move || if saving.get() { "Saving..." } else { "Save Bottles" }}
                    </button>
                </div>
            </div>
        </div>
    }
}
