//! Toast Host Component
//!
//! Renders the toasts held in the kiosk store, bottom-right.

use leptos::prelude::*;

use crate::context::use_kiosk;
use crate::models::{Toast, ToastAction};
use crate::store::{use_kiosk_store, KioskStateStoreFields};
use crate::undo;

#[component]
pub fn ToastHost() -> impl IntoView {
    let ctx = use_kiosk();
    let toasts = use_kiosk_store().toasts();

    view! {
        <div class="toast-host">
            <For
                each=move || toasts.get()
                key=|toast| toast.id
                children=move |toast: Toast| {
                    let id = toast.id;
                    let action = toast.action;
                    view! {
                        <div class=toast.kind.class() role="status">
                            <span class="toast-message">{toast.message}</span>
                            {action.map(|action| view! {
                                <button
                                    class="toast-action"
                                    on:click=move |_| {
                                        match action {
                                            ToastAction::UndoDelete(ticket) => undo::undo_delete(ctx, ticket),
                                        }
                                        ctx.dismiss_toast(id);
                                    }
                                >
                                    {action.label()}
                                </button>
                            })}
                            <button class="toast-close" on:click=move |_| ctx.dismiss_toast(id)>"×"</button>
                        </div>
                    }
                }
            />
        </div>
    }
}
