//! Recipe Delete With Undo
//!
//! The recipe leaves the list at once, an Undo toast is shown, and the
//! DELETE goes out only after the grace period. Every decision is made by
//! the [`DeletionQueue`](mixion_core::DeletionQueue) held in the context so
//! undo and commit can never both win.

use gloo_timers::future::sleep;
use leptos::task::spawn_local;
use mixion_core::{CommitOutcome, FailureOutcome, Ticket, UndoOutcome};

use crate::api;
use crate::context::KioskContext;
use crate::models::{Recipe, ToastAction, ToastKind};

/// Optimistically remove `recipe_name` and schedule its DELETE.
pub fn delete_recipe_with_undo(ctx: KioskContext, recipe_name: String) {
    let ticket = ctx
        .with_deletions(|queue, recipes| queue.begin(recipes, &recipe_name))
        .flatten();
    let Some(ticket) = ticket else {
        log::warn!("[DELETE] {recipe_name} is not in the list or already pending");
        return;
    };
    log::info!("[DELETE] {recipe_name} removed locally as {ticket}");

    ctx.toast_with_action("Recipe deleted", ToastKind::Success, ToastAction::UndoDelete(ticket));

    let grace = ctx.config().delete_grace();
    spawn_local(async move {
        sleep(grace).await;
        commit(ctx, ticket).await;
    });
}

/// Handle the Undo button for `ticket`.
pub fn undo_delete(ctx: KioskContext, ticket: Ticket) {
    let outcome = ctx.with_deletions(|queue, recipes| queue.undo(ticket, recipes));
    match outcome {
        Some(UndoOutcome::Restored) => {
            log::info!("[DELETE] {ticket} undone before commit");
            ctx.toast("Delete undone", ToastKind::Info);
        }
        Some(UndoOutcome::Recreate(recipe)) => {
            log::info!("[DELETE] {ticket} undone after commit, re-creating");
            spawn_local(recreate(ctx, recipe));
        }
        Some(UndoOutcome::Deferred) => {
            log::info!("[DELETE] {ticket} undo waits for the server");
        }
        Some(UndoOutcome::Ignored) | None => {
            log::debug!("[DELETE] {ticket} undo ignored");
        }
    }
}

async fn commit(ctx: KioskContext, ticket: Ticket) {
    let Some(recipe) = ctx.with_deletions(|queue, _| queue.timer_fired(ticket)).flatten() else {
        log::debug!("[DELETE] {ticket} settled before its timer");
        return;
    };

    match api::delete_recipe(&ctx.api(), &recipe.recipe_name).await {
        Ok(()) => {
            let outcome = ctx.with_deletions(|queue, recipes| queue.commit_succeeded(ticket, recipes));
            match outcome {
                Some(CommitOutcome::Recreate(recipe)) => {
                    log::info!("[DELETE] {ticket} committed after undo, re-creating");
                    recreate(ctx, recipe).await;
                }
                Some(CommitOutcome::Committed) => {
                    log::info!("[DELETE] {ticket} committed");
                }
                Some(CommitOutcome::Ignored) | None => {}
            }
        }
        Err(err) => {
            log::error!("[DELETE] {ticket} failed: {err}");
            let outcome = ctx.with_deletions(|queue, recipes| queue.commit_failed(ticket, recipes));
            match outcome {
                Some(FailureOutcome::RolledBack) => ctx.toast("Server delete failed", ToastKind::Error),
                Some(FailureOutcome::RolledBackQuietly) => ctx.toast("Delete undone", ToastKind::Info),
                Some(FailureOutcome::Ignored) | None => {}
            }
        }
    }
}

/// Compensate a committed delete by posting the recipe again.
async fn recreate(ctx: KioskContext, recipe: Recipe) {
    match api::create_recipe(&ctx.api(), &recipe).await {
        Ok(_) => ctx.toast("Delete undone", ToastKind::Info),
        Err(err) => {
            log::error!("[DELETE] re-create of {} failed: {err}", recipe.recipe_name);
            ctx.toast(format!("Undo failed: {}", err.detail()), ToastKind::Error);
            reload_recipes(ctx).await;
        }
    }
}

/// Replace the recipe list with the server's, keeping pending removals hidden.
pub async fn reload_recipes(ctx: KioskContext) {
    match api::list_recipes(&ctx.api()).await {
        Ok(loaded) => {
            ctx.with_deletions(|queue, recipes| {
                *recipes = loaded
                    .into_iter()
                    .filter(|r| !queue.is_pending(&r.recipe_name))
                    .collect();
            });
        }
        Err(err) => {
            log::error!("[API] could not load recipes: {err}");
            ctx.toast("Unable to load recipes", ToastKind::Error);
        }
    }
}
