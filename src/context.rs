//! Kiosk Context
//!
//! Shared handles provided via Leptos Context API.

use std::time::Duration;

use gloo_timers::future::sleep;
use leptos::prelude::*;
use leptos::task::spawn_local;
use mixion_core::{DeletionQueue, KioskConfig};

use crate::api::ApiClient;
use crate::models::{Recipe, Toast, ToastAction, ToastKind};
use crate::session::{browser_session, BrowserSession};
use crate::store::{store_push_toast, store_take_toast, KioskStateStoreFields, KioskStore};

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct KioskContext {
    config: StoredValue<KioskConfig>,
    session: StoredValue<BrowserSession>,
    /// Recipe deletions waiting for their grace period or server reply
    deletions: StoredValue<DeletionQueue<Recipe>>,
    pub store: KioskStore,
}

impl KioskContext {
    pub fn new(config: KioskConfig, store: KioskStore) -> Self {
        let session = browser_session(&config.landing_route);
        Self {
            config: StoredValue::new(config),
            session: StoredValue::new(session),
            deletions: StoredValue::new(DeletionQueue::new()),
            store,
        }
    }

    pub fn config(&self) -> KioskConfig {
        self.config.get_value()
    }

    pub fn with_session<R>(&self, f: impl FnOnce(&BrowserSession) -> R) -> R {
        self.session.with_value(f)
    }

    /// Run `f` against the deletion queue and the recipe list together.
    pub fn with_deletions<R>(&self, f: impl FnOnce(&mut DeletionQueue<Recipe>, &mut Vec<Recipe>) -> R) -> Option<R> {
        let store = self.store;
        self.deletions.try_update_value(|queue| {
            let recipes = store.recipes();
            let mut guard = recipes.write();
            f(queue, &mut *guard)
        })
    }

    /// Client for the configured backend, carrying the cached token if any
    pub fn api(&self) -> ApiClient {
        let token = self.with_session(|session| session.auth_token());
        ApiClient::new(self.config(), token)
    }

    // ========================
    // Toasts
    // ========================

    pub fn toast(&self, message: impl Into<String>, kind: ToastKind) {
        let ms = self.config.with_value(|config| match kind {
            ToastKind::Error => config.error_toast_ms,
            _ => config.toast_ms,
        });
        self.show_toast(message.into(), kind, None, Duration::from_millis(u64::from(ms)));
    }

    /// Toast with an action button, visible for the undo window
    pub fn toast_with_action(&self, message: impl Into<String>, kind: ToastKind, action: ToastAction) {
        let visible = self.config.with_value(KioskConfig::undo_display);
        self.show_toast(message.into(), kind, Some(action), visible);
    }

    fn show_toast(&self, message: String, kind: ToastKind, action: Option<ToastAction>, visible: Duration) {
        let toast = Toast {
            id: 0,
            message,
            kind,
            action,
        };
        let id = store_push_toast(&self.store, toast);
        let ctx = *self;
        spawn_local(async move {
            sleep(visible).await;
            ctx.dismiss_toast(id);
        });
    }

    /// Remove a toast. Closing an undo toast ends its undo window.
    pub fn dismiss_toast(&self, toast_id: u64) {
        let Some(toast) = store_take_toast(&self.store, toast_id) else {
            return;
        };
        if let Some(ToastAction::UndoDelete(ticket)) = toast.action {
            self.deletions.update_value(|queue| queue.close_undo(ticket));
        }
    }
}

/// Get the kiosk context provided at the app root
pub fn use_kiosk() -> KioskContext {
    expect_context::<KioskContext>()
}
