//! Browser Session
//!
//! `localStorage`/`sessionStorage` backends for the core session store plus
//! the hooks pages use to guard routes and log out.

use gloo_storage::errors::StorageError as GlooStorageError;
use gloo_storage::{LocalStorage, SessionStorage, Storage};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;
use mixion_core::{LogoutOptions, SessionStore, StorageArea, StorageError};
use serde_json::Value;

use crate::context::use_kiosk;

/// Which Web Storage area to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserStorage {
    Local,
    Session,
}

pub type BrowserSession = SessionStore<BrowserStorage, BrowserStorage>;

impl BrowserStorage {
    /// gloo panics when the area is missing, so look before touching it.
    fn ensure_available(self) -> Result<(), StorageError> {
        let window = web_sys::window().ok_or(StorageError::Unavailable)?;
        let area = match self {
            BrowserStorage::Local => window.local_storage(),
            BrowserStorage::Session => window.session_storage(),
        };
        match area {
            Ok(Some(_)) => Ok(()),
            _ => Err(StorageError::Unavailable),
        }
    }

    fn get<S: Storage>(key: &str) -> Result<Option<String>, StorageError> {
        match S::get::<Value>(key) {
            Ok(Value::String(raw)) => Ok(Some(raw)),
            Ok(value) => Ok(Some(value.to_string())),
            Err(GlooStorageError::KeyNotFound(_)) => Ok(None),
            Err(err) => Err(StorageError::Backend(err.to_string())),
        }
    }

    /// JSON text is stored as-is; anything else (tokens) as a JSON string.
    fn set<S: Storage>(key: &str, value: &str) -> Result<(), StorageError> {
        let stored = serde_json::from_str::<Value>(value).unwrap_or_else(|_| Value::String(value.to_string()));
        S::set(key, stored).map_err(|err| match err {
            // Browsers only throw from setItem when the quota is exhausted
            GlooStorageError::JsError(_) => StorageError::QuotaExceeded,
            other => StorageError::Backend(other.to_string()),
        })
    }
}

impl StorageArea for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.ensure_available()?;
        match self {
            BrowserStorage::Local => Self::get::<LocalStorage>(key),
            BrowserStorage::Session => Self::get::<SessionStorage>(key),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.ensure_available()?;
        match self {
            BrowserStorage::Local => Self::set::<LocalStorage>(key, value),
            BrowserStorage::Session => Self::set::<SessionStorage>(key, value),
        }
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.ensure_available()?;
        match self {
            BrowserStorage::Local => LocalStorage::delete(key),
            BrowserStorage::Session => SessionStorage::delete(key),
        }
        Ok(())
    }
}

pub fn browser_session(landing_route: &str) -> BrowserSession {
    SessionStore::new(BrowserStorage::Local, BrowserStorage::Session, landing_route)
}

// ========================
// Hooks
// ========================

/// Callback that clears the session and routes to `destination`, or to the
/// session's landing route when `None`.
pub fn use_logout(destination: Option<String>) -> Callback<()> {
    let ctx = use_kiosk();
    let navigate = use_navigate();
    Callback::new(move |_| {
        let navigate = navigate.clone();
        let options = LogoutOptions::new()
            .navigate_with(move |path| navigate(path, NavigateOptions::default()));
        let options = match destination.clone() {
            Some(destination) => options.destination(destination),
            None => options,
        };
        let landed = ctx.with_session(|session| session.logout(options));
        log::info!("[SESSION] logged out to {landed}");
    })
}

/// What a page needs before it can render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Any logged-in user
    Customer,
    /// A user whose role is owner or admin
    Owner,
    /// A drink picked on the product page
    SelectedItem,
}

impl Requirement {
    fn redirect(self) -> &'static str {
        match self {
            Requirement::Customer => "/login",
            Requirement::Owner => "/owner-login",
            Requirement::SelectedItem => "/products",
        }
    }
}

/// Redirect away unless every requirement holds. Returns whether the page
/// may render.
pub fn use_route_guard(requirements: &'static [Requirement]) -> bool {
    let ctx = use_kiosk();
    let navigate = use_navigate();

    let missing = ctx.with_session(|session| {
        requirements.iter().copied().find(|req| match req {
            Requirement::Customer => !session.is_logged_in(),
            Requirement::Owner => !session.is_owner(),
            Requirement::SelectedItem => session.selected_item().is_none(),
        })
    });

    match missing {
        Some(req) => {
            log::info!("[SESSION] {req:?} missing, redirecting to {}", req.redirect());
            Effect::new(move |_| navigate(req.redirect(), NavigateOptions::default()));
            false
        }
        None => true,
    }
}
