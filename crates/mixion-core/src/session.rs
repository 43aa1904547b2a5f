//! Session Store
//!
//! Current user, selected drink and auth token, kept in two storage areas:
//! a persistent one (survives reloads) and a tab-scoped one.
//!
//! Every read is tolerant: missing, malformed and unreadable entries all come
//! back as `None`. Storage failures are logged and swallowed.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StorageError;
use crate::models::{Recipe, SessionUser};

pub const CURRENT_USER_KEY: &str = "current_customer";
pub const SELECTED_ITEM_KEY: &str = "selected_recipe";
pub const AUTH_TOKEN_KEY: &str = "api_token";

/// A string key/value storage area (browser local/session storage, memory).
pub trait StorageArea {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory storage area. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl StorageArea for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// Where and how to go after logout.
///
/// With a `navigate` callback the destination is handed to it; without one
/// the caller decides how to follow the returned destination.
#[derive(Default)]
pub struct LogoutOptions {
    destination: Option<String>,
    navigate: Option<Box<dyn FnOnce(&str)>>,
}

impl LogoutOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Go to `destination` instead of the landing route.
    pub fn to(destination: impl Into<String>) -> Self {
        Self::new().destination(destination)
    }

    pub fn destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    pub fn navigate_with(mut self, navigate: impl FnOnce(&str) + 'static) -> Self {
        self.navigate = Some(Box::new(navigate));
        self
    }
}

impl fmt::Debug for LogoutOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogoutOptions")
            .field("destination", &self.destination)
            .field("navigate", &self.navigate.is_some())
            .finish()
    }
}

/// Session state over a persistent and a tab-scoped storage area.
#[derive(Debug, Clone)]
pub struct SessionStore<L, S> {
    persistent: L,
    tab: S,
    landing_route: String,
}

impl<L: StorageArea, S: StorageArea> SessionStore<L, S> {
    pub fn new(persistent: L, tab: S, landing_route: impl Into<String>) -> Self {
        Self {
            persistent,
            tab,
            landing_route: landing_route.into(),
        }
    }

    pub fn landing_route(&self) -> &str {
        &self.landing_route
    }

    // ========================
    // Current User
    // ========================

    pub fn current_user(&self) -> Option<SessionUser> {
        read_json(&self.persistent, CURRENT_USER_KEY)
    }

    /// Persist the logged-in user. A token carried by the user is cached too.
    pub fn set_current_user(&self, user: &SessionUser) {
        write_json(&self.persistent, CURRENT_USER_KEY, user);
        if let Some(token) = user.token.as_deref() {
            self.set_auth_token(token);
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.current_user().is_some()
    }

    pub fn is_owner(&self) -> bool {
        self.current_user().is_some_and(|u| u.is_owner())
    }

    // ========================
    // Selected Item
    // ========================

    pub fn selected_item(&self) -> Option<Recipe> {
        read_json(&self.tab, SELECTED_ITEM_KEY)
    }

    pub fn set_selected_item(&self, item: &Recipe) {
        write_json(&self.tab, SELECTED_ITEM_KEY, item);
    }

    // ========================
    // Auth Token
    // ========================

    pub fn auth_token(&self) -> Option<String> {
        match self.persistent.get_item(AUTH_TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.trim().is_empty()),
            Err(err) => {
                log::debug!("[SESSION] reading {AUTH_TOKEN_KEY} failed: {err}");
                None
            }
        }
    }

    pub fn set_auth_token(&self, token: &str) {
        if let Err(err) = self.persistent.set_item(AUTH_TOKEN_KEY, token) {
            log::debug!("[SESSION] writing {AUTH_TOKEN_KEY} failed: {err}");
        }
    }

    // ========================
    // Logout
    // ========================

    /// Clear the whole session, then navigate.
    ///
    /// Every key removal is attempted even if an earlier one fails, and all
    /// of them happen before navigation. Returns the destination.
    pub fn logout(&self, options: LogoutOptions) -> String {
        remove_logged(&self.persistent, CURRENT_USER_KEY);
        remove_logged(&self.persistent, AUTH_TOKEN_KEY);
        remove_logged(&self.tab, SELECTED_ITEM_KEY);

        let destination = options
            .destination
            .unwrap_or_else(|| self.landing_route.clone());
        log::info!("[SESSION] logged out, going to {destination}");
        if let Some(navigate) = options.navigate {
            navigate(&destination);
        }
        destination
    }
}

fn read_json<T: DeserializeOwned>(area: &impl StorageArea, key: &str) -> Option<T> {
    let raw = match area.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(err) => {
            log::debug!("[SESSION] reading {key} failed: {err}");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            log::debug!("[SESSION] ignoring malformed {key}: {err}");
            None
        }
    }
}

fn write_json<T: Serialize>(area: &impl StorageArea, key: &str, value: &T) {
    let raw = match serde_json::to_string(value) {
        Ok(raw) => raw,
        Err(err) => {
            log::debug!("[SESSION] encoding {key} failed: {err}");
            return;
        }
    };
    if let Err(err) = area.set_item(key, &raw) {
        log::debug!("[SESSION] writing {key} failed: {err}");
    }
}

fn remove_logged(area: &impl StorageArea, key: &str) {
    if let Err(err) = area.remove_item(key) {
        log::debug!("[SESSION] removing {key} failed: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::Cell;

    /// Storage area whose every operation fails.
    struct BrokenStorage;

    impl StorageArea for BrokenStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable)
        }
        fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::QuotaExceeded)
        }
        fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable)
        }
    }

    /// Memory storage that refuses to delete one key.
    struct StickyStorage {
        inner: MemoryStorage,
        sticky: &'static str,
    }

    impl StorageArea for StickyStorage {
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get_item(key)
        }
        fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.inner.set_item(key, value)
        }
        fn remove_item(&self, key: &str) -> Result<(), StorageError> {
            if key == self.sticky {
                return Err(StorageError::Backend("locked".into()));
            }
            self.inner.remove_item(key)
        }
    }

    fn memory_store() -> (SessionStore<MemoryStorage, MemoryStorage>, MemoryStorage, MemoryStorage) {
        let local = MemoryStorage::new();
        let tab = MemoryStorage::new();
        (SessionStore::new(local.clone(), tab.clone(), "/"), local, tab)
    }

    fn mojito() -> Recipe {
        serde_json::from_value(json!({"recipe_name": "Mojito", "price": 180})).unwrap()
    }

    #[test]
    fn empty_storage_has_no_session() {
        let (store, _, _) = memory_store();
        assert_eq!(store.current_user(), None);
        assert_eq!(store.selected_item(), None);
        assert_eq!(store.auth_token(), None);
        assert!(!store.is_logged_in());
    }

    #[test]
    fn malformed_entries_read_as_absent() {
        let (store, local, tab) = memory_store();
        local.set_item(CURRENT_USER_KEY, "{not json").unwrap();
        tab.set_item(SELECTED_ITEM_KEY, "[1,2,3]").unwrap();

        assert_eq!(store.current_user(), None);
        assert_eq!(store.selected_item(), None);
    }

    #[test]
    fn selected_item_round_trips_until_overwritten() {
        let (store, _, _) = memory_store();
        let item = mojito();
        store.set_selected_item(&item);

        assert_eq!(store.selected_item(), Some(item.clone()));
        assert_eq!(store.selected_item(), Some(item));

        let citrus = Recipe::new("Citrus", 150.0);
        store.set_selected_item(&citrus);
        assert_eq!(store.selected_item(), Some(citrus));
    }

    #[test]
    fn user_token_is_cached_on_login() {
        let (store, _, _) = memory_store();
        let user: SessionUser =
            serde_json::from_value(json!({"role": "owner", "name": "Ravi", "token": "abc123"})).unwrap();
        store.set_current_user(&user);

        assert_eq!(store.current_user(), Some(user));
        assert_eq!(store.auth_token().as_deref(), Some("abc123"));
        assert!(store.is_owner());
    }

    #[test]
    fn logout_clears_every_slot_and_navigates() {
        let (store, local, tab) = memory_store();
        store.set_current_user(&SessionUser { token: Some("t".into()), ..Default::default() });
        store.set_selected_item(&mojito());

        let visited = Rc::new(RefCell::new(None));
        let v = visited.clone();
        let destination = store.logout(LogoutOptions::new().navigate_with(move |path| {
            *v.borrow_mut() = Some(path.to_string());
        }));

        assert_eq!(destination, "/");
        assert_eq!(visited.borrow().as_deref(), Some("/"));
        assert!(local.is_empty());
        assert!(tab.is_empty());
        assert_eq!(store.current_user(), None);
        assert_eq!(store.selected_item(), None);
    }

    #[test]
    fn logout_honours_declared_destination() {
        let (store, _, _) = memory_store();
        let calls = Rc::new(Cell::new(0));
        let c = calls.clone();
        let destination = store.logout(
            LogoutOptions::to("/owner-login").navigate_with(move |path| {
                assert_eq!(path, "/owner-login");
                c.set(c.get() + 1);
            }),
        );
        assert_eq!(destination, "/owner-login");
        assert_eq!(calls.get(), 1);

        assert_eq!(store.logout(LogoutOptions::new()), "/");
    }

    #[test]
    fn logout_clears_the_rest_when_one_removal_fails() {
        let local = StickyStorage { inner: MemoryStorage::new(), sticky: AUTH_TOKEN_KEY };
        let tab = MemoryStorage::new();
        let store = SessionStore::new(local, tab.clone(), "/");
        store.set_current_user(&SessionUser { token: Some("t".into()), ..Default::default() });
        store.set_selected_item(&mojito());

        store.logout(LogoutOptions::new());

        assert_eq!(store.current_user(), None);
        assert_eq!(store.selected_item(), None);
        assert!(tab.is_empty());
    }

    #[test]
    fn broken_storage_degrades_to_no_session() {
        let store = SessionStore::new(BrokenStorage, BrokenStorage, "/");
        store.set_current_user(&SessionUser::default());
        store.set_selected_item(&mojito());

        assert_eq!(store.current_user(), None);
        assert_eq!(store.selected_item(), None);
        assert_eq!(store.logout(LogoutOptions::new()), "/");
        assert_eq!(store.current_user(), None);
        assert_eq!(store.selected_item(), None);
    }
}
