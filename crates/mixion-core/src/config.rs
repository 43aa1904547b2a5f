//! Kiosk Configuration
//!
//! Timing constants and routes shared by every page.

use std::time::Duration;

/// Backend used when nothing is configured at build time.
pub const DEFAULT_API_BASE: &str = "http://localhost:8000/api";

/// Kiosk-wide settings, provided once at the app root.
#[derive(Debug, Clone, PartialEq)]
pub struct KioskConfig {
    /// Base URL of the backend API, without trailing slash
    pub api_base: String,
    /// Idle logout for customer pages and the owner dashboard
    pub idle_timeout_secs: u32,
    /// Idle logout for the ingredients page
    pub owner_idle_timeout_secs: u32,
    /// Delay between an optimistic delete and the real DELETE
    pub delete_grace_secs: u32,
    /// How long the undo affordance stays on screen
    pub undo_display_secs: u32,
    /// Product browser refresh period
    pub menu_refresh_secs: u32,
    /// Where customers land after logout
    pub landing_route: String,
    /// Where owners land after logout from owner tooling
    pub owner_landing_route: String,
    /// Simulated payment processing time
    pub processing_ms: u32,
    /// Simulated dispensing time
    pub dispensing_ms: u32,
    /// Auto-dismiss for info and success toasts
    pub toast_ms: u32,
    /// Auto-dismiss for error toasts
    pub error_toast_ms: u32,
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            idle_timeout_secs: 15,
            owner_idle_timeout_secs: 30,
            delete_grace_secs: 5,
            undo_display_secs: 5,
            menu_refresh_secs: 10,
            landing_route: "/".to_string(),
            owner_landing_route: "/owner-login".to_string(),
            processing_ms: 1200,
            dispensing_ms: 2000,
            toast_ms: 4000,
            error_toast_ms: 5000,
        }
    }
}

impl KioskConfig {
    /// Build the config, overriding the API base when one is given.
    ///
    /// Blank values are ignored so an empty build variable falls back to the default.
    pub fn with_api_base(api_base: Option<&str>) -> Self {
        let mut config = Self::default();
        if let Some(base) = api_base.map(str::trim).filter(|b| !b.is_empty()) {
            config.api_base = base.trim_end_matches('/').to_string();
        }
        config
    }

    /// Config for the running build, reading `MIXION_API_BASE` at compile time.
    pub fn from_build_env() -> Self {
        Self::with_api_base(option_env!("MIXION_API_BASE"))
    }

    /// Join a resource path onto the API base.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }

    pub fn delete_grace(&self) -> Duration {
        Duration::from_secs(u64::from(self.delete_grace_secs))
    }

    pub fn undo_display(&self) -> Duration {
        Duration::from_secs(u64::from(self.undo_display_secs))
    }

    pub fn menu_refresh(&self) -> Duration {
        Duration::from_secs(u64::from(self.menu_refresh_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_kiosk_timings() {
        let config = KioskConfig::default();
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.idle_timeout_secs, 15);
        assert_eq!(config.delete_grace(), Duration::from_secs(5));
        assert_eq!(config.landing_route, "/");
        assert_eq!(config.owner_landing_route, "/owner-login");
    }

    #[test]
    fn api_base_override_trims_trailing_slash() {
        let config = KioskConfig::with_api_base(Some("https://kiosk.example/api/"));
        assert_eq!(config.api_base, "https://kiosk.example/api");
        assert_eq!(config.endpoint("/recipes/"), "https://kiosk.example/api/recipes/");
    }

    #[test]
    fn blank_api_base_keeps_default() {
        let config = KioskConfig::with_api_base(Some("   "));
        assert_eq!(config.api_base, DEFAULT_API_BASE);
    }
}
