//! # Application State
//!
//! Shared across handlers via Axum's `State` extractor. Holds no article
//! data: every request reads the content store afresh.

use std::sync::Arc;

use pjpv_content::ContentStore;

/// Application configuration.
///
/// Custom `Debug` redacts the `auth_token` to prevent credential leakage in logs.
#[derive(Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Shared secret expected in bearer tokens.
    /// If `None`, requests carry no caller unless `auth_disabled` is set.
    pub auth_token: Option<String>,
    /// Run requests as the anonymous bureau caller when no `auth_token` is
    /// configured. Local development only.
    pub auth_disabled: bool,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "[REDACTED]"))
            .field("auth_disabled", &self.auth_disabled)
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            auth_token: None,
            auth_disabled: false,
        }
    }
}

impl AppConfig {
    /// Load from `PORT` (default 8080), `AUTH_TOKEN` (optional) and
    /// `AUTH_DISABLED` (`1`/`true`, default off).
    pub fn from_env() -> Self {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable lookup. Unparseable ports fall back
    /// to the default; a blank token counts as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            auth_token: lookup("AUTH_TOKEN").filter(|t| !t.trim().is_empty()),
            auth_disabled: lookup("AUTH_DISABLED")
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        }
    }
}

/// Shared application state.
#[derive(Clone, Default)]
pub struct AppState {
    pub config: AppConfig,
    /// `None` when the content repository is not configured; article
    /// endpoints then answer 503.
    pub store: Option<Arc<dyn ContentStore>>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("store", &self.store.as_ref().map(|s| s.backend_name()))
            .finish()
    }
}

impl AppState {
    /// State with default configuration and no content store.
    pub fn new() -> Self {
        Self::default()
    }

    /// State with the given configuration and optional content store.
    pub fn with_config(config: AppConfig, store: Option<Arc<dyn ContentStore>>) -> Self {
        Self { config, store }
    }
}
