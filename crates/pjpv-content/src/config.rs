//! Content repository configuration.
//!
//! Identifies the repository and branch that hold the published site, and
//! the credential used to write to it. Loaded from the environment.

use url::Url;

/// Default GitHub REST endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Configuration for connecting to the repository contents API.
///
/// Custom `Debug` implementation redacts the `token` field
/// to prevent credential leakage in log output.
#[derive(Clone)]
pub struct ContentRepoConfig {
    /// Base URL of the REST API.
    pub api_url: Url,
    /// Repository owner (user or organization).
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Branch that reads and writes target.
    pub branch: String,
    /// Access token with contents write permission.
    pub token: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for ContentRepoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentRepoConfig")
            .field("api_url", &self.api_url)
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("branch", &self.branch)
            .field("token", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ContentRepoConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `GITHUB_OWNER` (required)
    /// - `GITHUB_REPO` (required)
    /// - `GITHUB_TOKEN` (required)
    /// - `GITHUB_BRANCH` (default: `main`)
    /// - `GITHUB_API_URL` (default: `https://api.github.com`)
    /// - `GITHUB_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |var: &'static str| {
            lookup(var)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(var))
        };

        let raw_url = lookup("GITHUB_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = Url::parse(&raw_url)
            .map_err(|e| ConfigError::InvalidUrl("GITHUB_API_URL".to_string(), e.to_string()))?;

        Ok(Self {
            api_url,
            owner: required("GITHUB_OWNER")?,
            repo: required("GITHUB_REPO")?,
            token: required("GITHUB_TOKEN")?,
            branch: lookup("GITHUB_BRANCH")
                .filter(|b| !b.trim().is_empty())
                .unwrap_or_else(|| "main".to_string()),
            timeout_secs: lookup("GITHUB_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        })
    }

    /// Create a configuration pointing at a local mock server (for testing).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if `base_url` cannot be parsed.
    pub fn local_mock(base_url: &str, token: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: Url::parse(base_url)
                .map_err(|e| ConfigError::InvalidUrl(base_url.to_string(), e.to_string()))?,
            owner: "parlementjpv".to_string(),
            repo: "site".to_string(),
            branch: "main".to_string(),
            token: token.to_string(),
            timeout_secs: 5,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("access token is not a valid header value")]
    InvalidToken,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_applied_when_optional_vars_absent() {
        let cfg = ContentRepoConfig::from_lookup(lookup(&[
            ("GITHUB_OWNER", "parlementjpv"),
            ("GITHUB_REPO", "site"),
            ("GITHUB_TOKEN", "ghp_x"),
        ]))
        .unwrap();
        assert_eq!(cfg.branch, "main");
        assert_eq!(cfg.timeout_secs, 30);
        assert_eq!(cfg.api_url.as_str(), "https://api.github.com/");
    }

    #[test]
    fn missing_token_is_reported_by_name() {
        let err = ContentRepoConfig::from_lookup(lookup(&[
            ("GITHUB_OWNER", "parlementjpv"),
            ("GITHUB_REPO", "site"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("GITHUB_TOKEN")));
    }

    #[test]
    fn blank_branch_falls_back_to_main() {
        let cfg = ContentRepoConfig::from_lookup(lookup(&[
            ("GITHUB_OWNER", "o"),
            ("GITHUB_REPO", "r"),
            ("GITHUB_TOKEN", "t"),
            ("GITHUB_BRANCH", " "),
        ]))
        .unwrap();
        assert_eq!(cfg.branch, "main");
    }

    #[test]
    fn invalid_api_url_rejected() {
        let err = ContentRepoConfig::from_lookup(lookup(&[
            ("GITHUB_OWNER", "o"),
            ("GITHUB_REPO", "r"),
            ("GITHUB_TOKEN", "t"),
            ("GITHUB_API_URL", "not a url"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl(..)));
    }

    #[test]
    fn debug_redacts_token() {
        let cfg = ContentRepoConfig::local_mock("http://127.0.0.1:9000", "secret-token").unwrap();
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
