//! # Caller Identity
//!
//! The authenticated bureau member on whose behalf an operation runs. The
//! HTTP layer and the CLI construct it; operations only require that one is
//! present and use it to default the article author.

/// Author used when neither the request nor the caller names one.
pub const DEFAULT_AUTHOR: &str = "Bureau";

/// Identity of an authenticated caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Caller {
    pub email: Option<String>,
    pub display_name: Option<String>,
}

impl Caller {
    /// A caller known only by email.
    pub fn with_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            display_name: None,
        }
    }

    /// Display name, falling back to email, then to [`DEFAULT_AUTHOR`].
    pub fn author_name(&self) -> &str {
        [&self.display_name, &self.email]
            .into_iter()
            .filter_map(|v| v.as_deref().map(str::trim))
            .find(|v| !v.is_empty())
            .unwrap_or(DEFAULT_AUTHOR)
    }
}
