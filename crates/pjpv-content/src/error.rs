//! Content repository error types.

/// Errors from content repository calls.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// HTTP transport error.
    #[error("HTTP error calling {operation}: {source}")]
    Http {
        operation: String,
        source: reqwest::Error,
    },
    /// The remote store returned a non-2xx status, including stale-revision
    /// rejections.
    #[error("{operation} failed: {status} {body}")]
    Remote {
        operation: String,
        status: u16,
        body: String,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {operation}: {source}")]
    Deserialization {
        operation: String,
        source: reqwest::Error,
    },
    /// File content could not be decoded as base64 UTF-8 text.
    #[error("could not decode content of {path}: {reason}")]
    Decode { path: String, reason: String },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}

impl ContentError {
    /// Upstream HTTP status, when the remote store answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The remote operation that failed, e.g. `PUT articles/index.json`.
    pub fn operation(&self) -> Option<&str> {
        match self {
            Self::Http { operation, .. }
            | Self::Remote { operation, .. }
            | Self::Deserialization { operation, .. } => Some(operation),
            Self::Decode { .. } | Self::Config(_) => None,
        }
    }
}
