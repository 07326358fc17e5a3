//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Every failure is answered with a JSON body `{"error": message, "code": code}`.
//!
//! | Source                                   | Status | Code                  |
//! |------------------------------------------|--------|-----------------------|
//! | no caller identity                       | 401    | `UNAUTHORIZED`        |
//! | body not parseable / input schema        | 400    | `BAD_REQUEST`         |
//! | content store refused or unreachable     | 500    | `REMOTE_ERROR`        |
//! | index document unreadable                | 500    | `INTERNAL_ERROR`      |
//! | content store not configured             | 503    | `SERVICE_UNAVAILABLE` |
//!
//! Remote failures name the failing call and its status; the upstream
//! response body is logged, never returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pjpv_articles::ArticleError;
use pjpv_content::ContentError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
    /// Machine-readable code, e.g. `BAD_REQUEST`.
    pub code: String,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or invalid caller identity (401).
    #[error("{0}")]
    Unauthorized(String),

    /// Request body could not be parsed or failed validation (400).
    #[error("{0}")]
    BadRequest(String),

    /// The content store failed or rejected a call (500).
    #[error("{0}")]
    Remote(String),

    /// Internal server error (500).
    #[error("{0}")]
    Internal(String),

    /// The content store is not configured (503).
    #[error("{0}")]
    ServiceUnavailable(String),
}

impl AppError {
    /// Create a `ServiceUnavailable` error.
    pub fn service_unavailable(msg: impl Into<String>) -> Self {
        Self::ServiceUnavailable(msg.into())
    }

    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Remote(_) => (StatusCode::INTERNAL_SERVER_ERROR, "REMOTE_ERROR"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            Self::ServiceUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let body = ErrorBody {
            error: self.to_string(),
            code: code.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Summary of a content store failure that is safe to return to clients.
fn describe_remote(err: &ContentError) -> String {
    match (err.operation(), err.status()) {
        (Some(operation), Some(status)) => format!("{operation} failed with status {status}"),
        (Some(operation), None) => format!("{operation} failed"),
        (None, _) => "content store request failed".to_string(),
    }
}

impl From<ArticleError> for AppError {
    fn from(err: ArticleError) -> Self {
        match err {
            ArticleError::Unauthorized => Self::Unauthorized("Unauthorized".to_string()),
            ArticleError::InvalidInput(e) => Self::BadRequest(e.to_string()),
            ArticleError::Remote(e) => {
                tracing::error!(error = %e, "content store call failed");
                Self::Remote(describe_remote(&e))
            }
            ArticleError::CorruptIndex(e) => {
                tracing::error!(error = %e, "article index could not be parsed");
                Self::Internal("articles/index.json is not a valid index".to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use pjpv_core::ValidationError;

    async fn response_parts(err: AppError) -> (StatusCode, ErrorBody) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        (status, body)
    }

    #[tokio::test]
    async fn unauthorized_maps_to_401() {
        let (status, body) = response_parts(ArticleError::Unauthorized.into()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body.code, "UNAUTHORIZED");
        assert_eq!(body.error, "Unauthorized");
    }

    #[tokio::test]
    async fn validation_maps_to_400_with_field_message() {
        let err = ArticleError::from(ValidationError::MissingField("contentHTML"));
        let (status, body) = response_parts(err.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, "BAD_REQUEST");
        assert_eq!(body.error, "contentHTML required");
    }

    #[tokio::test]
    async fn remote_maps_to_500_without_upstream_body() {
        let err = ArticleError::from(ContentError::Remote {
            operation: "PUT articles/index.json".into(),
            status: 409,
            body: "{\"message\":\"secret upstream detail\"}".into(),
        });
        let (status, body) = response_parts(err.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.code, "REMOTE_ERROR");
        assert_eq!(body.error, "PUT articles/index.json failed with status 409");
        assert!(!body.error.contains("secret"));
    }

    #[tokio::test]
    async fn corrupt_index_maps_to_500() {
        let parse_err = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let (status, body) = response_parts(ArticleError::CorruptIndex(parse_err).into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.code, "INTERNAL_ERROR");
    }

    #[tokio::test]
    async fn service_unavailable_maps_to_503() {
        let (status, body) =
            response_parts(AppError::service_unavailable("content store not configured")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.code, "SERVICE_UNAVAILABLE");
    }

    #[test]
    fn failure_without_operation_has_generic_message() {
        let err = ContentError::Decode {
            path: "articles/index.json".into(),
            reason: "bad base64".into(),
        };
        assert_eq!(describe_remote(&err), "content store request failed");
    }
}
