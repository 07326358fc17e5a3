//! # Caller Authentication Middleware
//!
//! Bearer tokens carry the bureau member's identity and the shared secret:
//!
//! ```text
//! Bearer {email}:{display_name}:{secret}
//! Bearer {email}:{secret}
//! ```
//!
//! The secret is compared in constant time against `AUTH_TOKEN`. A request
//! whose token is missing or invalid still reaches the handler, but without
//! a caller, so the operation itself answers 401. Without an `AUTH_TOKEN`
//! no request gets a caller, unless `AUTH_DISABLED` opts into local
//! development mode, where every request runs as the anonymous bureau
//! caller.

use axum::extract::Request;
use axum::http::header;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use pjpv_articles::Caller;
use subtle::ConstantTimeEq;

use crate::error::AppError;

/// Auth configuration injected into request extensions.
///
/// Custom `Debug` redacts the token value to prevent credential leakage in logs.
#[derive(Clone)]
pub struct AuthConfig {
    pub token: Option<String>,
    /// Without a token, attach the anonymous caller instead of none.
    pub allow_anonymous: bool,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("allow_anonymous", &self.allow_anonymous)
            .finish()
    }
}

/// Constant-time comparison of secrets.
///
/// When lengths differ, performs a dummy comparison so that timing does not
/// depend on where the mismatch is.
fn constant_time_token_eq(provided: &str, expected: &str) -> bool {
    let provided = provided.as_bytes();
    let expected = expected.as_bytes();
    if provided.len() != expected.len() {
        let _ = expected.ct_eq(expected);
        return false;
    }
    provided.ct_eq(expected).into()
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Parse a bearer token in format `{email}:{display_name}:{secret}` or
/// `{email}:{secret}`. The secret is everything after the last expected
/// separator and may itself contain `:`.
pub fn parse_bearer_token(provided: &str, expected_secret: &str) -> Result<Caller, String> {
    let parts: Vec<&str> = provided.splitn(3, ':').collect();
    let (email, display_name, secret) = match parts.as_slice() {
        [email, secret] => (*email, None, *secret),
        [email, name, secret] => (*email, non_empty(name), *secret),
        _ => {
            return Err(
                "invalid token format, expected {email}:{display_name}:{secret} or {email}:{secret}"
                    .into(),
            )
        }
    };

    if !constant_time_token_eq(secret, expected_secret) {
        return Err("invalid bearer token".into());
    }

    Ok(Caller {
        email: non_empty(email),
        display_name,
    })
}

/// Resolve the caller from the `Authorization` header and store it in the
/// request extensions. Never rejects on its own.
pub async fn auth_middleware(mut request: Request, next: Next) -> Response {
    let (expected_token, allow_anonymous) = request
        .extensions()
        .get::<AuthConfig>()
        .map(|c| (c.token.clone(), c.allow_anonymous))
        .unwrap_or_default();

    let Some(expected) = expected_token else {
        if allow_anonymous {
            request.extensions_mut().insert(Caller::default());
        } else {
            tracing::warn!("AUTH_TOKEN not configured: request has no caller");
        }
        return next.run(request).await;
    };

    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let caller = match auth_header {
        Some(value) => match value.strip_prefix("Bearer ") {
            Some(provided) => match parse_bearer_token(provided.trim(), &expected) {
                Ok(caller) => Some(caller),
                Err(reason) => {
                    tracing::warn!(%reason, "authentication failed: invalid bearer token");
                    None
                }
            },
            None => {
                tracing::warn!("authentication failed: non-Bearer authorization scheme");
                None
            }
        },
        None => {
            tracing::debug!("request without authorization header");
            None
        }
    };

    if let Some(caller) = caller {
        request.extensions_mut().insert(caller);
    }
    next.run(request).await
}

/// The caller resolved by [`auth_middleware`], if any.
///
/// Extraction never fails; handlers pass the inner option on to the
/// article operations, which decide what an absent caller means.
#[derive(Debug, Clone, Default)]
pub struct RequestCaller(pub Option<Caller>);

impl RequestCaller {
    /// The caller, or 401.
    pub fn require(&self) -> Result<&Caller, AppError> {
        self.0
            .as_ref()
            .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_string()))
    }
}

#[axum::async_trait]
impl<S: Send + Sync> axum::extract::FromRequestParts<S> for RequestCaller {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.extensions.get::<Caller>().cloned()))
    }
}
