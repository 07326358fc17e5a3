//! # pjpv-api — HTTP surface for article publishing
//!
//! Thin Axum layer over [`pjpv_articles`]: resolves the caller from the
//! bearer token, hands the request to the operation, and maps the outcome
//! to a JSON response.
//!
//! ## API Surface
//!
//! | Prefix                   | Module               | Auth     |
//! |--------------------------|----------------------|----------|
//! | `/api/*`                 | [`routes::articles`] | caller   |
//! | `/.netlify/functions/*`  | [`routes::articles`] | caller   |
//! | `/health/*`              | this module          | none     |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → AuthMiddleware → Handler
//! ```

pub mod auth;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::routing::get;
use axum::Router;

use crate::auth::AuthConfig;
use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
///
/// Health probes (`/health/*`) are mounted outside the auth middleware
/// so they remain accessible without credentials.
pub fn app(state: AppState) -> Router {
    let auth_config = AuthConfig {
        token: state.config.auth_token.clone(),
        allow_anonymous: state.config.auth_disabled,
    };

    let api = Router::new()
        .merge(routes::articles::router())
        .layer(from_fn(auth::auth_middleware))
        .layer(middleware::tracing_layer::layer())
        .layer(axum::Extension(auth_config))
        .with_state(state.clone());

    let health = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
        .with_state(state);

    Router::new().merge(health).merge(api)
}

/// Liveness probe: 200 while the process runs.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe: 200 once a content store is configured, 503 otherwise.
async fn readiness(State(state): State<AppState>) -> (StatusCode, &'static str) {
    match state.store {
        Some(_) => (StatusCode::OK, "ready"),
        None => (StatusCode::SERVICE_UNAVAILABLE, "content store not configured"),
    }
}
