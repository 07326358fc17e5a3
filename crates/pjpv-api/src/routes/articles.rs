//! # Article Endpoints
//!
//! | Method | Path                                       | Operation      |
//! |--------|--------------------------------------------|----------------|
//! | POST   | `/api/publish-article`                     | publish        |
//! | POST   | `/.netlify/functions/publish-article`      | publish        |
//! | POST   | `/api/delete-article`                      | delete         |
//! | POST   | `/.netlify/functions/delete-article`       | delete         |
//! | GET    | `/api/articles/reconcile`                  | drift report   |
//! | POST   | `/api/articles/reconcile`                  | drift repair   |
//!
//! The `/.netlify/functions/*` aliases keep the existing admin page working
//! unchanged.
//!
//! Every handler checks the caller before parsing the body, so an
//! unauthenticated request is answered 401 even when its body is malformed.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use pjpv_articles::{
    delete_article, inspect, publish_article, repair, Deletion, PublishRequest, Published,
    ReconcileReport, RepairOptions, RepairOutcome,
};
use pjpv_content::ContentStore;
use serde::{Deserialize, Serialize};

use crate::auth::RequestCaller;
use crate::error::AppError;
use crate::extractors::{extract_json, optional_json};
use crate::state::AppState;

/// Build the article router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/publish-article", post(publish))
        .route("/.netlify/functions/publish-article", post(publish))
        .route("/api/delete-article", post(delete))
        .route("/.netlify/functions/delete-article", post(delete))
        .route(
            "/api/articles/reconcile",
            get(reconcile_report).post(reconcile_apply),
        )
}

/// Extract the content store from AppState or return 503.
fn require_store(state: &AppState) -> Result<Arc<dyn ContentStore>, AppError> {
    state.store.clone().ok_or_else(|| {
        AppError::service_unavailable(
            "content repository not configured. Set GITHUB_OWNER, GITHUB_REPO and GITHUB_TOKEN.",
        )
    })
}

/// Success body: `{"ok": true, ...payload}`.
#[derive(Debug, Serialize)]
pub struct OkBody<T> {
    pub ok: bool,
    #[serde(flatten)]
    pub payload: T,
}

impl<T> OkBody<T> {
    fn new(payload: T) -> Json<Self> {
        Json(Self { ok: true, payload })
    }
}

/// Delete request body.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteRequest {
    #[serde(default)]
    pub slug: String,
}

async fn publish(
    State(state): State<AppState>,
    caller: RequestCaller,
    body: Result<Json<PublishRequest>, JsonRejection>,
) -> Result<Json<OkBody<Published>>, AppError> {
    let caller = caller.require()?;
    let store = require_store(&state)?;
    let request = extract_json(body)?;
    let published = publish_article(store.as_ref(), Some(caller), request).await?;
    Ok(OkBody::new(published))
}

async fn delete(
    State(state): State<AppState>,
    caller: RequestCaller,
    body: Result<Json<DeleteRequest>, JsonRejection>,
) -> Result<Json<OkBody<Deletion>>, AppError> {
    let caller = caller.require()?;
    let store = require_store(&state)?;
    let request = extract_json(body)?;
    let deletion = delete_article(store.as_ref(), Some(caller), &request.slug).await?;
    Ok(OkBody::new(deletion))
}

async fn reconcile_report(
    State(state): State<AppState>,
    caller: RequestCaller,
) -> Result<Json<OkBody<ReconcileReport>>, AppError> {
    let caller = caller.require()?;
    let store = require_store(&state)?;
    let report = inspect(store.as_ref(), Some(caller)).await?;
    Ok(OkBody::new(report))
}

async fn reconcile_apply(
    State(state): State<AppState>,
    caller: RequestCaller,
    body: Bytes,
) -> Result<Json<OkBody<RepairOutcome>>, AppError> {
    let caller = caller.require()?;
    let store = require_store(&state)?;
    let options: RepairOptions = optional_json(&body)?;
    let outcome = repair(store.as_ref(), Some(caller), options).await?;
    Ok(OkBody::new(outcome))
}
