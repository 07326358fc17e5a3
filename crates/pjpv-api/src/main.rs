//! # pjpv-api — Binary Entry Point
//!
//! Starts the Axum HTTP server. Binds to `PORT` (default 8080).

use std::sync::Arc;

use pjpv_api::state::{AppConfig, AppState};
use pjpv_content::{ContentRepoConfig, ContentStore, GitHubContentClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();
    match (&config.auth_token, config.auth_disabled) {
        (Some(_), true) => {
            tracing::warn!("AUTH_DISABLED ignored: AUTH_TOKEN is set, bearer tokens are required");
        }
        (Some(_), false) => {}
        (None, true) => {
            tracing::warn!("AUTH_DISABLED set: every request runs as Bureau, do not expose this server");
        }
        (None, false) => {
            tracing::warn!("AUTH_TOKEN not set: article endpoints answer 401 (set AUTH_DISABLED=1 for local development)");
        }
    }

    let store: Option<Arc<dyn ContentStore>> = match ContentRepoConfig::from_env() {
        Ok(repo_config) => {
            tracing::info!(
                owner = %repo_config.owner,
                repo = %repo_config.repo,
                branch = %repo_config.branch,
                "content repository configured"
            );
            match GitHubContentClient::new(repo_config) {
                Ok(client) => Some(Arc::new(client) as Arc<dyn ContentStore>),
                Err(e) => {
                    tracing::error!("Failed to create content repository client: {e}");
                    return Err(e.into());
                }
            }
        }
        Err(e) => {
            tracing::warn!("Content repository not configured: {e}. Article endpoints will return 503.");
            None
        }
    };

    let port = config.port;
    let app = pjpv_api::app(AppState::with_config(config, store));

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("pjpv API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
