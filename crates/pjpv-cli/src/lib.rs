//! # pjpv-cli — Operator CLI for the article repository
//!
//! Runs the same operations as the HTTP API directly against the content
//! repository configured by the `GITHUB_*` environment variables. Useful
//! for scripted imports and for repairing drift after a failed publish.
//!
//! ## Subcommands
//!
//! - `pjpv publish` — render and publish an article from an HTML file.
//! - `pjpv delete` — delete an article by slug.
//! - `pjpv reconcile` — report (and optionally repair) page/index drift.
//!
//! ```bash
//! pjpv --author-name "Alice" publish --title "Réunion du 5 mai" --content-file body.html
//! pjpv delete reunion-du-5-mai-3fa2c1
//! pjpv reconcile --apply
//! ```

pub mod delete;
pub mod publish;
pub mod reconcile;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use pjpv_articles::Caller;
use pjpv_content::{ContentRepoConfig, ContentStore, GitHubContentClient};
use serde::Serialize;

/// Identity recorded as the article author when the request names none.
#[derive(Args, Debug, Clone, Default)]
pub struct CallerArgs {
    /// Email of the bureau member running the command.
    #[arg(long, env = "PJPV_AUTHOR_EMAIL", global = true)]
    pub author_email: Option<String>,

    /// Display name of the bureau member running the command.
    #[arg(long, env = "PJPV_AUTHOR_NAME", global = true)]
    pub author_name: Option<String>,
}

impl CallerArgs {
    /// The operator running the CLI is always an authenticated caller.
    pub fn caller(&self) -> Caller {
        Caller {
            email: self.author_email.clone(),
            display_name: self.author_name.clone(),
        }
    }
}

/// Connect to the content repository from the environment.
pub fn connect_store() -> Result<Arc<dyn ContentStore>> {
    let config = ContentRepoConfig::from_env()
        .context("content repository not configured (GITHUB_OWNER, GITHUB_REPO, GITHUB_TOKEN)")?;
    tracing::info!(owner = %config.owner, repo = %config.repo, branch = %config.branch, "using content repository");
    let client = GitHubContentClient::new(config).context("failed to create content repository client")?;
    Ok(Arc::new(client))
}

/// Print `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{rendered}");
    Ok(())
}
