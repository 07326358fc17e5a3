//! # Delete Subcommand

use anyhow::{Context, Result};
use clap::Args;
use pjpv_articles::{delete_article, Caller};
use pjpv_content::ContentStore;

/// Arguments for the `pjpv delete` subcommand.
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Slug of the article to delete. Normalized before use.
    #[arg(value_name = "SLUG")]
    pub slug: String,
}

/// Execute the delete subcommand. Returns exit code 0 on success, including
/// when nothing was there to delete.
pub async fn run_delete(args: &DeleteArgs, caller: &Caller, store: &dyn ContentStore) -> Result<u8> {
    let deletion = delete_article(store, Some(caller), &args.slug)
        .await
        .with_context(|| format!("delete of '{}' failed", args.slug))?;
    if !deletion.page_removed && !deletion.entry_removed {
        tracing::warn!(slug = %deletion.slug, "nothing to delete");
    }
    crate::print_json(&deletion)?;
    Ok(0)
}
