//! # Reconcile Subcommand
//!
//! Without `--apply`, reports drift and exits 1 when any is found, so the
//! command can gate a CI job. With `--apply`, removes dangling index
//! entries (and orphan pages with `--delete-orphan-pages`) and exits 0.

use anyhow::{bail, Context, Result};
use clap::Args;
use pjpv_articles::{inspect, repair, Caller, RepairOptions};
use pjpv_content::ContentStore;

/// Arguments for the `pjpv reconcile` subcommand.
#[derive(Args, Debug)]
pub struct ReconcileArgs {
    /// Repair the drift instead of only reporting it.
    #[arg(long)]
    pub apply: bool,

    /// Also delete pages that no index entry lists. Requires `--apply`.
    #[arg(long, requires = "apply")]
    pub delete_orphan_pages: bool,
}

/// Execute the reconcile subcommand.
///
/// Returns exit code: 0 when consistent or repaired, 1 when drift was
/// reported but not repaired.
pub async fn run_reconcile(
    args: &ReconcileArgs,
    caller: &Caller,
    store: &dyn ContentStore,
) -> Result<u8> {
    if args.delete_orphan_pages && !args.apply {
        bail!("--delete-orphan-pages requires --apply");
    }

    if !args.apply {
        let report = inspect(store, Some(caller)).await.context("inspection failed")?;
        crate::print_json(&report)?;
        return Ok(if report.is_consistent() { 0 } else { 1 });
    }

    let options = RepairOptions {
        delete_orphan_pages: args.delete_orphan_pages,
    };
    let outcome = repair(store, Some(caller), options).await.context("repair failed")?;
    crate::print_json(&outcome)?;
    Ok(0)
}
