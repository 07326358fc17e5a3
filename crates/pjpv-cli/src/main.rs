//! # pjpv CLI entry point
//!
//! Parses command-line arguments, connects to the content repository and
//! dispatches to subcommand handlers on a single-threaded Tokio runtime.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pjpv_cli::delete::{run_delete, DeleteArgs};
use pjpv_cli::publish::{run_publish, PublishArgs};
use pjpv_cli::reconcile::{run_reconcile, ReconcileArgs};
use pjpv_cli::{connect_store, CallerArgs};

/// Publish and maintain Parlement JPV articles.
///
/// Reads `GITHUB_OWNER`, `GITHUB_REPO`, `GITHUB_TOKEN` (and optionally
/// `GITHUB_BRANCH`, `GITHUB_API_URL`, `GITHUB_TIMEOUT_SECS`) from the
/// environment.
#[derive(Parser, Debug)]
#[command(name = "pjpv", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(flatten)]
    caller: CallerArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render and publish an article.
    Publish(PublishArgs),

    /// Delete an article and its index entry.
    Delete(DeleteArgs),

    /// Report or repair drift between article pages and the index.
    Reconcile(ReconcileArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("failed to start async runtime: {e}");
            return ExitCode::from(2);
        }
    };

    let caller = cli.caller.caller();
    let result = connect_store().and_then(|store| {
        runtime.block_on(async {
            match &cli.command {
                Commands::Publish(args) => run_publish(args, &caller, store.as_ref()).await,
                Commands::Delete(args) => run_delete(args, &caller, store.as_ref()).await,
                Commands::Reconcile(args) => run_reconcile(args, &caller, store.as_ref()).await,
            }
        })
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_publish_with_global_caller_flags() {
        let cli = Cli::try_parse_from([
            "pjpv",
            "-vv",
            "publish",
            "--title",
            "Réunion",
            "--content-file",
            "body.html",
            "--attachment",
            "/a.pdf=A",
            "--author-name",
            "Alice",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.caller.author_name.as_deref(), Some("Alice"));
        match cli.command {
            Commands::Publish(args) => {
                assert_eq!(args.title, "Réunion");
                assert_eq!(args.attachments, vec!["/a.pdf=A".to_string()]);
            }
            other => panic!("expected publish, got {other:?}"),
        }
    }

    #[test]
    fn orphan_deletion_requires_apply() {
        assert!(Cli::try_parse_from(["pjpv", "reconcile", "--delete-orphan-pages"]).is_err());
        assert!(
            Cli::try_parse_from(["pjpv", "reconcile", "--apply", "--delete-orphan-pages"]).is_ok()
        );
    }
}
