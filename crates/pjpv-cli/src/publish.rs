//! # Publish Subcommand
//!
//! Reads the article body from an HTML file (or `-` for stdin) and
//! publishes it. Prints `{slug, url}` on success.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use pjpv_articles::{publish_article, Caller, PublishRequest};
use pjpv_content::ContentStore;
use pjpv_core::Attachment;

/// Arguments for the `pjpv publish` subcommand.
#[derive(Args, Debug)]
pub struct PublishArgs {
    /// Article title.
    #[arg(long)]
    pub title: String,

    /// HTML file holding the article body, or `-` to read stdin.
    #[arg(long, value_name = "FILE")]
    pub content_file: PathBuf,

    /// Explicit slug. Re-publishing with the same slug replaces the article.
    #[arg(long)]
    pub slug: Option<String>,

    /// Author shown on the page. Defaults to the caller identity.
    #[arg(long)]
    pub author: Option<String>,

    /// Publication date, RFC 3339 or `YYYY-MM-DD`. Defaults to now.
    #[arg(long)]
    pub date: Option<String>,

    /// Cover image URL.
    #[arg(long)]
    pub cover: Option<String>,

    /// Short teaser shown in the listing.
    #[arg(long)]
    pub excerpt: Option<String>,

    /// Attachment as `URL` or `URL=LABEL`. Repeatable.
    #[arg(long = "attachment", value_name = "URL[=LABEL]")]
    pub attachments: Vec<String>,
}

/// Parse `URL` or `URL=LABEL`.
pub fn parse_attachment(raw: &str) -> Attachment {
    match raw.split_once('=') {
        Some((url, label)) => Attachment {
            url: url.to_string(),
            label: Some(label.to_string()),
        },
        None => Attachment {
            url: raw.to_string(),
            label: None,
        },
    }
}

fn read_body(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut body = String::new();
        std::io::stdin()
            .read_to_string(&mut body)
            .context("failed to read article body from stdin")?;
        return Ok(body);
    }
    if !path.exists() {
        bail!("content file not found: {}", path.display());
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read content file: {}", path.display()))
}

impl PublishArgs {
    /// Build the publish request, reading the body file.
    pub fn to_request(&self) -> Result<PublishRequest> {
        Ok(PublishRequest {
            title: self.title.clone(),
            content_html: read_body(&self.content_file)?,
            cover_url: self.cover.clone(),
            attachments: self.attachments.iter().map(|a| parse_attachment(a)).collect(),
            author: self.author.clone(),
            date_iso: self.date.clone(),
            slug: self.slug.clone(),
            excerpt: self.excerpt.clone(),
        })
    }
}

/// Execute the publish subcommand. Returns exit code 0 on success.
pub async fn run_publish(args: &PublishArgs, caller: &Caller, store: &dyn ContentStore) -> Result<u8> {
    let request = args.to_request()?;
    let published = publish_article(store, Some(caller), request)
        .await
        .context("publish failed")?;
    crate::print_json(&published)?;
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pjpv_content::MemoryStore;

    fn args(content_file: PathBuf) -> PublishArgs {
        PublishArgs {
            title: "Réunion du 5 mai".into(),
            content_file,
            slug: Some("reunion-5-mai".into()),
            author: None,
            date: Some("2026-05-05".into()),
            cover: None,
            excerpt: None,
            attachments: vec!["/docs/odj.pdf=Ordre du jour".into(), "/docs/cr.pdf".into()],
        }
    }

    #[test]
    fn attachment_label_is_optional() {
        assert_eq!(parse_attachment("/a.pdf").label, None);
        let named = parse_attachment("/a.pdf=Annexe A");
        assert_eq!(named.url, "/a.pdf");
        assert_eq!(named.label.as_deref(), Some("Annexe A"));
    }

    #[test]
    fn missing_content_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = args(dir.path().join("absent.html")).to_request().unwrap_err();
        assert!(err.to_string().contains("content file not found"));
    }

    #[tokio::test]
    async fn publishes_file_body() {
        let dir = tempfile::tempdir().unwrap();
        let body = dir.path().join("body.html");
        std::fs::write(&body, "<p>Ordre du jour</p>").unwrap();

        let store = MemoryStore::new();
        let caller = Caller::with_email("alice@example.org");
        let code = run_publish(&args(body), &caller, &store).await.unwrap();
        assert_eq!(code, 0);

        let page = store.contents("articles/reunion-5-mai/index.html").unwrap();
        assert!(page.contains("<p>Ordre du jour</p>"));
        assert!(page.contains("Ordre du jour</a>"));
        assert!(page.contains("Par alice@example.org"));
    }
}
