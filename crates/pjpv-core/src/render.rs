//! # Article Page Rendering
//!
//! Produces the self-contained static page stored at
//! `articles/{slug}/index.html`. Metadata (title, author, URLs, labels) is
//! HTML-escaped; the body is trusted bureau-authored HTML and is inserted
//! verbatim.

use chrono::{DateTime, Datelike, Utc};

use crate::article::Article;

/// Site name appended to page titles.
pub const SITE_NAME: &str = "Parlement JPV";

const MONTHS_FR: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

const STYLE: &str = "\
    body{font-family:system-ui,-apple-system,Segoe UI,Roboto,Inter,Arial; margin:0; background:#fafbfc; color:#0a0e1a;}
    .wrap{max-width:900px;margin:0 auto;padding:32px 16px;}
    header a{color:#0b2545;text-decoration:none;font-weight:700}
    .card{background:#fff;border:1px solid #e2e8f0;border-radius:20px;padding:24px;box-shadow:0 1px 3px rgba(10,14,26,.06)}
    h1{margin:0 0 8px 0;font-size:clamp(1.6rem,3.5vw,2.4rem)}
    .meta{color:#475569;font-size:.95rem}
    article{margin-top:18px;line-height:1.75;font-size:1.05rem}
    article img{max-width:100%}";

/// Escape text for use in HTML content and double-quoted attributes.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Long French date, e.g. `5 mai 2026`.
pub fn format_date_fr(instant: &DateTime<Utc>) -> String {
    let month = MONTHS_FR[instant.month0() as usize];
    format!("{} {} {}", instant.day(), month, instant.year())
}

/// Render the full page document for `article`.
pub fn render_page(article: &Article) -> String {
    let title = escape_html(&article.title);
    let author = escape_html(&article.author);
    let date = format_date_fr(article.published_at.instant());

    let cover = if article.cover_url.is_empty() {
        String::new()
    } else {
        format!(
            r#"<img src="{}" alt="" style="width:100%;border-radius:16px;max-height:420px;object-fit:cover;margin:16px 0;">"#,
            escape_html(&article.cover_url)
        )
    };

    let files = if article.attachments.is_empty() {
        String::new()
    } else {
        let items: String = article
            .attachments
            .iter()
            .map(|a| {
                format!(
                    r#"<li><a href="{}" target="_blank" rel="noopener">{}</a></li>"#,
                    escape_html(&a.url),
                    escape_html(a.display_label())
                )
            })
            .collect();
        format!("<h3>Pièces jointes</h3><ul>{items}</ul>")
    };

    format!(
        r#"<!doctype html>
<html lang="fr">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width,initial-scale=1">
  <title>{title} — {SITE_NAME}</title>
  <meta name="description" content="{description}">
  <link rel="icon" href="/assets/img/favicon.png">
  <style>
{STYLE}
  </style>
</head>
<body>
  <div class="wrap">
    <header><a href="/articles/">← Tous les articles</a></header>
    <div class="card">
      <h1>{title}</h1>
      <div class="meta">Par {author} • {date}</div>
      {cover}
      <article>{body}</article>
      {files}
    </div>
  </div>
</body>
</html>"#,
        description = if article.excerpt.is_empty() {
            title.clone()
        } else {
            escape_html(&article.excerpt)
        },
        body = article.body_html,
    )
}
