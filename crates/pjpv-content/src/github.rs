//! Typed client for the GitHub repository contents API.
//!
//! ## Paths used
//!
//! | Method | Path                                      | Operation          |
//! |--------|-------------------------------------------|--------------------|
//! | GET    | `/repos/{owner}/{repo}/contents/{path}?ref={branch}` | read file / list dir |
//! | PUT    | `/repos/{owner}/{repo}/contents/{path}`   | create or update   |
//! | DELETE | `/repos/{owner}/{repo}/contents/{path}`   | delete             |
//!
//! File bodies travel base64-encoded. Updates and deletes carry the blob
//! `sha` read earlier; GitHub answers 409 or 422 when it is stale or absent.
//! Requests are sent once; there is no retry loop.

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::{ConfigError, ContentRepoConfig};
use crate::error::ContentError;
use crate::store::{ContentStore, DirEntry, RemoteFile, Revision};

const USER_AGENT: &str = concat!("pjpv-content/", env!("CARGO_PKG_VERSION"));
const API_VERSION: &str = "2022-11-28";

// -- Wire types ---------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct FileResponse {
    sha: String,
    #[serde(default)]
    content: String,
}

#[derive(Debug, Serialize)]
struct PutRequest<'a> {
    message: &'a str,
    content: String,
    branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct PutResponse {
    content: PutContent,
}

#[derive(Debug, Deserialize)]
struct PutContent {
    sha: String,
}

#[derive(Debug, Serialize)]
struct DeleteRequest<'a> {
    message: &'a str,
    sha: &'a str,
    branch: &'a str,
}

// -- Client -------------------------------------------------------------------

/// Client for one repository branch on the GitHub contents API.
#[derive(Debug, Clone)]
pub struct GitHubContentClient {
    http: reqwest::Client,
    api_url: Url,
    owner: String,
    repo: String,
    branch: String,
}

impl GitHubContentClient {
    /// Create a new client from configuration.
    pub fn new(config: ContentRepoConfig) -> Result<Self, ContentError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token))
            .map_err(|_| ContentError::Config(ConfigError::InvalidToken))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert(
            HeaderName::from_static("x-github-api-version"),
            HeaderValue::from_static(API_VERSION),
        );

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(|e| ContentError::Http {
                operation: "client_init".into(),
                source: e,
            })?;

        Ok(Self {
            http,
            api_url: config.api_url,
            owner: config.owner,
            repo: config.repo,
            branch: config.branch,
        })
    }

    /// Branch all reads and writes target.
    pub fn branch(&self) -> &str {
        &self.branch
    }

    /// `{api}/repos/{owner}/{repo}/contents/{path}` with each segment encoded.
    fn contents_url(&self, path: &str) -> Result<Url, ContentError> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ContentError::Config(ConfigError::InvalidUrl(
                    self.api_url.to_string(),
                    "cannot be a base URL".to_string(),
                ))
            })?
            .pop_if_empty()
            .extend(["repos", self.owner.as_str(), self.repo.as_str(), "contents"])
            .extend(path.split('/').filter(|s| !s.is_empty()));
        Ok(url)
    }

    fn read_url(&self, path: &str) -> Result<Url, ContentError> {
        let mut url = self.contents_url(path)?;
        url.query_pairs_mut().append_pair("ref", &self.branch);
        Ok(url)
    }

    async fn send(
        &self,
        operation: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ContentError> {
        request.send().await.map_err(|e| ContentError::Http {
            operation: operation.to_string(),
            source: e,
        })
    }
}

/// Turn a non-2xx response into [`ContentError::Remote`].
async fn ensure_success(
    operation: &str,
    resp: reqwest::Response,
) -> Result<reqwest::Response, ContentError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    tracing::warn!(%operation, status, "content API rejected request");
    Err(ContentError::Remote {
        operation: operation.to_string(),
        status,
        body,
    })
}

fn decode_content(path: &str, encoded: &str) -> Result<String, ContentError> {
    // GitHub wraps base64 at 60 columns.
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = BASE64.decode(compact).map_err(|e| ContentError::Decode {
        path: path.to_string(),
        reason: e.to_string(),
    })?;
    String::from_utf8(bytes).map_err(|e| ContentError::Decode {
        path: path.to_string(),
        reason: e.to_string(),
    })
}

#[async_trait]
impl ContentStore for GitHubContentClient {
    async fn get(&self, path: &str) -> Result<Option<RemoteFile>, ContentError> {
        let operation = format!("GET {path}");
        let url = self.read_url(path)?;
        let resp = self.send(&operation, self.http.get(url)).await?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            tracing::debug!(%path, "content not found");
            return Ok(None);
        }
        let resp = ensure_success(&operation, resp).await?;

        let file: FileResponse = resp.json().await.map_err(|e| ContentError::Deserialization {
            operation: operation.clone(),
            source: e,
        })?;
        let content = decode_content(path, &file.content)?;
        tracing::debug!(%path, revision = %file.sha, bytes = content.len(), "content read");
        Ok(Some(RemoteFile {
            content,
            revision: Revision::new(file.sha),
        }))
    }

    async fn put(
        &self,
        path: &str,
        content: &str,
        message: &str,
        revision: Option<&Revision>,
    ) -> Result<Revision, ContentError> {
        let operation = format!("PUT {path}");
        let url = self.contents_url(path)?;
        let body = PutRequest {
            message,
            content: BASE64.encode(content.as_bytes()),
            branch: &self.branch,
            sha: revision.map(Revision::as_str),
        };

        let resp = self.send(&operation, self.http.put(url).json(&body)).await?;
        let resp = ensure_success(&operation, resp).await?;

        let written: PutResponse = resp.json().await.map_err(|e| ContentError::Deserialization {
            operation: operation.clone(),
            source: e,
        })?;
        tracing::info!(%path, created = revision.is_none(), revision = %written.content.sha, "content written");
        Ok(Revision::new(written.content.sha))
    }

    async fn delete(
        &self,
        path: &str,
        revision: &Revision,
        message: &str,
    ) -> Result<(), ContentError> {
        let operation = format!("DELETE {path}");
        let url = self.contents_url(path)?;
        let body = DeleteRequest {
            message,
            sha: revision.as_str(),
            branch: &self.branch,
        };

        let resp = self.send(&operation, self.http.delete(url).json(&body)).await?;
        ensure_success(&operation, resp).await?;
        tracing::info!(%path, "content deleted");
        Ok(())
    }

    async fn list(&self, dir: &str) -> Result<Vec<DirEntry>, ContentError> {
        let operation = format!("GET {dir}/");
        let url = self.read_url(dir)?;
        let resp = self.send(&operation, self.http.get(url)).await?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        let resp = ensure_success(&operation, resp).await?;

        resp.json().await.map_err(|e| ContentError::Deserialization {
            operation,
            source: e,
        })
    }

    fn backend_name(&self) -> &'static str {
        "github"
    }
}
