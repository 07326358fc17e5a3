//! Contract tests for GitHubContentClient against the contents API shapes.
//!
//! ## Endpoints Tested
//!
//! | Method | Path | Test |
//! |--------|------|------|
//! | GET    | `/repos/{o}/{r}/contents/{path}` | `get_*`, `list_*` |
//! | PUT    | `/repos/{o}/{r}/contents/{path}` | `put_*` |
//! | DELETE | `/repos/{o}/{r}/contents/{path}` | `delete_*` |

use pjpv_content::{ContentError, ContentRepoConfig, ContentStore, EntryKind, GitHubContentClient, Revision};
use wiremock::matchers::{body_json, body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const INDEX: &str = "/repos/parlementjpv/site/contents/articles/index.json";

fn test_client(mock_server: &MockServer) -> GitHubContentClient {
    let config = ContentRepoConfig::local_mock(&mock_server.uri(), "test-token").unwrap();
    GitHubContentClient::new(config).unwrap()
}

// ── GET ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_decodes_base64_content_and_returns_sha() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(INDEX))
        .and(query_param("ref", "main"))
        .and(header("authorization", "Bearer test-token"))
        .and(header("accept", "application/vnd.github+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "type": "file",
            "encoding": "base64",
            "name": "index.json",
            "path": "articles/index.json",
            "sha": "3d21ec53a331a6f037a91c368710b99387d012c1",
            "content": "W3sic2x1ZyI6\nImEifV0=\n"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let file = client.get("articles/index.json").await.unwrap().unwrap();
    assert_eq!(file.content, r#"[{"slug":"a"}]"#);
    assert_eq!(file.revision.as_str(), "3d21ec53a331a6f037a91c368710b99387d012c1");
}

#[tokio::test]
async fn get_returns_none_on_404() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(INDEX))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "message": "Not Found"
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    assert!(client.get("articles/index.json").await.unwrap().is_none());
}

#[tokio::test]
async fn get_surfaces_other_statuses_as_remote_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(INDEX))
        .respond_with(ResponseTemplate::new(403).set_body_string("rate limited"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    match client.get("articles/index.json").await.unwrap_err() {
        ContentError::Remote { status, body, operation } => {
            assert_eq!(status, 403);
            assert_eq!(body, "rate limited");
            assert_eq!(operation, "GET articles/index.json");
        }
        other => panic!("expected Remote, got: {other:?}"),
    }
}

// ── PUT ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn put_without_revision_creates_file() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path(INDEX))
        .and(body_json(serde_json::json!({
            "message": "Update articles index (a)",
            "content": "W3sic2x1ZyI6ImEifV0=",
            "branch": "main"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "content": { "sha": "new-sha", "path": "articles/index.json" },
            "commit": { "sha": "commit-sha" }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let revision = client
        .put("articles/index.json", r#"[{"slug":"a"}]"#, "Update articles index (a)", None)
        .await
        .unwrap();
    assert_eq!(revision.as_str(), "new-sha");
}

#[tokio::test]
async fn put_with_revision_sends_sha() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/repos/parlementjpv/site/contents/articles/bilan/index.html"))
        .and(body_partial_json(serde_json::json!({ "sha": "old-sha", "branch": "main" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "content": { "sha": "next-sha" }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let revision = client
        .put(
            "articles/bilan/index.html",
            "<p>x</p>",
            "Publish article: Bilan",
            Some(&Revision::new("old-sha")),
        )
        .await
        .unwrap();
    assert_eq!(revision.as_str(), "next-sha");
}

#[tokio::test]
async fn put_conflict_is_a_plain_remote_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path(INDEX))
        .respond_with(
            ResponseTemplate::new(409)
                .set_body_string(r#"{"message":"articles/index.json does not match old-sha"}"#),
        )
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client
        .put("articles/index.json", "[]", "m", Some(&Revision::new("old-sha")))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(409));
    assert!(err.to_string().contains("does not match"));
}

// ── DELETE ──────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_sends_sha_and_branch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/repos/parlementjpv/site/contents/articles/bilan/index.html"))
        .and(body_json(serde_json::json!({
            "message": "Delete articles/bilan/index.html",
            "sha": "page-sha",
            "branch": "main"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "content": null,
            "commit": { "sha": "c" }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    client
        .delete(
            "articles/bilan/index.html",
            &Revision::new("page-sha"),
            "Delete articles/bilan/index.html",
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn delete_missing_file_is_remote_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/repos/parlementjpv/site/contents/articles/gone/index.html"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client
        .delete("articles/gone/index.html", &Revision::new("x"), "m")
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
}

// ── LIST ────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_parses_directory_entries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/parlementjpv/site/contents/articles"))
        .and(query_param("ref", "main"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"name": "index.json", "path": "articles/index.json", "type": "file", "sha": "a"},
            {"name": "bilan", "path": "articles/bilan", "type": "dir", "sha": "b"}
        ])))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let entries = client.list("articles").await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].kind, EntryKind::Dir);
    assert_eq!(entries[1].path, "articles/bilan");
}

#[tokio::test]
async fn list_missing_directory_is_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/parlementjpv/site/contents/articles"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    assert!(client.list("articles").await.unwrap().is_empty());
}

#[tokio::test]
async fn transport_failure_is_http_error() {
    let config = ContentRepoConfig::local_mock("http://127.0.0.1:1", "t").unwrap();
    let client = GitHubContentClient::new(config).unwrap();
    let err = client.get("articles/index.json").await.unwrap_err();
    assert!(matches!(err, ContentError::Http { .. }), "got: {err:?}");
}
