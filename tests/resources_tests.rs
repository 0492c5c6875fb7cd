//
//  drone-client
//  tests/resources_tests.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

mod common;

use std::collections::BTreeMap;

use drone_client::api::{ApiVersion, ErrorKind, Payload, Repo, Secrets};
use mockito::Matcher;
use serde_json::json;

use common::{client, token_query, REPO_JSON, USER_JSON};

// =============================================================================
// Repositories
// =============================================================================

#[tokio::test]
async fn test_get_repo_legacy_omits_host() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/repos/octo/hello")
        .match_query(token_query())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(REPO_JSON)
        .create_async()
        .await;

    let client = client(&server, ApiVersion::Legacy);
    let repo = client.repos().get("github.com", "octo", "hello").await.unwrap();

    assert_eq!(repo.owner, "octo");
    assert_eq!(repo.name, "hello");
    assert!(repo.active);
    assert_eq!(repo.timeout, 60);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_repo_current_includes_host() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/repos/github.com/octo/hello")
        .match_query(token_query())
        .with_status(200)
        .with_body(REPO_JSON)
        .create_async()
        .await;

    let client = client(&server, ApiVersion::Current);
    let repo = client.repos().get("github.com", "octo", "hello").await.unwrap();

    assert_eq!(repo.host, "github.com");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_update_repo_method_per_version() {
    let repo: Repo = serde_json::from_str(REPO_JSON).unwrap();

    for (version, method, path) in [
        (ApiVersion::Legacy, "PATCH", "/api/repos/octo/hello"),
        (ApiVersion::Current, "PUT", "/api/repos/github.com/octo/hello"),
    ] {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock(method, path)
            .match_query(token_query())
            .match_header("content-type", "application/json")
            .match_body(Matcher::PartialJson(json!({"owner": "octo", "timeout": 60})))
            .with_status(200)
            .with_body(REPO_JSON)
            .create_async()
            .await;

        let client = client(&server, version);
        let updated = client.repos().update(&repo).await.unwrap();

        assert_eq!(updated.full_name(), "octo/hello");
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn test_enable_current_posts() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/repos/github.com/octo/hello")
        .match_query(token_query())
        .with_status(200)
        .with_body(REPO_JSON)
        .create_async()
        .await;

    let client = client(&server, ApiVersion::Current);
    let repo = client.repos().enable("github.com", "octo", "hello").await.unwrap();

    assert_eq!(repo.map(|r| r.name), Some("hello".to_string()));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_disable_current_posts_deactivate() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/repos/github.com/octo/hello/deactivate")
        .match_query(token_query())
        .with_status(200)
        .create_async()
        .await;

    let client = client(&server, ApiVersion::Current);
    client.repos().disable("github.com", "octo", "hello").await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_set_params_wraps_params() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PUT", "/api/repos/github.com/octo/hello")
        .match_query(token_query())
        .match_body(Matcher::Json(json!({"params": {"DEPLOY_ENV": "staging"}})))
        .with_status(200)
        .create_async()
        .await;

    let params = BTreeMap::from([("DEPLOY_ENV", "staging")]);
    let client = client(&server, ApiVersion::Current);
    client
        .repos()
        .set_params("github.com", "octo", "hello", &params)
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_set_key_sends_key_pair() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PUT", "/api/repos/octo/hello")
        .match_query(token_query())
        .match_body(Matcher::Json(json!({
            "public_key": "ssh-rsa AAAA",
            "private_key": "-----BEGIN-----",
        })))
        .with_status(200)
        .create_async()
        .await;

    let client = client(&server, ApiVersion::Legacy);
    client
        .repos()
        .set_key("github.com", "octo", "hello", "ssh-rsa AAAA", "-----BEGIN-----")
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_encrypt_secrets_returns_raw_text() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/repos/octo/hello/encrypt")
        .match_query(token_query())
        .match_header("content-type", "text/plain")
        .match_body("environment:\n- TOKEN=abc\n")
        .with_status(200)
        .with_body("eyJhbGciOiJSU0EtT0FFUCJ9.ciphertext")
        .create_async()
        .await;

    let client = client(&server, ApiVersion::Legacy);
    let sealed = client
        .repos()
        .encrypt_secrets("octo", "hello", &Secrets::new(["TOKEN=abc"]))
        .await
        .unwrap();

    assert_eq!(sealed, "eyJhbGciOiJSU0EtT0FFUCJ9.ciphertext");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_encrypt_secrets_decodes_json_string() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/repos/octo/hello/encrypt")
        .match_query(token_query())
        .with_status(200)
        .with_body(r#""sealed""#)
        .create_async()
        .await;

    let client = client(&server, ApiVersion::Legacy);
    let sealed = client
        .repos()
        .encrypt_secrets("octo", "hello", &Secrets::new(["A=1"]))
        .await
        .unwrap();

    assert_eq!(sealed, "sealed");
}

#[tokio::test]
async fn test_list_repos_empty_body_fails_decoding() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/user/repos")
        .match_query(token_query())
        .with_status(200)
        .create_async()
        .await;

    let client = client(&server, ApiVersion::Current);
    let err = client.repos().list().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::DecodeFailure);
}

// =============================================================================
// Commits
// =============================================================================

#[tokio::test]
async fn test_list_commits_legacy_reads_builds() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/repos/octo/hello/builds")
        .match_query(token_query())
        .with_status(200)
        .with_body(r#"[{"sha":"0123456789abcdef","branch":"main","status":"success"}]"#)
        .create_async()
        .await;

    let client = client(&server, ApiVersion::Legacy);
    let commits = client.commits().list("github.com", "octo", "hello").await.unwrap();

    assert_eq!(commits.len(), 1);
    assert_eq!(commits[0].sha_short(), "01234567");
    assert_eq!(commits[0].status, "success");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_commit_current_uses_branch() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/repos/github.com/octo/hello/branches/main/commits/abc123")
        .match_query(token_query())
        .with_status(200)
        .with_body(
            json!({
                "sha": "abc123",
                "branch": "main",
                "status": "failure",
                "started_at": 100,
                "finished_at": 190,
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client(&server, ApiVersion::Current);
    let commit = client
        .commits()
        .get("github.com", "octo", "hello", "main", "abc123")
        .await
        .unwrap();

    assert_eq!(commit.branch, "main");
    assert_eq!(commit.status, "failure");
    assert_eq!(commit.finished - commit.started, 90);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_rebuild_current_keeps_action_query() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/repos/github.com/octo/hello/branches/main/commits/abc123")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("action".into(), "rebuild".into()),
            token_query(),
        ]))
        .with_status(200)
        .create_async()
        .await;

    let client = client(&server, ApiVersion::Current);
    client
        .commits()
        .rebuild("github.com", "octo", "hello", "main", "abc123", "")
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_output_streams_console() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/repos/octo/hello/logs/7/1")
        .match_query(token_query())
        .with_status(200)
        .with_body("$ cargo test\ntest result: ok\n")
        .create_async()
        .await;

    let client = client(&server, ApiVersion::Legacy);
    let body = client
        .commits()
        .output("github.com", "octo", "hello", "main", "abc123", "7")
        .await
        .unwrap();

    assert_eq!(body.text().await.unwrap(), "$ cargo test\ntest result: ok\n");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_output_ignores_error_status() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/repos/github.com/octo/hello/branches/main/commits/abc123/console")
        .match_query(token_query())
        .with_status(404)
        .with_body("not found")
        .create_async()
        .await;

    let client = client(&server, ApiVersion::Current);
    let body = client
        .commits()
        .output("github.com", "octo", "hello", "main", "abc123", "1")
        .await
        .unwrap();

    assert_eq!(body.text().await.unwrap(), "not found");
}

// =============================================================================
// Users
// =============================================================================

#[tokio::test]
async fn test_create_user_legacy_sends_form() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/users")
        .match_query(token_query())
        .match_header("content-type", "application/x-www-form-urlencoded")
        .match_body("admin=true&login=octocat")
        .with_status(200)
        .with_body(USER_JSON)
        .create_async()
        .await;

    let client = client(&server, ApiVersion::Legacy);
    let payload = Payload::form([("login", "octocat"), ("admin", "true")]);
    let user = client.users().create("github.com", "octocat", payload).await.unwrap();

    assert_eq!(user.login, "octocat");
    assert!(user.admin);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_create_user_current_sends_json() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/users/github.com/octocat")
        .match_query(token_query())
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({"admin": "true", "login": "octocat"})))
        .with_status(200)
        .with_body(USER_JSON)
        .create_async()
        .await;

    let client = client(&server, ApiVersion::Current);
    let payload = Payload::form([("login", "octocat"), ("admin", "true")]);
    let user = client.users().create("github.com", "octocat", payload).await.unwrap();

    assert_eq!(user.email, "octocat@github.com");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_sync_current_accepts_empty_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/user/sync")
        .match_query(token_query())
        .with_status(200)
        .create_async()
        .await;

    let client = client(&server, ApiVersion::Current);
    client.users().sync().await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_delete_user_path_per_version() {
    for (version, path) in [
        (ApiVersion::Legacy, "/api/users/octocat"),
        (ApiVersion::Current, "/api/users/github.com/octocat"),
    ] {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", path)
            .match_query(token_query())
            .with_status(200)
            .create_async()
            .await;

        let client = client(&server, version);
        client.users().delete("github.com", "octocat").await.unwrap();

        mock.assert_async().await;
    }
}

#[tokio::test]
async fn test_get_user_not_found() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/users/ghost")
        .match_query(token_query())
        .with_status(404)
        .with_body("user not found")
        .create_async()
        .await;

    let client = client(&server, ApiVersion::Current);
    let err = client.users().get("ghost").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
}
