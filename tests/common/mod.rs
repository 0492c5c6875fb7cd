//
//  drone-client
//  tests/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

#![allow(dead_code)]

use std::sync::Arc;

use drone_client::api::{ApiVersion, DroneClient, ReqwestTransport};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const TOKEN: &str = "s3cret";

/// Installs a test subscriber once; set `DRONE_DEBUG=debug` to see request logs.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env("DRONE_DEBUG").unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_test_writer())
        .with(filter)
        .try_init();
}

pub fn client(server: &mockito::ServerGuard, version: ApiVersion) -> DroneClient {
    client_with_token(server, version, TOKEN)
}

pub fn client_with_token(
    server: &mockito::ServerGuard,
    version: ApiVersion,
    token: &str,
) -> DroneClient {
    init_logging();
    let transport = ReqwestTransport::new().expect("transport");
    DroneClient::with_transport(token, &server.url(), version, Arc::new(transport))
}

pub fn token_query() -> mockito::Matcher {
    mockito::Matcher::UrlEncoded("access_token".into(), TOKEN.into())
}

pub const REPO_JSON: &str = r#"{
    "remote": "github",
    "host": "github.com",
    "owner": "octo",
    "name": "hello",
    "url": "https://github.com/octo/hello",
    "clone_url": "https://github.com/octo/hello.git",
    "active": true,
    "private": false,
    "post_commits": true,
    "pull_requests": false,
    "timeout": 60,
    "created_at": 1704067200
}"#;

pub const USER_JSON: &str = r#"{
    "remote": "github.com",
    "login": "octocat",
    "name": "The Octocat",
    "email": "octocat@github.com",
    "admin": true,
    "active": true
}"#;
