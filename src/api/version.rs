//
//  drone-client
//  api/version.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Generation Routing
//!
//! Drone servers expose two incompatible API generations. The 0.4 line
//! ("legacy") addresses repositories as `{owner}/{name}` and identifies
//! builds by number, while the current line addresses repositories as
//! `{host}/{owner}/{name}` and identifies builds by branch and commit.
//!
//! Every logical operation is resolved here, in one table keyed by
//! ([`Operation`], [`ApiVersion`]). Each entry is one of:
//!
//! - [`Route::Call`] - an explicit method and path
//! - [`Route::Unsupported`] - the operation fails without touching the network
//! - [`Route::NoOp`] - the operation succeeds without touching the network
//!
//! ## Example
//!
//! ```rust
//! use drone_client::api::version::{route, ApiVersion, Operation, RepoRef, Route};
//!
//! let repo = RepoRef::new("github.com", "octo", "hello");
//!
//! match route(&Operation::RepoGet(repo), ApiVersion::Legacy) {
//!     Route::Call { path, .. } => assert_eq!(path, "/api/repos/octo/hello"),
//!     _ => unreachable!(),
//! }
//! ```

use reqwest::Method;

/// The Drone server generation a client talks to.
///
/// Fixed when the client is built. There is no detection and no way to
/// change it afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiVersion {
    /// The 0.4 server line.
    Legacy,

    /// The current server line.
    #[default]
    Current,
}

impl ApiVersion {
    /// Builds the version from the legacy-mode flag used in configuration.
    pub fn from_legacy_flag(legacy: bool) -> Self {
        if legacy {
            Self::Legacy
        } else {
            Self::Current
        }
    }

    /// Returns `true` for the 0.4 server line.
    pub fn is_legacy(self) -> bool {
        matches!(self, Self::Legacy)
    }
}

/// Coordinates of a repository.
///
/// `host` is the remote the repository lives on (e.g. `github.com`). Legacy
/// servers ignore it.
///
/// Coordinates are placed into the path verbatim, without percent-escaping.
/// A value containing `/`, `?` or `#` changes the shape of the URL, and one
/// carrying its own `access_token=` query adds a second token parameter.
/// Callers passing untrusted input must validate it first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepoRef<'a> {
    pub host: &'a str,
    pub owner: &'a str,
    pub name: &'a str,
}

impl<'a> RepoRef<'a> {
    pub fn new(host: &'a str, owner: &'a str, name: &'a str) -> Self {
        Self { host, owner, name }
    }
}

/// Coordinates of a single commit or build.
///
/// Legacy servers identify builds by `build` number; current servers by
/// `branch` and `sha`. Like [`RepoRef`], every field is interpolated into the
/// path verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitRef<'a> {
    pub repo: RepoRef<'a>,
    pub branch: &'a str,
    pub sha: &'a str,
    pub build: &'a str,
}

/// Every logical operation the client exposes, with its coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation<'a> {
    CommitGet(CommitRef<'a>),
    CommitOutput(CommitRef<'a>),
    CommitRebuild(CommitRef<'a>),
    CommitList(RepoRef<'a>),
    CommitListBranch { repo: RepoRef<'a>, branch: &'a str },

    RepoGet(RepoRef<'a>),
    RepoCreate(RepoRef<'a>),
    RepoUpdate(RepoRef<'a>),
    RepoEnable(RepoRef<'a>),
    RepoEnableWithActivate { repo: RepoRef<'a>, activate: bool },
    RepoDisable(RepoRef<'a>),
    RepoDelete(RepoRef<'a>),
    RepoSetKey(RepoRef<'a>),
    RepoSetParams(RepoRef<'a>),
    RepoEncryptSecrets(RepoRef<'a>),
    RepoList,

    UserGet { login: &'a str },
    UserCurrent,
    UserSync,
    UserCreate { remote: &'a str, login: &'a str },
    UserPatch { login: &'a str },
    UserDelete { remote: &'a str, login: &'a str },
    UserList,
}

impl Operation<'_> {
    /// Human-readable name, used in errors and log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CommitGet(_) => "commit get",
            Self::CommitOutput(_) => "commit output",
            Self::CommitRebuild(_) => "commit rebuild",
            Self::CommitList(_) => "commit list",
            Self::CommitListBranch { .. } => "commit list branch",
            Self::RepoGet(_) => "repo get",
            Self::RepoCreate(_) => "repo create",
            Self::RepoUpdate(_) => "repo update",
            Self::RepoEnable(_) => "repo enable",
            Self::RepoEnableWithActivate { .. } => "repo enable with activate",
            Self::RepoDisable(_) => "repo disable",
            Self::RepoDelete(_) => "repo delete",
            Self::RepoSetKey(_) => "repo set key",
            Self::RepoSetParams(_) => "repo set params",
            Self::RepoEncryptSecrets(_) => "repo encrypt secrets",
            Self::RepoList => "repo list",
            Self::UserGet { .. } => "user get",
            Self::UserCurrent => "user current",
            Self::UserSync => "user sync",
            Self::UserCreate { .. } => "user create",
            Self::UserPatch { .. } => "user patch",
            Self::UserDelete { .. } => "user delete",
            Self::UserList => "user list",
        }
    }
}

/// Outcome of resolving an [`Operation`] against an [`ApiVersion`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Issue `method` against `path` (path and operation query, no token).
    Call { method: Method, path: String },

    /// The operation has no meaning on this generation and must fail.
    Unsupported(&'static str),

    /// The operation is meaningless but harmless here and succeeds silently.
    NoOp,
}

impl Route {
    fn call(method: Method, path: String) -> Self {
        Self::Call { method, path }
    }
}

fn legacy_repo(r: &RepoRef<'_>) -> String {
    format!("/api/repos/{}/{}", r.owner, r.name)
}

fn current_repo(r: &RepoRef<'_>) -> String {
    format!("/api/repos/{}/{}/{}", r.host, r.owner, r.name)
}

fn current_commit(c: &CommitRef<'_>) -> String {
    format!(
        "{}/branches/{}/commits/{}",
        current_repo(&c.repo),
        c.branch,
        c.sha
    )
}

/// Resolves the route for `op` on the `version` server generation.
pub fn route(op: &Operation<'_>, version: ApiVersion) -> Route {
    use ApiVersion::{Current, Legacy};
    use Operation::*;

    match (op, version) {
        (CommitGet(c), Legacy) => {
            Route::call(Method::GET, format!("{}/{}", legacy_repo(&c.repo), c.sha))
        }
        (CommitGet(c), Current) => Route::call(Method::GET, current_commit(c)),

        (CommitOutput(c), Legacy) => Route::call(
            Method::GET,
            format!("{}/logs/{}/1", legacy_repo(&c.repo), c.build),
        ),
        (CommitOutput(c), Current) => {
            Route::call(Method::GET, format!("{}/console", current_commit(c)))
        }

        (CommitRebuild(c), Legacy) => Route::call(
            Method::POST,
            format!("{}/builds/{}", legacy_repo(&c.repo), c.build),
        ),
        (CommitRebuild(c), Current) => {
            Route::call(Method::POST, format!("{}?action=rebuild", current_commit(c)))
        }

        (CommitList(r), Legacy) => Route::call(Method::GET, format!("{}/builds", legacy_repo(r))),
        (CommitList(r), Current) => {
            Route::call(Method::GET, format!("{}/commits", current_repo(r)))
        }

        (CommitListBranch { .. }, Legacy) => Route::Unsupported(op.name()),
        // The branch is not part of the current path.
        (CommitListBranch { repo, .. }, Current) => {
            Route::call(Method::GET, format!("{}/commits", current_repo(repo)))
        }

        (RepoGet(r), Legacy) => Route::call(Method::GET, legacy_repo(r)),
        (RepoGet(r), Current) => Route::call(Method::GET, current_repo(r)),

        (RepoCreate(r), Legacy) => {
            Route::call(Method::POST, format!("{}?activate=false", legacy_repo(r)))
        }
        (RepoCreate(_), Current) => Route::Unsupported(op.name()),

        (RepoUpdate(r), Legacy) => Route::call(Method::PATCH, legacy_repo(r)),
        (RepoUpdate(r), Current) => Route::call(Method::PUT, current_repo(r)),

        (RepoEnable(_), Legacy) => Route::NoOp,
        (RepoEnable(r), Current) => Route::call(Method::POST, current_repo(r)),

        (RepoEnableWithActivate { repo, activate }, Legacy) => Route::call(
            Method::POST,
            format!("{}?activate={}", legacy_repo(repo), activate),
        ),
        (RepoEnableWithActivate { repo, .. }, Current) => {
            Route::call(Method::POST, current_repo(repo))
        }

        (RepoDisable(_), Legacy) => Route::Unsupported(op.name()),
        (RepoDisable(r), Current) => {
            Route::call(Method::POST, format!("{}/deactivate", current_repo(r)))
        }

        (RepoDelete(r), Legacy) => Route::call(Method::DELETE, legacy_repo(r)),
        (RepoDelete(r), Current) => Route::call(Method::DELETE, current_repo(r)),

        (RepoSetKey(r), Legacy) => Route::call(Method::PUT, legacy_repo(r)),
        (RepoSetKey(r), Current) => Route::call(Method::PUT, current_repo(r)),

        (RepoSetParams(r), Legacy) => Route::call(Method::PATCH, legacy_repo(r)),
        (RepoSetParams(r), Current) => Route::call(Method::PUT, current_repo(r)),

        (RepoEncryptSecrets(r), Legacy) => {
            Route::call(Method::POST, format!("{}/encrypt", legacy_repo(r)))
        }
        (RepoEncryptSecrets(_), Current) => Route::Unsupported(op.name()),

        (RepoList, _) => Route::call(Method::GET, "/api/user/repos".to_string()),

        (UserGet { login }, _) => Route::call(Method::GET, format!("/api/users/{}", login)),

        (UserCurrent, _) => Route::call(Method::GET, "/api/user".to_string()),

        (UserSync, Legacy) => Route::NoOp,
        (UserSync, Current) => Route::call(Method::POST, "/api/user/sync".to_string()),

        (UserCreate { .. }, Legacy) => Route::call(Method::POST, "/api/users".to_string()),
        (UserCreate { remote, login }, Current) => {
            Route::call(Method::POST, format!("/api/users/{}/{}", remote, login))
        }

        (UserPatch { login }, _) => Route::call(Method::PATCH, format!("/api/users/{}", login)),

        (UserDelete { login, .. }, Legacy) => {
            Route::call(Method::DELETE, format!("/api/users/{}", login))
        }
        (UserDelete { remote, login }, Current) => {
            Route::call(Method::DELETE, format!("/api/users/{}/{}", remote, login))
        }

        (UserList, _) => Route::call(Method::GET, "/api/users".to_string()),
    }
}
