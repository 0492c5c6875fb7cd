//
//  drone-client
//  api/commits.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Commit and Build Operations
//!
//! Current servers identify a build by branch and commit hash, 0.4 servers
//! by build number. Every method takes all of them and the client picks the
//! ones its server generation understands.
//!
//! ## Example
//!
//! ```rust,no_run
//! use drone_client::api::DroneClient;
//!
//! # async fn example() -> Result<(), drone_client::api::ApiError> {
//! let client = DroneClient::current("my-token", "https://drone.example.com")?;
//!
//! for commit in client.commits().list("github.com", "octo", "hello").await? {
//!     println!("{} {} {}", commit.sha_short(), commit.branch, commit.status);
//! }
//! # Ok(())
//! # }
//! ```

use super::client::DroneClient;
use super::common::ApiError;
use super::request::Payload;
use super::response::Json;
use super::transport::ResponseBody;
use super::types::Commit;
use super::version::{CommitRef, Operation, RepoRef};

/// Commit operations, borrowed from a [`DroneClient`].
#[derive(Debug, Clone, Copy)]
pub struct CommitService<'a> {
    client: &'a DroneClient,
}

impl<'a> CommitService<'a> {
    pub(crate) fn new(client: &'a DroneClient) -> Self {
        Self { client }
    }

    /// Fetches a single commit.
    ///
    /// `branch` is ignored by 0.4 servers.
    pub async fn get(
        &self,
        host: &str,
        owner: &str,
        name: &str,
        branch: &str,
        sha: &str,
    ) -> Result<Commit, ApiError> {
        let commit = CommitRef {
            repo: RepoRef::new(host, owner, name),
            branch,
            sha,
            build: "",
        };
        let op = Operation::CommitGet(commit);
        let Json(commit): Json<Commit> = self.client.call(op, Payload::None).await?;
        Ok(commit)
    }

    /// Streams the console output of a build.
    ///
    /// The response status is not inspected: a missing build yields the
    /// server's error body, not [`ApiError::NotFound`]. The caller owns the
    /// returned body and releases the connection by dropping it.
    pub async fn output(
        &self,
        host: &str,
        owner: &str,
        name: &str,
        branch: &str,
        sha: &str,
        build_number: &str,
    ) -> Result<ResponseBody, ApiError> {
        let commit = CommitRef {
            repo: RepoRef::new(host, owner, name),
            branch,
            sha,
            build: build_number,
        };
        self.client.dispatch_stream(Operation::CommitOutput(commit)).await
    }

    /// Restarts a build.
    pub async fn rebuild(
        &self,
        host: &str,
        owner: &str,
        name: &str,
        branch: &str,
        sha: &str,
        build_number: &str,
    ) -> Result<(), ApiError> {
        let commit = CommitRef {
            repo: RepoRef::new(host, owner, name),
            branch,
            sha,
            build: build_number,
        };
        self.client.call(Operation::CommitRebuild(commit), Payload::None).await
    }

    /// Lists recent commits (builds, on 0.4 servers) of a repository.
    pub async fn list(&self, host: &str, owner: &str, name: &str) -> Result<Vec<Commit>, ApiError> {
        let op = Operation::CommitList(RepoRef::new(host, owner, name));
        let Json(list): Json<Vec<Commit>> = self.client.call(op, Payload::None).await?;
        Ok(list)
    }

    /// Lists commits for a branch. Not available on 0.4 servers.
    pub async fn list_branch(
        &self,
        host: &str,
        owner: &str,
        name: &str,
        branch: &str,
    ) -> Result<Vec<Commit>, ApiError> {
        let op = Operation::CommitListBranch {
            repo: RepoRef::new(host, owner, name),
            branch,
        };
        let Json(list): Json<Vec<Commit>> = self.client.call(op, Payload::None).await?;
        Ok(list)
    }
}
